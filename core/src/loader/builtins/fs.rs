use std::fs;
use std::path::PathBuf;
use std::time::SystemTime;

use dashmap::DashMap;
use tracing::debug;

use super::utils::{relative_name, resolve_pattern_to_files};
use crate::loader::{LoadMode, Loader, LoaderError, LoaderState};
use crate::resource::Resource;

/// A file-backed artifact: the raw content and the time it was read.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub content: String,
    pub loaded_at: SystemTime,
}

/// A loader resolving resource names against an ordered list of search
/// roots.
///
/// Under [`LoadMode::One`] the name is a root-relative path and the
/// first root containing it wins; under [`LoadMode::All`] the name is a
/// glob pattern expanded beneath every root.
pub struct FileLoader {
    roots: Vec<PathBuf>,
    artifacts: DashMap<String, LoadedFile>,
    state: LoaderState,
}

impl FileLoader {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            artifacts: DashMap::new(),
            state: LoaderState::new(),
        }
    }

    /// The loaded copy of `resource`, if it has been loaded.
    pub fn artifact(&self, resource: &Resource) -> Option<LoadedFile> {
        self.artifacts
            .get(resource.name())
            .map(|entry| entry.value().clone())
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.is_file())
    }
}

impl Loader for FileLoader {
    fn supports(&self, resource: &Resource) -> bool {
        self.locate(resource.name()).is_some()
    }

    fn find_resource(
        &self,
        resource: &Resource,
        mode: LoadMode,
    ) -> Result<Vec<Resource>, LoaderError> {
        match mode {
            LoadMode::One => self
                .locate(resource.name())
                .map(|_| vec![resource.clone()])
                .ok_or_else(|| LoaderError::NotFound {
                    resource: resource.clone(),
                }),
            LoadMode::All => {
                let mut found = Vec::new();
                for root in &self.roots {
                    let pattern = root.join(resource.name());
                    for path in resolve_pattern_to_files(&pattern.to_string_lossy())? {
                        if let Some(name) = relative_name(root, &path) {
                            found.push(Resource::new(name));
                        }
                    }
                }
                found.sort();
                found.dedup();
                Ok(found)
            }
        }
    }

    fn do_load(&self, resource: &Resource) -> Result<(), LoaderError> {
        let path = self
            .locate(resource.name())
            .ok_or_else(|| LoaderError::NotFound {
                resource: resource.clone(),
            })?;
        let content = fs::read_to_string(&path).map_err(|source| LoaderError::Io {
            resource: resource.clone(),
            source,
        })?;
        debug!(path = %path.display(), "loaded file resource");
        self.artifacts.insert(
            resource.name().to_owned(),
            LoadedFile {
                content,
                loaded_at: SystemTime::now(),
            },
        );
        Ok(())
    }

    /// A file resource is fresh as long as it still exists and has not
    /// been modified after `now`.
    fn is_valid(&self, resource: &Resource, now: SystemTime) -> bool {
        let Some(path) = self.locate(resource.name()) else {
            return false;
        };
        match fs::metadata(&path).and_then(|meta| meta.modified()) {
            Ok(modified) => modified <= now,
            Err(_) => false,
        }
    }

    fn state(&self) -> &LoaderState {
        &self.state
    }
}
