use std::time::SystemTime;

use dashmap::DashMap;
use glob::Pattern;
use tracing::debug;

use crate::loader::{LoadMode, Loader, LoaderError, LoaderState};
use crate::resource::Resource;

/// A loader over an in-memory map of resource name to content.
///
/// Handy for tests and for content compiled into a binary. Under
/// [`LoadMode::All`] the resource name is treated as a glob pattern
/// over the stored names. Entries never go stale.
#[derive(Default)]
pub struct InMemoryLoader {
    entries: DashMap<String, String>,
    artifacts: DashMap<String, String>,
    state: LoaderState,
}

impl InMemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    pub fn insert(&self, name: impl Into<String>, content: impl Into<String>) {
        self.entries.insert(name.into(), content.into());
    }

    /// The loaded copy of `resource`, if it has been loaded.
    pub fn artifact(&self, resource: &Resource) -> Option<String> {
        self.artifacts
            .get(resource.name())
            .map(|entry| entry.value().clone())
    }
}

impl Loader for InMemoryLoader {
    fn supports(&self, resource: &Resource) -> bool {
        self.entries.contains_key(resource.name())
    }

    fn find_resource(
        &self,
        resource: &Resource,
        mode: LoadMode,
    ) -> Result<Vec<Resource>, LoaderError> {
        match mode {
            LoadMode::One if self.entries.contains_key(resource.name()) => {
                Ok(vec![resource.clone()])
            }
            LoadMode::One => Err(LoaderError::NotFound {
                resource: resource.clone(),
            }),
            LoadMode::All => {
                let pattern = Pattern::new(resource.name())?;
                let mut found: Vec<Resource> = self
                    .entries
                    .iter()
                    .filter(|entry| pattern.matches(entry.key()))
                    .map(|entry| Resource::new(entry.key().clone()))
                    .collect();
                found.sort();
                Ok(found)
            }
        }
    }

    fn do_load(&self, resource: &Resource) -> Result<(), LoaderError> {
        let content = self
            .entries
            .get(resource.name())
            .map(|entry| entry.value().clone())
            .ok_or_else(|| LoaderError::NotFound {
                resource: resource.clone(),
            })?;
        self.artifacts.insert(resource.name().to_owned(), content);
        debug!(resource = %resource, "loaded in-memory resource");
        Ok(())
    }

    fn is_valid(&self, resource: &Resource, _now: SystemTime) -> bool {
        self.entries.contains_key(resource.name())
    }

    fn state(&self) -> &LoaderState {
        &self.state
    }
}
