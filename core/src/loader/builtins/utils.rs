use std::path::{Path, PathBuf};

use glob::glob;
use walkdir::WalkDir;

/// Expands `pattern` to the concrete files it names. Directory matches
/// are walked recursively; unreadable entries are skipped.
pub(super) fn resolve_pattern_to_files(pattern: &str) -> Result<Vec<PathBuf>, glob::PatternError> {
    let mut files = Vec::new();

    for entry in glob(pattern)? {
        match entry {
            Ok(path) => {
                if path.is_dir() {
                    for entry in WalkDir::new(path).into_iter().filter_map(Result::ok) {
                        if entry.file_type().is_file() {
                            files.push(entry.path().to_path_buf());
                        }
                    }
                } else if path.is_file() {
                    files.push(path);
                }
            }
            Err(err) => tracing::debug!(error = %err, "skipping unreadable glob entry"),
        }
    }

    Ok(files)
}

/// The name of `path` relative to `root`, if it lives beneath it.
pub(super) fn relative_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(relative.to_string_lossy().into_owned())
}
