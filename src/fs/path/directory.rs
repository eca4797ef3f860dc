use std::path::PathBuf;

/// Represents a scanned directory, with paths relative to the project root.
#[derive(Debug, Default)]
pub struct Directory {
    /// regular files, sorted by name
    pub files: Vec<PathBuf>,
    /// subdirectories, sorted by name
    pub subdirs: Vec<PathBuf>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }
}
