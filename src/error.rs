//! Error types

use std::error;
use std::fmt;
use std::path::Path;

pub use crate::core::{FilterError, FilterErrorKind};

/// Top level error
#[derive(Debug)]
pub struct ExportError;

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Export was unsuccessful! There might be error traces below."
        )
    }
}

impl error::Error for ExportError {}

/// The destination exists and overwriting it was declined
#[derive(Debug)]
pub struct DestinationError {
    pub path: String,
}

impl fmt::Display for DestinationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "abort")
    }
}

impl error::Error for DestinationError {}

/// Error exporting a single file
#[derive(Debug)]
pub struct FileError {
    pub kind: FileErrorKind,
    /// The input file, relative to the project root
    pub file: String,
    /// The line being processed, 0 if not reading lines yet
    pub line: usize,
}

#[derive(Debug, PartialEq)]
pub enum FileErrorKind {
    OpenFile,
    ReadFile,
    WriteFile,
    Filter,
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let file = &self.file;
        match self.kind {
            FileErrorKind::OpenFile => write!(f, "Could not open file `{file}`."),
            FileErrorKind::ReadFile => write!(f, "Could not read file `{file}`."),
            FileErrorKind::WriteFile => write!(f, "Could not write output of `{file}`."),
            FileErrorKind::Filter => write!(f, "Invalid version guard in `{file}`."),
        }
    }
}

impl error::Error for FileError {}

/// Error related to paths
#[derive(Debug)]
pub struct PathError {
    /// The path that caused the error, as a string
    pub path: String,
}

impl<P> From<&P> for PathError
where
    P: AsRef<Path>,
{
    fn from(p: &P) -> Self {
        Self {
            path: p.as_ref().display().to_string(),
        }
    }
}

impl fmt::Display for PathError {
    #[cfg(windows)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // on windows, we try to remove the `\\?\` prefix returned
        // by `std::path::Path::display` to make the error message
        // more readable
        let path = if self.path.starts_with(r"\\?\") {
            &self.path[4..]
        } else {
            &self.path
        };
        Self::fmt_internal(path, f)
    }
    #[cfg(not(windows))]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::fmt_internal(&self.path, f)
    }
}

impl error::Error for PathError {}

impl PathError {
    fn fmt_internal(p: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error in path `{p}`")
    }
}
