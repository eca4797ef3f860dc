use crate::error::PathError;
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::path::{Component, Path, PathBuf};

/// Representation of an absolute path that exists.
///
/// The project root and the destination are resolved once into `AbsPath`
/// so that everything joined onto them is independent of how the user spelled them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AbsPath {
    p: PathBuf,
}

impl TryFrom<PathBuf> for AbsPath {
    type Error = Report<PathError>;

    /// Convert a [`PathBuf`] to an absolute path.
    ///
    /// This will error if:
    /// - the path doesn't exist
    /// - the path cannot be made absolute for some reason
    fn try_from(p: PathBuf) -> Result<Self, PathError> {
        if !p.exists() {
            return Err(Report::new(PathError::from(&p)).attach_printable("path does not exist"));
        }
        let p_abs = p.canonicalize().into_report().map_err(|e| {
            e.change_context(PathError::from(&p))
                .attach_printable("cannot resolve path as absolute")
        })?;

        Ok(Self { p: p_abs })
    }
}

impl AbsPath {
    #[inline]
    pub fn as_path(&self) -> &Path {
        self.p.as_path()
    }

    /// Join a path relative to this one. The result is not checked for existence.
    #[inline]
    pub fn join<P>(&self, rel: P) -> PathBuf
    where
        P: AsRef<Path>,
    {
        self.p.join(rel)
    }

    /// Check if `other` resolves to this path or to something inside it
    pub fn contains<P>(&self, other: P) -> bool
    where
        P: AsRef<Path>,
    {
        match other.as_ref().canonicalize() {
            Ok(p) => p.starts_with(&self.p),
            Err(_) => false,
        }
    }
}

/// Resolve a path that may not exist yet.
///
/// The longest existing prefix is canonicalized and the rest is appended,
/// with `.` and `..` applied lexically.
pub fn resolve_lenient(p: &Path) -> Result<PathBuf, PathError> {
    let absolute = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()
            .into_report()
            .change_context_lazy(|| PathError::from(&p))
            .attach_printable("cannot get current directory")?
            .join(p)
    };
    for existing in absolute.ancestors() {
        let mut resolved = match existing.canonicalize() {
            Ok(resolved) => resolved,
            Err(_) => continue,
        };
        let rest = absolute.strip_prefix(existing).unwrap_or(Path::new(""));
        for component in rest.components() {
            match component {
                Component::ParentDir => {
                    resolved.pop();
                }
                Component::Normal(name) => resolved.push(name),
                _ => {}
            }
        }
        return Ok(resolved);
    }
    Err(Report::new(PathError::from(&p)).attach_printable("cannot resolve path as absolute"))
}

impl AsRef<Path> for AbsPath {
    #[inline]
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl std::fmt::Display for AbsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.p.display())
    }
}
