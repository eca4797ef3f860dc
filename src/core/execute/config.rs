use crate::error::PathError;
use derivative::Derivative;
use error_stack::{Report, Result};
use glob_match::glob_match;
use std::io::{self, BufRead, Write};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Paths exported from the project root, in export order
pub const DEFAULT_ROOTS: [&str; 8] = [
    "CMakeLists.txt",
    "LICENSE",
    "local",
    "src",
    "README.md",
    "tests",
    ".gitignore",
    "assignments",
];

/// File name patterns that are never exported (editor swap and backup files)
pub const DEFAULT_IGNORE: [&str; 3] = ["*.swp", "*.swo", "*~"];

/// Name of the file recording the exported version in the destination
pub const VERSION_FILE: &str = ".version";

/// Callback deciding whether an existing destination may be overwritten
pub type ConfirmFn = Arc<dyn Fn(&Path) -> bool + Send + Sync>;

/// Config for running an export
///
/// Use this to configure the export when calling it from the library
/// # Example
/// ```no_run
/// use std::path::Path;
/// use std::sync::Arc;
/// use verexport::{Config, Exporter, Verbosity};
///
/// let mut cfg = Config::new(3, "export");
/// cfg.verbosity = Verbosity::Verbose;
/// // never overwrite an existing export
/// cfg.confirm = Arc::new(|_: &Path| false);
/// Exporter::run(cfg).unwrap();
/// ```
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct Config {
    /// Project root the roots are resolved against. This is usually the current directory.
    pub base_dir: PathBuf,
    /// Directory to export into
    pub destination: PathBuf,
    /// The version guards are evaluated against
    pub version: i64,
    /// Paths relative to `base_dir` to export
    pub roots: Vec<String>,
    /// Glob patterns of file names to skip, at any depth
    pub ignore: Vec<String>,
    /// The verbosity. See [`Verbosity`]
    pub verbosity: Verbosity,
    /// Asked when the destination already exists. Overwrites when it returns `true`
    #[derivative(Debug = "ignore")]
    pub confirm: ConfirmFn,
}

impl Default for Config {
    /// Get the default config.
    ///
    /// This means:
    /// - Exporting from the current directory into `export`
    /// - Version 0
    /// - The default roots and ignore patterns
    /// - Regular verbosity
    /// - Asking on stdin before overwriting
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            destination: PathBuf::from("export"),
            version: 0,
            roots: DEFAULT_ROOTS.iter().map(|s| s.to_string()).collect(),
            ignore: DEFAULT_IGNORE.iter().map(|s| s.to_string()).collect(),
            verbosity: Verbosity::Normal,
            confirm: Arc::new(prompt_overwrite),
        }
    }
}

impl Config {
    /// Default config exporting `version` into `destination`
    pub fn new<P>(version: i64, destination: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            version,
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// Check that every root is a plain relative path inside the project.
    ///
    /// Roots are removed from the destination when it is overwritten, so a root
    /// must name something and may not contain `..` or be absolute.
    pub fn validate(&self) -> Result<(), PathError> {
        for root in &self.roots {
            let path = Path::new(root);
            let plain = path
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
                && path.components().any(|c| matches!(c, Component::Normal(_)));
            if !plain {
                return Err(Report::new(PathError::from(&path)).attach_printable(format!(
                    "root `{root}` is not a relative path inside the project"
                )));
            }
        }
        Ok(())
    }

    /// Check if a file name matches one of the ignore patterns
    pub fn is_ignored(&self, file_name: &str) -> bool {
        self.ignore
            .iter()
            .any(|pattern| glob_match(pattern, file_name))
    }
}

/// The verbosity config options
#[derive(Debug, PartialEq, Clone)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

/// Ask on stdin whether `destination` may be overwritten.
///
/// Only `y` or `Y` counts as yes. EOF or a read error counts as no.
pub fn prompt_overwrite(destination: &Path) -> bool {
    print!(
        "{} already exists. Overwrite? (y/n) ",
        destination.display()
    );
    if io::stdout().flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => is_affirmative(&answer),
    }
}

fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

#[cfg(test)]
mod ut {
    use super::*;

    #[test]
    fn test_default_ignore() {
        let cfg = Config::default();
        assert!(cfg.is_ignored(".main.c.swp"));
        assert!(cfg.is_ignored("notes.swo"));
        assert!(cfg.is_ignored("README.md~"));
        assert!(!cfg.is_ignored("main.c"));
        assert!(!cfg.is_ignored("swp"));
    }

    #[test]
    fn test_custom_ignore() {
        let mut cfg = Config::default();
        cfg.ignore = vec!["build".to_string(), "*.o".to_string()];
        assert!(cfg.is_ignored("build"));
        assert!(cfg.is_ignored("main.o"));
        assert!(!cfg.is_ignored("builder"));
        assert!(!cfg.is_ignored("a.swp"));
    }

    #[test]
    fn test_new() {
        let cfg = Config::new(4, "out");
        assert_eq!(4, cfg.version);
        assert_eq!(PathBuf::from("out"), cfg.destination);
        assert_eq!(DEFAULT_ROOTS.len(), cfg.roots.len());
    }

    #[test]
    fn test_validate_roots() {
        let mut cfg = Config::default();
        assert!(cfg.validate().is_ok());
        cfg.roots = vec!["src/main.c".to_string(), "./tests".to_string()];
        assert!(cfg.validate().is_ok());
        for bad in ["../outside", "src/../..", "/etc", "", ".", "./"] {
            cfg.roots = vec!["src".to_string(), bad.to_string()];
            let err = cfg.validate().unwrap_err();
            assert_eq!(bad, err.current_context().path, "root `{bad}` was accepted");
        }
    }

    #[test]
    fn test_affirmative() {
        assert!(is_affirmative("y\n"));
        assert!(is_affirmative(" Y \r\n"));
        assert!(!is_affirmative("yes\n"));
        assert!(!is_affirmative("n\n"));
        assert!(!is_affirmative("\n"));
    }

    #[test]
    fn test_debug_skips_confirm() {
        let output = format!("{:?}", Config::default());
        assert!(output.contains("version: 0"));
        assert!(!output.contains("confirm"));
    }
}
