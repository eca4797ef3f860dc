use crate::core::{verbs, Progress};
use crate::error::{DestinationError, ExportError, PathError};
use crate::fs::{resolve_lenient, AbsPath};
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};
use termcolor::Color;

mod config;
pub use config::*;

mod process;
use process::filter_file;
mod scan_dir;
use scan_dir::scan_dir;

/// Run an export with the given config
///
/// This is the main entry point. It takes a [`Config`] and runs the export.
/// If an error occurs, it will be printed to stderr and the function will return [`Err`].
///
/// If you want to retrieve the error object instead of printing it, use [`Exporter::run`].
pub fn export(config: Config) -> std::result::Result<ExportSummary, ()> {
    match Exporter::run(config) {
        Ok(summary) => Ok(summary),
        Err(e) => {
            eprintln!("{:?}", e);
            Err(())
        }
    }
}

/// What an export did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Number of files written to the destination
    pub written: usize,
    /// Number of files not written because nothing was left after filtering
    pub skipped: usize,
    /// Configured roots that do not exist in the project
    pub missing_roots: Vec<String>,
}

/// The runtime state when exporting
#[derive(Debug)]
pub struct Exporter {
    /// The Config
    config: Config,
    /// The project root
    base: AbsPath,
    /// The destination, after it is prepared
    destination: AbsPath,
    /// The Progress reporter
    progress: Progress,
    summary: ExportSummary,
}

impl Exporter {
    /// Internal run function
    ///
    /// This is what [`export`] calls internally. The difference is that this function
    /// returns the error instead of printing it.
    pub fn run(config: Config) -> Result<ExportSummary, ExportError> {
        log::info!("creating exporter");
        log::debug!("using config: {:?}", config);

        config.validate().map_err(|e| {
            e.change_context(ExportError)
                .attach_printable("invalid export roots")
        })?;
        let base = AbsPath::try_from(config.base_dir.clone()).map_err(|e| {
            e.change_context(ExportError)
                .attach_printable("cannot resolve project root")
        })?;

        let mut progress = Progress::new(config.verbosity.clone());
        let _ = progress.print_status(
            verbs::USING,
            &format!("version {}", config.version),
            Color::Yellow,
            false,
        );

        let destination = prepare_destination(&config, &base, &mut progress)?;

        Self {
            config,
            base,
            destination,
            progress,
            summary: ExportSummary::default(),
        }
        .run_internal()
    }

    fn run_internal(mut self) -> Result<ExportSummary, ExportError> {
        let roots = self.config.roots.clone();
        for root in &roots {
            self.export_root(root)?;
        }

        let version_file = self.destination.join(VERSION_FILE);
        log::info!("writing version file: {}", version_file.display());
        fs::write(&version_file, self.config.version.to_string())
            .into_report()
            .change_context_lazy(|| PathError::from(&version_file))
            .attach_printable("could not write version file")
            .change_context(ExportError)?;

        let _ = self.progress.print_status(
            verbs::DONE,
            &format!(
                "{} file(s) exported, {} empty after filtering",
                self.summary.written, self.summary.skipped
            ),
            Color::Green,
            false,
        );

        Ok(self.summary)
    }

    fn export_root(&mut self, root: &str) -> Result<(), ExportError> {
        let rel = PathBuf::from(root);
        if !self.base.join(&rel).exists() {
            log::warn!("cannot export {root}: does not exist");
            let _ = self.progress.print_status(
                verbs::WARNING,
                &format!("Cannot export {root}: does not exist"),
                Color::Yellow,
                false,
            );
            self.summary.missing_roots.push(root.to_string());
            return Ok(());
        }
        let ignored = rel
            .file_name()
            .map(|name| self.config.is_ignored(&name.to_string_lossy()))
            .unwrap_or(false);
        if ignored {
            log::debug!("ignoring root {root}");
            return Ok(());
        }

        if self.base.join(&rel).is_dir() {
            self.export_directory(&rel)
        } else {
            self.export_file(&rel)
        }
    }

    fn export_directory(&mut self, rel: &Path) -> Result<(), ExportError> {
        let target = self.destination.join(rel);
        let _ = self.progress.print_status(
            verbs::CREATING,
            &rel.display().to_string(),
            Color::Yellow,
            true,
        );
        fs::create_dir_all(&target)
            .into_report()
            .change_context_lazy(|| PathError::from(&target))
            .attach_printable("could not create directory")
            .change_context(ExportError)?;

        log::info!("scanning directory: {}", rel.display());
        let directory = scan_dir(&self.base, rel, &self.config, &self.destination)
            .map_err(|e| {
                self.fail();
                e.change_context(ExportError)
                    .attach_printable("cannot scan directory")
            })?;

        for file in directory.files {
            self.export_file(&file)?;
        }
        for dir in directory.subdirs {
            self.export_directory(&dir)?;
        }
        Ok(())
    }

    fn export_file(&mut self, rel: &Path) -> Result<(), ExportError> {
        let input_path = rel.display().to_string();
        let _ = self
            .progress
            .print_status(verbs::EXPORTING, &input_path, Color::Green, true);
        log::info!("exporting file: {input_path}");

        let written = filter_file(
            &self.base.join(rel),
            &self.destination.join(rel),
            input_path.clone(),
            self.config.version,
        )
        .map_err(|e| {
            self.fail();
            e.change_context(ExportError)
        })?;

        if written {
            self.summary.written += 1;
        } else {
            log::info!("file {input_path} is empty after filtering");
            self.summary.skipped += 1;
            let _ = self
                .progress
                .print_status(verbs::SKIPPED, &input_path, Color::Yellow, true);
        }
        Ok(())
    }

    fn fail(&mut self) {
        let _ = self
            .progress
            .print_status(verbs::FAILED, "", Color::Red, false);
    }
}

/// Make sure the destination exists and holds none of the configured roots.
///
/// An existing destination is only touched after `config.confirm` agrees,
/// and then only the configured roots inside it are removed.
fn prepare_destination(
    config: &Config,
    base: &AbsPath,
    progress: &mut Progress,
) -> Result<AbsPath, ExportError> {
    let destination = &config.destination;
    check_destination(config, base)?;
    if destination.exists() {
        if !destination.is_dir() {
            return Err(Report::new(PathError::from(destination))
                .attach_printable("destination is not a directory")
                .change_context(ExportError));
        }
        if !(config.confirm)(destination.as_path()) {
            log::info!("overwriting {} declined", destination.display());
            return Err(Report::new(DestinationError {
                path: destination.display().to_string(),
            })
            .change_context(ExportError));
        }
        for root in &config.roots {
            remove_existing(&destination.join(root), progress)
                .change_context(ExportError)?;
        }
    } else {
        let _ = progress.print_status(
            verbs::CREATING,
            &destination.display().to_string(),
            Color::Yellow,
            false,
        );
        fs::create_dir_all(destination)
            .into_report()
            .change_context_lazy(|| PathError::from(destination))
            .attach_printable("could not create destination")
            .change_context(ExportError)?;
    }

    AbsPath::try_from(destination.clone()).map_err(|e| {
        e.change_context(ExportError)
            .attach_printable("cannot resolve destination")
    })
}

/// Refuse a destination the export would read back from or that would
/// remove the project when overwritten.
fn check_destination(config: &Config, base: &AbsPath) -> Result<(), ExportError> {
    let destination = &config.destination;
    let refuse = |reason: String| {
        Report::new(PathError::from(destination))
            .attach_printable(reason)
            .change_context(ExportError)
    };
    let resolved = resolve_lenient(destination).map_err(|e| {
        e.change_context(ExportError)
            .attach_printable("cannot resolve destination")
    })?;
    log::debug!("destination resolves to {}", resolved.display());
    if resolved == base.as_path() {
        return Err(refuse("cannot export into the project root".to_string()));
    }
    for root in &config.roots {
        if let Ok(root_path) = base.join(root).canonicalize() {
            if resolved.starts_with(&root_path) {
                return Err(refuse(format!(
                    "destination is inside the exported root `{root}`"
                )));
            }
        }
        let target = resolve_lenient(&resolved.join(root)).map_err(|e| {
            e.change_context(ExportError)
                .attach_printable("cannot resolve destination")
        })?;
        if base.as_path().starts_with(&target) {
            return Err(refuse(format!(
                "overwriting `{root}` in the destination would remove the project"
            )));
        }
    }
    Ok(())
}

/// Remove a file or directory if it exists. Symlinks are removed, not followed.
fn remove_existing(path: &Path, progress: &mut Progress) -> Result<(), PathError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(_) => return Ok(()),
    };
    let _ = progress.print_status(
        verbs::REMOVING,
        &path.display().to_string(),
        Color::Yellow,
        true,
    );
    log::info!("removing {}", path.display());
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result
        .into_report()
        .change_context_lazy(|| PathError::from(&path))
        .attach_printable("could not remove previous export")
}
