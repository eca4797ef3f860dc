use crate::core::Config;
use crate::error::PathError;
use crate::fs::{AbsPath, Directory};
use error_stack::{IntoReport, Result, ResultExt};
use std::path::Path;

/// List a directory under the project root.
///
/// `rel` is relative to `base`, and so are the returned paths. Entries matching an ignore
/// pattern and directories resolving into `skip` (the destination, reachable through a
/// symlink) are left out. Anything that is neither a file nor a directory is left out as well.
pub fn scan_dir(
    base: &AbsPath,
    rel: &Path,
    config: &Config,
    skip: &AbsPath,
) -> Result<Directory, PathError> {
    let dir_path = base.join(rel);
    let entries = dir_path
        .read_dir()
        .into_report()
        .change_context_lazy(|| PathError::from(&dir_path))
        .attach_printable("failed to read directory")?;

    let mut directory = Directory::new();

    for entry in entries {
        let entry = entry
            .into_report()
            .change_context_lazy(|| PathError::from(&dir_path))
            .attach_printable("failed to read directory entry")?;
        let file_name = entry.file_name();
        if config.is_ignored(&file_name.to_string_lossy()) {
            log::debug!("ignoring {}", entry.path().display());
            continue;
        }
        let path = entry.path();

        if path.is_file() {
            directory.files.push(rel.join(&file_name));
        } else if path.is_dir() {
            if skip.contains(&path) {
                log::debug!("not exporting destination {} into itself", path.display());
                continue;
            }
            directory.subdirs.push(rel.join(&file_name));
        } else {
            log::debug!("skipping special file {}", path.display());
        }
    }

    directory.files.sort();
    directory.subdirs.sort();

    Ok(directory)
}
