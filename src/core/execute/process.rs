use crate::core::{Action, LineFilter};
use crate::error::{FileError, FileErrorKind};
use crate::fs::IOCtx;
use error_stack::{Report, Result};
use std::path::Path;

/// Filter one file into the destination
///
/// # Arguments
/// input_file: The file to read
/// output_file: Where the filtered content goes
/// input_path: How the file is named in errors
/// version: The version to evaluate guards against
///
/// # Returns
/// `true` if the output file was written, `false` if everything was filtered out
pub fn filter_file(
    input_file: &Path,
    output_file: &Path,
    input_path: String,
    version: i64,
) -> Result<bool, FileError> {
    let mut context = IOCtx::new(input_file, output_file, input_path)?;
    let mut filter = LineFilter::new(version);

    while let Some(line) = context.next_line() {
        let line = line?;
        // classify on the lossy text, but copy the original bytes
        let action = filter
            .feed(&String::from_utf8_lossy(&line))
            .map_err(|e| Report::new(e).change_context(context.make_error(FileErrorKind::Filter)))?;
        if action == Action::Emit {
            context.write_output(&line);
        }
    }

    filter
        .finish()
        .map_err(|e| Report::new(e).change_context(context.make_error(FileErrorKind::Filter)))?;

    context.done()
}
