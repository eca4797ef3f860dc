use crate::error::{FileError, FileErrorKind};
use error_stack::{IntoReport, Report, Result, ResultExt};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Context for exporting one file.
///
/// This is an IO wrapper for reading lines from the input file and collecting the output.
/// Lines are read as raw bytes with their terminators, so files that are not UTF-8
/// pass through unchanged. The output is only written to disk by [`IOCtx::done`],
/// and only if it is not empty.
#[derive(Debug)]
pub struct IOCtx {
    /// Input reader
    input: BufReader<File>,
    /// Output buffer
    out: Vec<u8>,
    /// Path to the output file
    output_path: PathBuf,
    pub cur_line: usize,
    /// Input path for error messages
    pub input_path: String,
}

impl IOCtx {
    /// Create a new IO context reading `input_file` and writing `output_file`.
    ///
    /// `input_path` is how the input is named in errors.
    pub fn new(input_file: &Path, output_file: &Path, input_path: String) -> Result<Self, FileError> {
        let input = File::open(input_file)
            .map(BufReader::new)
            .into_report()
            .change_context_lazy(|| Self::make_error_with_kind(&input_path, FileErrorKind::OpenFile))
            .attach_printable_lazy(|| {
                format!("could not open input file: `{}`", input_file.display())
            })?;

        Ok(Self {
            input,
            out: vec![],
            output_path: output_file.to_path_buf(),
            cur_line: 0,
            input_path,
        })
    }

    /// Get the next line from the input file, including its line terminator.
    pub fn next_line(&mut self) -> Option<Result<Vec<u8>, FileError>> {
        let mut buf = vec![];
        match self.input.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.cur_line += 1;
                Some(Ok(buf))
            }
            Err(e) => Some(Err(Report::new(e)
                .change_context(make_error!(self, FileErrorKind::ReadFile))
                .attach_printable("cannot read next line"))),
        }
    }

    /// Append a line to the output
    pub fn write_output(&mut self, line: &[u8]) {
        self.out.extend_from_slice(line);
    }

    /// Finish.
    ///
    /// Writes the output file and returns `true`, or returns `false`
    /// without touching the file system if the output is empty.
    pub fn done(self) -> Result<bool, FileError> {
        if self.out.is_empty() {
            log::debug!("output of {} is empty, not writing", self.input_path);
            return Ok(false);
        }
        if let Some(parent) = self.output_path.parent() {
            fs::create_dir_all(parent)
                .into_report()
                .change_context_lazy(|| make_error!(self, FileErrorKind::WriteFile))
                .attach_printable_lazy(|| {
                    format!("could not create directory: `{}`", parent.display())
                })?;
        }
        fs::write(&self.output_path, &self.out)
            .into_report()
            .change_context_lazy(|| make_error!(self, FileErrorKind::WriteFile))
            .attach_printable_lazy(|| {
                format!("could not write output file: `{}`", self.output_path.display())
            })?;
        Ok(true)
    }

    pub fn make_error(&self, kind: FileErrorKind) -> FileError {
        make_error!(self, kind)
    }

    fn make_error_with_kind(file: &str, kind: FileErrorKind) -> FileError {
        FileError {
            kind,
            line: 0,
            file: file.to_string(),
        }
    }
}

/// Macro needed because of borrowing constraints.
macro_rules! make_error {
    ($self:ident, $kind:expr) => {
        FileError {
            kind: $kind,
            line: $self.cur_line,
            file: $self.input_path.clone(),
        }
    };
}
use make_error;
