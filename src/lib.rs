//! # verexport
//! Export a version-scoped snapshot of a project.
//!
//! Every configured root is copied from the project into a destination directory.
//! While copying, lines guarded by a version marker are kept or dropped:
//!
//! ```text
//! #if VERSION >= 3
//! only exported for version 3 and later
//! #endif // VERSION >= 3
//! ```
//!
//! # verexport as a library
//! Use [`Exporter::run`] with a [`Config`] to export a tree, or [`filter_text`]
//! and [`LineFilter`] to filter text directly.
//!
//! ```
//! let text = "a\n#if VERSION > 1\nb\n#endif VERSION\n";
//! assert_eq!("a\n", verexport::filter_text(text, 1).unwrap());
//! ```

mod core;
pub use crate::core::{
    export, filter_text, prompt_overwrite, Action, CmpOp, Config, ConfirmFn, ExportSummary,
    Exporter, Guard, LineFilter, Literal, Marker, Verbosity, DEFAULT_IGNORE, DEFAULT_ROOTS,
    VERSION_FILE,
};
pub mod error;
mod fs;
