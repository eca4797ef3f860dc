//! Wrapper to perform file system operations
//!

mod io_context;
pub use io_context::IOCtx;
mod path;
pub use path::*;
