//! Wrapper around Path objects provided by the standard library
//!
//! In the program, we use a few types of paths
//! - The project root, resolved once and shared by every root being exported
//! - Paths relative to the project root, which are mirrored under the destination
//! - The destination given by the user, which may not exist yet
//!
//! Relative paths stay as [`PathBuf`](std::path::PathBuf) since they are joined
//! onto both the project root and the destination.

mod abs_path;
pub use abs_path::*;
mod directory;
pub use directory::*;
