mod guard;
pub use guard::*;
mod filter;
pub use filter::*;

mod execute;
pub use execute::*;

mod util;
use util::Progress;
pub mod verbs;
