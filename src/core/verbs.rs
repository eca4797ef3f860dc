//! Status verbs printed by the progress reporter

pub const USING: &str = "Using";
pub const CREATING: &str = "Creating";
pub const REMOVING: &str = "Removing";
pub const EXPORTING: &str = "Exporting";
pub const SKIPPED: &str = "Skipped";
pub const WARNING: &str = "Warning";
pub const FAILED: &str = "Failed";
pub const DONE: &str = "Done";
