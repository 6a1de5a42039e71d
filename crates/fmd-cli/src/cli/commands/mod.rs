//! CLI command handlers, one file per command.

mod checksums;
mod completions;
mod validate;

pub use checksums::{run_checksums, run_checksums_in};
pub use completions::run_completions;
pub use validate::run_validate;
