//! CLI command handlers, one per file.

mod dirs;
mod fetch;
mod serve;

pub use dirs::run_dirs;
pub use fetch::run_fetch;
pub use serve::run_serve;
