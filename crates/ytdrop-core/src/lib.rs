pub mod config;
pub mod logging;

pub mod invoker;
pub mod listing;
pub mod subdir;
