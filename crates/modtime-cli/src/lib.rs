mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod presentation;
pub mod types;

pub use args::Cli;
pub use commands::{EXIT_FATAL, EXIT_NO_STATISTICS, run};
