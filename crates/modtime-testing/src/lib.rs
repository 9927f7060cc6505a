//! Testing infrastructure for modtime tests.
//!
//! - `logs`: Builders for timing log content
//! - `fixtures`: Log files (plain or compressed) in temporary directories

pub mod fixtures;
pub mod logs;

pub use fixtures::LogDir;
pub use logs::LogBuilder;
