// Engine module - statistics over timing entries
// This layer sits between parsed entries (types) and CLI presentation

pub mod format;
pub mod job;
pub mod rows;
pub mod series;
pub mod stats;

pub use format::{DEFAULT_PRECISION, format_fixed, format_general};
pub use job::JobStats;
pub use rows::{NOT_AVAILABLE, TimesRowOptions, stats_row, times_row};
pub use series::TimedSeries;
pub use stats::{Stats, signed_sqrt};
