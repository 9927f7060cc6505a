// Error types
pub mod error;

// Line grammar
pub mod line;

// Input opening (plain, gzip, bzip2)
pub mod io;

// Log stream aggregation
pub mod collector;

pub use collector::{JobTimings, ParseOptions, StreamOutcome, StreamStatus, TimingCollector};
pub use error::{Error, FormatError, Result};
pub use io::{Compression, open_log};
pub use line::{LineKind, parse_event_line, parse_module_line, parse_timing_line};
