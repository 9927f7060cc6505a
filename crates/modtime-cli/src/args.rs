use crate::types::{LogLevel, OutputFormat, TableMode};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modtime")]
#[command(
    about = "Prints statistics of module timings from the Timing service output",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[arg(
        value_name = "LOG_FILE",
        required = true,
        help = "Log file to be parsed (.gz and .bz2 are decompressed)"
    )]
    pub log_files: Vec<PathBuf>,

    #[arg(long = "eventtable", help = "Print the time of each event instead of the statistics")]
    pub event_table: bool,

    #[arg(
        short = 'D',
        long = "allowduplicates",
        help = "Do not check for duplicate entries"
    )]
    pub allow_duplicates: bool,

    #[arg(
        long = "maxevents",
        allow_negative_numbers = true,
        help = "Limit the number of parsed events to this (negative: no limit)"
    )]
    pub max_events: Option<i64>,

    #[arg(long, help = "Treat input format errors as non-fatal")]
    pub permissive: bool,

    #[arg(long, help = "Print at most this many event columns in the event table")]
    pub max_columns: Option<usize>,

    #[arg(long, help = "Significant digits of the times in the event table")]
    pub precision: Option<usize>,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn")]
    pub log_level: LogLevel,

    #[arg(
        long,
        help = "Configuration file (default: $MODTIME_CONFIG, then the user config directory)"
    )]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn table_mode(&self) -> TableMode {
        if self.event_table {
            TableMode::Events
        } else {
            TableMode::Modules
        }
    }
}
