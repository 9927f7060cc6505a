use super::args::Cli;
use super::handlers;
use crate::config::Config;
use crate::types::{OutputFormat, TableMode};
use anyhow::Result;
use modtime_engine::TimesRowOptions;
use modtime_parser::ParseOptions;

/// Exit status of a run stopped by an error.
pub const EXIT_FATAL: i32 = 1;

/// Exit status when the logs held no timing information at all.
pub const EXIT_NO_STATISTICS: i32 = 255;

/// How one report is produced, from the command line over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSettings {
    pub mode: TableMode,
    pub format: OutputFormat,
    pub parse: ParseOptions,
    pub times: TimesRowOptions,
}

impl ReportSettings {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let mode = cli.table_mode();
        // the event table is made of single entries
        let track_entries = match mode {
            TableMode::Events => true,
            TableMode::Modules => !cli.allow_duplicates && config.check_duplicates,
        };
        let max_events = cli
            .max_events
            .or(config.max_events)
            .and_then(|limit| usize::try_from(limit).ok());

        Self {
            mode,
            format: cli.format,
            parse: ParseOptions {
                permissive: cli.permissive || config.permissive,
                max_events,
                track_entries,
            },
            times: TimesRowOptions {
                max_events: cli.max_columns.or(config.max_columns),
                precision: cli.precision.unwrap_or(config.precision),
            },
        }
    }
}

/// Runs the command line; returns the process exit status.
pub fn run(cli: Cli) -> Result<i32> {
    let config = Config::load(cli.config.as_deref())?;
    let settings = ReportSettings::resolve(&cli, &config);
    tracing::debug!(?settings, "resolved report settings");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    handlers::report::handle(&cli.log_files, &settings, &mut out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings(args: &[&str], config: &Config) -> ReportSettings {
        let cli =
            Cli::try_parse_from(std::iter::once("modtime").chain(args.iter().copied())).unwrap();
        ReportSettings::resolve(&cli, config)
    }

    #[test]
    fn test_defaults() {
        let resolved = settings(&["job.log"], &Config::default());
        assert_eq!(resolved.mode, TableMode::Modules);
        assert_eq!(resolved.parse, ParseOptions::default());
        assert_eq!(resolved.times, TimesRowOptions::default());
    }

    #[test]
    fn test_negative_limit_means_unlimited() {
        let config = Config {
            max_events: Some(10),
            ..Config::default()
        };
        assert_eq!(settings(&["job.log"], &config).parse.max_events, Some(10));
        assert_eq!(
            settings(&["--maxevents", "-1", "job.log"], &config).parse.max_events,
            None
        );
    }

    #[test]
    fn test_event_table_forces_tracking() {
        let resolved = settings(&["-D", "--eventtable", "job.log"], &Config::default());
        assert!(resolved.parse.track_entries);

        let resolved = settings(&["-D", "job.log"], &Config::default());
        assert!(!resolved.parse.track_entries);
    }

    #[test]
    fn test_config_supplies_defaults() {
        let config = Config {
            permissive: true,
            check_duplicates: false,
            max_columns: Some(3),
            precision: 3,
            ..Config::default()
        };
        let resolved = settings(&["--precision", "4", "job.log"], &config);
        assert!(resolved.parse.permissive);
        assert!(!resolved.parse.track_entries);
        assert_eq!(resolved.times.max_events, Some(3));
        assert_eq!(resolved.times.precision, 4);
    }
}
