use crate::commands::{EXIT_NO_STATISTICS, ReportSettings};
use crate::presentation::renderer_for;
use anyhow::Result;
use is_terminal::IsTerminal;
use modtime_parser::TimingCollector;
use owo_colors::OwoColorize;
use std::io::Write;
use std::path::PathBuf;

/// Largest exit status reporting a number of errors.
const MAX_ERROR_STATUS: usize = 254;

/// Parses the logs and prints the report; returns the exit status.
pub fn handle(
    log_files: &[PathBuf],
    settings: &ReportSettings,
    out: &mut dyn Write,
) -> Result<i32> {
    let mut collector = TimingCollector::new(settings.parse);
    let outcome = collector.consume_paths(log_files)?;
    tracing::debug!(status = ?outcome.status, errors = outcome.errors, "input consumed");
    let timings = collector.finish();

    if timings.is_empty() {
        writeln!(out, "No time statistics found.")?;
        return Ok(EXIT_NO_STATISTICS);
    }

    renderer_for(settings.format).render(&timings, settings.mode, &settings.times, out)?;
    out.flush()?;

    if timings.errors > 0 {
        report_errors(timings.errors);
    }
    Ok(error_status(timings.errors))
}

fn report_errors(errors: usize) {
    let message = format!("{} errors were found in the input files.", errors);
    if std::io::stderr().is_terminal() {
        eprintln!("{}", message.yellow().bold());
    } else {
        eprintln!("{}", message);
    }
}

fn error_status(errors: usize) -> i32 {
    errors.min(MAX_ERROR_STATUS) as i32
}
