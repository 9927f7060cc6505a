use crate::format::{DEFAULT_PRECISION, format_fixed, format_general};
use crate::series::TimedSeries;

/// Placeholder for values that are not available.
pub const NOT_AVAILABLE: &str = "n/a";

/// Summary of a series as table cells.
///
/// The cells are: name, average time, relative RMS in percent, total time,
/// number of timed events and the timing extrema. A series without timing
/// (or with zero total time) gives `[name, "n/a"]`.
pub fn stats_row(series: &TimedSeries) -> Vec<String> {
    let name = series.key().to_string();
    let stats = series.stats();
    if stats.n() == 0 || stats.sum() == 0.0 {
        return vec![name, NOT_AVAILABLE.to_string()];
    }

    let g = |value: f64| format_general(value, DEFAULT_PRECISION);
    let mean = stats.mean();
    let relative_rms = stats.rms() / mean * 100.0;
    let extreme = |value: Option<f64>| value.map(g).unwrap_or_else(|| NOT_AVAILABLE.to_string());

    vec![
        name,
        format!("{}\"", g(mean)),
        format!("(RMS {}%)", format_fixed(relative_rms, 4, 1)),
        format!("total {}\"", g(stats.sum())),
        format!("({} events:", stats.n()),
        extreme(stats.min()),
        format!("- {})", extreme(stats.max())),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimesRowOptions {
    /// Render at most this many events (all when `None`).
    pub max_events: Option<usize>,
    /// Significant digits of each time.
    pub precision: usize,
}

impl Default for TimesRowOptions {
    fn default() -> Self {
        Self {
            max_events: None,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// The time of each recorded event as table cells, after the series name.
///
/// Events without timing are shown as `n/a`. Series that do not track
/// entries have no per-event cells.
pub fn times_row(series: &TimedSeries, options: &TimesRowOptions) -> Vec<String> {
    let entries = series.entries();
    let shown = options
        .max_events
        .map_or(entries.len(), |limit| limit.min(entries.len()));

    std::iter::once(series.key().to_string())
        .chain(entries.iter().take(shown).map(|entry| match entry.time {
            Some(time) => format_general(time, options.precision),
            None => NOT_AVAILABLE.to_string(),
        }))
        .collect()
}
