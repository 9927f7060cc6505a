use crate::types::TableMode;
use modtime_engine::{Stats, TimedSeries, TimesRowOptions, stats_row, times_row};
use modtime_parser::JobTimings;
use serde::Serialize;

/// Text cells of a report, row by row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Statistics of each module in order of appearance, then of the events.
    pub fn modules(timings: &JobTimings) -> Self {
        let rows = timings
            .modules
            .iter()
            .map(stats_row)
            .chain(std::iter::once(stats_row(&timings.events)))
            .collect();
        Self { header: None, rows }
    }

    /// Time of each event, one row per module, then the event totals.
    pub fn events(timings: &JobTimings, options: &TimesRowOptions) -> Self {
        let header = std::iter::once("Module".to_string())
            .chain((0..event_columns(timings, options)).map(|event| event.to_string()))
            .collect();
        let rows = timings
            .modules
            .iter()
            .chain(std::iter::once(&timings.events))
            .map(|series| times_row(series, options))
            .collect();
        Self {
            header: Some(header),
            rows,
        }
    }

    pub fn build(timings: &JobTimings, mode: TableMode, options: &TimesRowOptions) -> Self {
        match mode {
            TableMode::Modules => Self::modules(timings),
            TableMode::Events => Self::events(timings, options),
        }
    }
}

fn event_columns(timings: &JobTimings, options: &TimesRowOptions) -> usize {
    let events = timings.modules.max_events();
    options.max_events.map_or(events, |limit| limit.min(events))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStatsView {
    pub name: String,
    /// Running sums as accumulated: `n`, `weights`, `sum`, `sum_sq`, `min`, `max`
    #[serde(flatten)]
    pub stats: Stats,
    pub mean: Option<f64>,
    pub rms: Option<f64>,
}

impl From<&TimedSeries> for SeriesStatsView {
    fn from(series: &TimedSeries) -> Self {
        let stats = series.stats();
        let timed = stats.n() > 0;
        Self {
            name: series.key().to_string(),
            stats: stats.clone(),
            mean: timed.then(|| stats.mean()),
            rms: timed.then(|| stats.rms()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesTimesView {
    pub name: String,
    /// `null` where the series has no time for the event
    pub times: Vec<Option<f64>>,
}

impl SeriesTimesView {
    fn new(series: &TimedSeries, limit: Option<usize>) -> Self {
        let entries = series.entries();
        let shown = limit.map_or(entries.len(), |limit| limit.min(entries.len()));
        Self {
            name: series.key().to_string(),
            times: entries.iter().take(shown).map(|entry| entry.time).collect(),
        }
    }
}

/// Structured report, with numbers left unformatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "table", rename_all = "snake_case")]
pub enum ReportView {
    Modules {
        modules: Vec<SeriesStatsView>,
        events: SeriesStatsView,
        errors: usize,
    },
    Events {
        modules: Vec<SeriesTimesView>,
        events: SeriesTimesView,
        errors: usize,
    },
}

impl ReportView {
    pub fn build(timings: &JobTimings, mode: TableMode, options: &TimesRowOptions) -> Self {
        match mode {
            TableMode::Modules => ReportView::Modules {
                modules: timings.modules.iter().map(SeriesStatsView::from).collect(),
                events: SeriesStatsView::from(&timings.events),
                errors: timings.errors,
            },
            TableMode::Events => ReportView::Events {
                modules: timings
                    .modules
                    .iter()
                    .map(|series| SeriesTimesView::new(series, options.max_events))
                    .collect(),
                events: SeriesTimesView::new(&timings.events, options.max_events),
                errors: timings.errors,
            },
        }
    }
}
