pub mod renderers;
pub mod table;
pub mod views;

pub use renderers::{CsvRenderer, JsonRenderer, PlainRenderer, ReportRenderer, renderer_for};
pub use table::{Align, CellFormat, RowSelector, Table};
pub use views::{ReportView, SeriesStatsView, SeriesTimesView, TableView};
