use super::table::{Align, CellFormat, RowSelector, Table};
use super::views::{ReportView, TableView};
use crate::types::{OutputFormat, TableMode};
use anyhow::Result;
use modtime_engine::TimesRowOptions;
use modtime_parser::JobTimings;
use std::io::Write;

/// Writes the collected timings in one output format.
pub trait ReportRenderer {
    fn render(
        &self,
        timings: &JobTimings,
        mode: TableMode,
        options: &TimesRowOptions,
        out: &mut dyn Write,
    ) -> Result<()>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Plain => Box::new(PlainRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
        OutputFormat::Csv => Box::new(CsvRenderer),
    }
}

/// Aligned text columns.
pub struct PlainRenderer;

impl PlainRenderer {
    pub fn table(view: &TableView) -> Table {
        let mut table = Table::new();
        if let Some(header) = &view.header {
            table.set_row_formats(
                RowSelector::line(0),
                vec![CellFormat::default(), CellFormat::aligned(Align::Center)],
            );
            table.add_row(header.iter().map(String::as_str));
        }
        table.add_rows(view.rows.iter().map(|row| row.iter().map(String::as_str)));
        table
    }
}

impl ReportRenderer for PlainRenderer {
    fn render(
        &self,
        timings: &JobTimings,
        mode: TableMode,
        options: &TimesRowOptions,
        out: &mut dyn Write,
    ) -> Result<()> {
        let view = TableView::build(timings, mode, options);
        for line in Self::table(&view).render() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(
        &self,
        timings: &JobTimings,
        mode: TableMode,
        options: &TimesRowOptions,
        out: &mut dyn Write,
    ) -> Result<()> {
        let report = ReportView::build(timings, mode, options);
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        Ok(())
    }
}

/// Same cells as the plain table; rows may differ in length.
pub struct CsvRenderer;

impl ReportRenderer for CsvRenderer {
    fn render(
        &self,
        timings: &JobTimings,
        mode: TableMode,
        options: &TimesRowOptions,
        out: &mut dyn Write,
    ) -> Result<()> {
        let view = TableView::build(timings, mode, options);
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);
        if let Some(header) = &view.header {
            writer.write_record(header)?;
        }
        for row in &view.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modtime_parser::{ParseOptions, TimingCollector};
    use modtime_testing::LogBuilder;

    fn sample() -> JobTimings {
        let log = LogBuilder::new()
            .module(1, "gen", "generator", 0.5)
            .module(1, "reco", "reconstruction", 1.5)
            .event(1, 2.0)
            .module(2, "gen", "generator", 0.25)
            .event(2, 0.75);
        let mut collector = TimingCollector::new(ParseOptions::default());
        collector.consume_lines("test.log", log.lines()).unwrap();
        collector.finish()
    }

    fn render(format: OutputFormat, mode: TableMode) -> String {
        let mut out = Vec::new();
        renderer_for(format)
            .render(&sample(), mode, &TimesRowOptions::default(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap().trim_end().to_string()
    }

    #[test]
    fn test_plain_event_table() {
        insta::assert_snapshot!(render(OutputFormat::Plain, TableMode::Events), @r"
        Module                0   1
        generator[gen]       0.5 0.25
        reconstruction[reco] 1.5 n/a
        === events ===       2   0.75
        ");
    }

    #[test]
    fn test_csv_event_table() {
        insta::assert_snapshot!(render(OutputFormat::Csv, TableMode::Events), @r"
        Module,0,1
        generator[gen],0.5,0.25
        reconstruction[reco],1.5,n/a
        === events ===,2,0.75
        ");
    }

    #[test]
    fn test_json_module_report() {
        let json: serde_json::Value =
            serde_json::from_str(&render(OutputFormat::Json, TableMode::Modules)).unwrap();
        assert_eq!(json["table"], "modules");
        assert_eq!(json["modules"][1]["name"], "reconstruction[reco]");
        assert_eq!(json["events"]["n"], 2);
        assert_eq!(json["errors"], 0);

        // accumulator sums sit next to the derived values
        let generator = &json["modules"][0];
        assert_eq!(generator["sum"], 0.75);
        assert_eq!(generator["sum_sq"], 0.3125);
        assert_eq!(generator["weights"], 2.0);
        assert_eq!(generator["min"], 0.25);
        assert_eq!(generator["mean"], 0.375);
        assert_eq!(generator["rms"], 0.125);
    }
}
