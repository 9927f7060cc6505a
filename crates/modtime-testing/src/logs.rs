//! Builders for timing log content.

use modtime_types::EventKey;

/// Fluent builder of log text, one line per call.
#[derive(Debug, Clone, Default)]
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Module timing line for run 1, subrun 0.
    pub fn module(self, event: u32, instance: &str, label: &str, time: f64) -> Self {
        self.module_at(EventKey::new(1, 0, event), instance, label, time)
    }

    pub fn module_at(self, key: EventKey, instance: &str, label: &str, time: f64) -> Self {
        self.line(format!(
            "TimeModule> run: {} subRun: {} event: {} {} {} {}",
            key.run, key.sub_run, key.event, instance, label, time
        ))
    }

    /// Event timing line for run 1, subrun 0.
    pub fn event(self, event: u32, time: f64) -> Self {
        self.event_at(EventKey::new(1, 0, event), time)
    }

    pub fn event_at(self, key: EventKey, time: f64) -> Self {
        self.line(format!(
            "TimeEvent> run: {} subRun: {} event: {} {}",
            key.run, key.sub_run, key.event, time
        ))
    }

    /// Any raw line (noise, malformed timing, ...).
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Log text with a trailing newline.
    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
