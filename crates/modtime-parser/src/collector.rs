use crate::io::open_log;
use crate::line::LineKind;
use crate::{Error, FormatError, Result};
use modtime_engine::{JobStats, TimedSeries};
use modtime_types::EventKey;
use std::io::BufRead;
use std::path::Path;

/// How log streams are consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Skip malformed timing lines instead of failing. Lines interrupted by
    /// other output are the usual culprit.
    pub permissive: bool,
    /// Stop once this many events have been timed (always the first ones).
    pub max_events: Option<usize>,
    /// Keep every entry singly; needed for duplicate checks and per-event output.
    pub track_entries: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            permissive: false,
            max_events: None,
            track_entries: true,
        }
    }
}

/// Whether more input should be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    Continue,
    /// The event limit was reached; further input, including further files, is skipped.
    StopEarly,
}

/// Result of consuming one or more streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamOutcome {
    pub status: StreamStatus,
    /// Format errors found (and skipped) while consuming.
    pub errors: usize,
}

/// Everything collected from the logs of a job.
#[derive(Debug, Clone)]
pub struct JobTimings {
    pub modules: JobStats,
    pub events: TimedSeries,
    pub errors: usize,
}

impl JobTimings {
    pub fn new(track_entries: bool) -> Self {
        Self {
            modules: JobStats::new(track_entries),
            events: TimedSeries::events(track_entries),
            errors: 0,
        }
    }

    /// True when no timing information at all was found.
    pub fn is_empty(&self) -> bool {
        self.modules.max_events() == 0 && self.events.n_entries() == 0
    }

    /// Makes sure `event` is known to the event series and to every module.
    fn complete_event(&mut self, event: EventKey) {
        self.events.complete(&[event]);
        self.modules.complete_all(self.events.event_keys());
    }
}

/// Per-stream reading state; it does not carry over to the next file.
#[derive(Debug, Default)]
struct StreamState {
    current_event: Option<EventKey>,
    last_line: Option<String>,
    errors: usize,
}

/// Collects module and event timing from log streams.
///
/// Statistics accumulate across all the streams consumed, in order. When the
/// event in the log changes, the event just finished is completed in every
/// series so that modules silent on that event get an empty entry for it.
#[derive(Debug)]
pub struct TimingCollector {
    options: ParseOptions,
    timings: JobTimings,
    stopped: bool,
}

impl TimingCollector {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            timings: JobTimings::new(options.track_entries),
            stopped: options.max_events == Some(0),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn timings(&self) -> &JobTimings {
        &self.timings
    }

    pub fn errors(&self) -> usize {
        self.timings.errors
    }

    /// True once the event limit was reached; nothing more will be read.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn finish(self) -> JobTimings {
        self.timings
    }

    /// Consumes log files in order, stopping early if the event limit is hit.
    pub fn consume_paths<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<StreamOutcome> {
        let mut outcome = StreamOutcome {
            status: self.status(),
            errors: 0,
        };
        for path in paths {
            if self.stopped {
                break;
            }
            let file_outcome = self.consume_path(path.as_ref())?;
            outcome.errors += file_outcome.errors;
            outcome.status = file_outcome.status;
        }
        Ok(outcome)
    }

    pub fn consume_path(&mut self, path: &Path) -> Result<StreamOutcome> {
        if self.stopped {
            return Ok(self.skipped());
        }
        tracing::debug!(path = %path.display(), "parsing log file");
        let reader = open_log(path)?;
        self.consume_reader(&path.display().to_string(), reader)
    }

    /// Consumes a byte stream; invalid UTF-8 is replaced rather than rejected.
    pub fn consume_reader<R: BufRead>(
        &mut self,
        source: &str,
        mut reader: R,
    ) -> Result<StreamOutcome> {
        if self.stopped {
            return Ok(self.skipped());
        }
        let mut state = StreamState::default();
        let mut buffer = Vec::new();
        let mut line_number = 0;
        loop {
            buffer.clear();
            if reader.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            line_number += 1;
            let line = String::from_utf8_lossy(&buffer);
            let status = self.process_line(&mut state, source, line_number, &line)?;
            if status == StreamStatus::StopEarly {
                return Ok(self.stop(state));
            }
        }
        Ok(self.end_of_stream(state))
    }

    /// Consumes lines already split (line terminators optional).
    pub fn consume_lines<I, S>(&mut self, source: &str, lines: I) -> Result<StreamOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.stopped {
            return Ok(self.skipped());
        }
        let mut state = StreamState::default();
        for (index, line) in lines.into_iter().enumerate() {
            let status = self.process_line(&mut state, source, index + 1, line.as_ref())?;
            if status == StreamStatus::StopEarly {
                return Ok(self.stop(state));
            }
        }
        Ok(self.end_of_stream(state))
    }

    fn process_line(
        &mut self,
        state: &mut StreamState,
        source: &str,
        line_number: usize,
        raw: &str,
    ) -> Result<StreamStatus> {
        let line = raw.trim();
        // the same line twice in a row is repeated output, not a new measurement
        if state.last_line.as_deref() == Some(line) {
            return Ok(StreamStatus::Continue);
        }
        state.last_line = Some(line.to_string());

        let Some(kind) = LineKind::classify(line) else {
            return Ok(StreamStatus::Continue);
        };
        let entry = match kind.parse(line) {
            Ok(entry) => entry,
            Err(err) => return self.format_error(state, source, line_number, err),
        };

        let event_key = entry.event_key;
        match entry.module.clone() {
            Some(module) => {
                self.timings.modules.ensure(&module).add(entry);
            }
            None => {
                self.timings.events.add(entry);
                if let Some(max_events) = self.options.max_events
                    && self.timings.events.n_events() >= max_events
                {
                    if let Some(current) = state.current_event {
                        self.timings.complete_event(current);
                    }
                    tracing::info!(
                        max_events,
                        "event limit reached, skipping the rest of the input"
                    );
                    return Ok(StreamStatus::StopEarly);
                }
            }
        }

        if state.current_event != Some(event_key) {
            if let Some(current) = state.current_event {
                self.timings.complete_event(current);
            }
            state.current_event = Some(event_key);
        }
        Ok(StreamStatus::Continue)
    }

    fn format_error(
        &mut self,
        state: &mut StreamState,
        source: &str,
        line_number: usize,
        err: FormatError,
    ) -> Result<StreamStatus> {
        self.timings.errors += 1;
        state.errors += 1;
        tracing::warn!("{}", err.diagnostic(source, line_number));
        if self.options.permissive {
            Ok(StreamStatus::Continue)
        } else {
            Err(Error::Format(err))
        }
    }

    fn end_of_stream(&mut self, state: StreamState) -> StreamOutcome {
        if let Some(current) = state.current_event {
            self.timings.complete_event(current);
        }
        StreamOutcome {
            status: StreamStatus::Continue,
            errors: state.errors,
        }
    }

    fn stop(&mut self, state: StreamState) -> StreamOutcome {
        self.stopped = true;
        StreamOutcome {
            status: StreamStatus::StopEarly,
            errors: state.errors,
        }
    }

    fn status(&self) -> StreamStatus {
        if self.stopped {
            StreamStatus::StopEarly
        } else {
            StreamStatus::Continue
        }
    }

    fn skipped(&self) -> StreamOutcome {
        StreamOutcome {
            status: self.status(),
            errors: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modtime_types::ModuleKey;

    fn collect(options: ParseOptions, lines: &[&str]) -> (StreamOutcome, JobTimings) {
        let mut collector = TimingCollector::new(options);
        let outcome = collector.consume_lines("test.log", lines).unwrap();
        (outcome, collector.finish())
    }

    #[test]
    fn test_duplicate_consecutive_lines_are_skipped() {
        let options = ParseOptions {
            track_entries: false,
            ..ParseOptions::default()
        };
        let (_, timings) = collect(
            options,
            &[
                "TimeModule> run: 1 subRun: 0 event: 1 inst label 0.5",
                "  TimeModule> run: 1 subRun: 0 event: 1 inst label 0.5  ",
                "TimeEvent> run: 1 subRun: 0 event: 1 0.6",
            ],
        );
        let module = timings.modules.by_key(&ModuleKey::new("inst", "label")).unwrap();
        assert_eq!(module.n_events(), 1);
    }

    #[test]
    fn test_other_lines_are_ignored() {
        let (outcome, timings) = collect(
            ParseOptions::default(),
            &[
                "%MSG-i Timing: art::EventProcessor",
                "",
                "TimeEvent> run: 1 subRun: 0 event: 1 0.6",
                "TimeEventually something else",
            ],
        );
        assert_eq!(outcome.errors, 0);
        assert_eq!(timings.events.n_events(), 1);
        assert!(timings.modules.is_empty());
    }

    #[test]
    fn test_strict_mode_fails_on_format_error() {
        let mut collector = TimingCollector::new(ParseOptions::default());
        let result = collector.consume_lines(
            "test.log",
            [
                "TimeEvent> run: 1 subRun: 0 event: 1 0.6",
                "TimeEvent> run: 1 subRun: 0 event: 2",
            ],
        );
        assert!(matches!(result, Err(Error::Format(ref err)) if err.kind == LineKind::Event));
        assert_eq!(collector.errors(), 1);
    }

    #[test]
    fn test_zero_event_limit_reads_nothing() {
        let options = ParseOptions {
            max_events: Some(0),
            ..ParseOptions::default()
        };
        let (outcome, timings) = collect(options, &["TimeEvent> run: 1 subRun: 0 event: 1 0.6"]);
        assert_eq!(outcome.status, StreamStatus::StopEarly);
        assert!(timings.is_empty());
    }

    #[test]
    fn test_event_without_modules_is_not_empty() {
        let (_, timings) = collect(
            ParseOptions::default(),
            &["TimeEvent> run: 1 subRun: 0 event: 1 0.6"],
        );
        assert!(!timings.is_empty());
    }

    #[test]
    fn test_state_resets_between_streams() {
        let mut collector = TimingCollector::new(ParseOptions::default());
        let line = "TimeEvent> run: 1 subRun: 0 event: 1 0.6";
        collector.consume_lines("first.log", [line]).unwrap();
        // not a consecutive duplicate: it is the first line of a new stream, but
        // the event is already recorded so the tracked series ignores it
        collector.consume_lines("second.log", [line]).unwrap();
        assert_eq!(collector.timings().events.n_entries(), 1);
        assert_eq!(collector.timings().events.n_events(), 1);
    }
}
