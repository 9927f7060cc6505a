use crate::error::FormatError;
use modtime_types::{EventKey, ModuleKey, TimingEntry};
use std::fmt;
use std::str::FromStr;

/// Kind of timing line, told apart by the leading literal token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// `TimeModule> run: 1 subRun: 0 event: 10 beziertrackercc BezierTrackerModule 0.231838`
    Module,
    /// `TimeEvent> run: 1 subRun: 0 event: 10 0.231838`
    Event,
}

impl LineKind {
    /// Recognizes a (trimmed) line as a timing line; other lines are inert.
    pub fn classify(line: &str) -> Option<Self> {
        [LineKind::Module, LineKind::Event]
            .into_iter()
            .find(|kind| line.starts_with(kind.prefix()))
    }

    /// Leading token of the line.
    pub fn literal(&self) -> &'static str {
        match self {
            LineKind::Module => "TimeModule>",
            LineKind::Event => "TimeEvent>",
        }
    }

    /// Prefix a line must start with to be classified as this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            LineKind::Module => "TimeModule> ",
            LineKind::Event => "TimeEvent> ",
        }
    }

    /// Number of whitespace separated tokens in a well-formed line.
    pub fn token_count(&self) -> usize {
        match self {
            LineKind::Module => 10,
            LineKind::Event => 8,
        }
    }

    pub fn parse(&self, line: &str) -> Result<TimingEntry, FormatError> {
        match self {
            LineKind::Module => parse_module_line(line),
            LineKind::Event => parse_event_line(line),
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineKind::Module => f.write_str("Module"),
            LineKind::Event => f.write_str("Event"),
        }
    }
}

/// Parses a line that is known to carry module timing.
pub fn parse_module_line(line: &str) -> Result<TimingEntry, FormatError> {
    let mut fields = Fields::new(line, LineKind::Module);
    let event_key = fields.event_key()?;
    let module = fields.module_key()?;
    let time = fields.number::<f64>(9, "time")?;
    fields.check_layout()?;
    Ok(TimingEntry::module_entry(event_key, module, time))
}

/// Parses a line that is known to carry whole-event timing.
pub fn parse_event_line(line: &str) -> Result<TimingEntry, FormatError> {
    let mut fields = Fields::new(line, LineKind::Event);
    let event_key = fields.event_key()?;
    let time = fields.number::<f64>(7, "time")?;
    fields.check_layout()?;
    Ok(TimingEntry::event_entry(event_key, time))
}

/// Classifies and parses a line; `None` for lines that carry no timing.
pub fn parse_timing_line(line: &str) -> Option<Result<TimingEntry, FormatError>> {
    LineKind::classify(line).map(|kind| kind.parse(line))
}

/// Tokens of a line being parsed, with the identification recovered so far.
struct Fields<'a> {
    line: &'a str,
    kind: LineKind,
    tokens: Vec<&'a str>,
    event: Option<EventKey>,
    module: Option<ModuleKey>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str, kind: LineKind) -> Self {
        Self {
            line,
            kind,
            tokens: line.split_whitespace().collect(),
            event: None,
            module: None,
        }
    }

    fn error(&self, reason: impl Into<String>) -> FormatError {
        FormatError {
            line: self.line.to_string(),
            kind: self.kind,
            event: self.event,
            module: self.module.clone(),
            reason: reason.into(),
        }
    }

    fn token(&self, position: usize, name: &str) -> Result<&'a str, FormatError> {
        self.tokens
            .get(position)
            .copied()
            .ok_or_else(|| self.error(format!("missing {} (token #{})", name, position)))
    }

    fn number<T: FromStr>(&self, position: usize, name: &str) -> Result<T, FormatError> {
        let token = self.token(position, name)?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid {} '{}'", name, token)))
    }

    fn event_key(&mut self) -> Result<EventKey, FormatError> {
        let key = EventKey::new(
            self.number(2, "run")?,
            self.number(4, "subRun")?,
            self.number(6, "event")?,
        );
        self.event = Some(key);
        Ok(key)
    }

    fn module_key(&mut self) -> Result<ModuleKey, FormatError> {
        let key = ModuleKey::new(self.token(7, "instance")?, self.token(8, "label")?);
        self.module = Some(key.clone());
        Ok(key)
    }

    /// Checks the literal tokens and the total token count.
    fn check_layout(&self) -> Result<(), FormatError> {
        let literals = [
            (0, self.kind.literal()),
            (1, "run:"),
            (3, "subRun:"),
            (5, "event:"),
        ];
        for (position, expected) in literals {
            let found = self.tokens.get(position).copied().unwrap_or_default();
            if found != expected {
                return Err(self.error(format!(
                    "expected '{}' at token #{}, found '{}'",
                    expected, position, found
                )));
            }
        }
        if self.tokens.len() != self.kind.token_count() {
            return Err(self.error(format!(
                "expected {} tokens, found {}",
                self.kind.token_count(),
                self.tokens.len()
            )));
        }
        Ok(())
    }
}
