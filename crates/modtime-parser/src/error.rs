use crate::line::LineKind;
use modtime_types::{EventKey, ModuleKey};
use std::fmt;
use std::path::PathBuf;

/// Result type for modtime-parser operations
pub type Result<T> = std::result::Result<T, Error>;

/// A timing line that does not follow its grammar.
///
/// Carries whatever identification could be recovered before the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatError {
    pub line: String,
    pub kind: LineKind,
    pub event: Option<EventKey>,
    pub module: Option<ModuleKey>,
    pub reason: String,
}

impl FormatError {
    /// One-line diagnostic locating the error in its source.
    pub fn diagnostic(&self, source: &str, line_number: usize) -> String {
        let mut message = format!(
            "Format error on '{}'@{} ({})",
            source, line_number, self.kind
        );
        if let Some(event) = &self.event {
            message.push_str(&format!(", for event {}", event));
        }
        if let Some(module) = &self.module {
            message.push_str(&format!(", module {}", module));
        }
        message
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} format not recognized: '{}' ({})",
            self.kind.literal().trim_end_matches('>'),
            self.line,
            self.reason
        )
    }
}

impl std::error::Error for FormatError {}

/// Error types that can occur in the parser layer
#[derive(Debug)]
pub enum Error {
    /// Log file could not be opened
    Open { path: PathBuf, source: std::io::Error },

    /// Reading a log stream failed
    Io(std::io::Error),

    /// Malformed timing line (fatal unless parsing permissively)
    Format(FormatError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open { path, source } => {
                write!(f, "Cannot open '{}': {}", path.display(), source)
            }
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Format(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. } => Some(source),
            Error::Io(err) => Some(err),
            Error::Format(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<FormatError> for Error {
    fn from(err: FormatError) -> Self {
        Error::Format(err)
    }
}
