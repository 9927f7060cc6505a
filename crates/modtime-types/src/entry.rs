use crate::key::{EventKey, ModuleKey};
use serde::Serialize;
use std::fmt;

/// Timing record for one event, either for a single module or for the whole event.
///
/// A `None` time means the information is missing (the event or module never
/// reported completion). The presence of `module` is what makes this a module
/// entry rather than an event entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimingEntry {
    pub event_key: EventKey,
    pub time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleKey>,
}

impl TimingEntry {
    pub fn module_entry(event_key: EventKey, module: ModuleKey, time: f64) -> Self {
        Self {
            event_key,
            time: Some(time),
            module: Some(module),
        }
    }

    pub fn event_entry(event_key: EventKey, time: f64) -> Self {
        Self {
            event_key,
            time: Some(time),
            module: None,
        }
    }

    /// Placeholder entry with no timing, used to back-fill missing events.
    pub fn missing(event_key: EventKey) -> Self {
        Self {
            event_key,
            time: None,
            module: None,
        }
    }

    pub fn is_module(&self) -> bool {
        self.module.is_some()
    }

    pub fn is_event(&self) -> bool {
        !self.is_module()
    }

    pub fn is_missing(&self) -> bool {
        self.time.is_none()
    }

    pub fn set_missing(&mut self) {
        self.time = None;
    }
}

impl fmt::Display for TimingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.event_key)?;
        match &self.module {
            Some(module) => write!(f, " module {}", module)?,
            None => f.write_str(" event")?,
        }
        match self.time {
            Some(time) => write!(f, ": {} s", time),
            None => f.write_str(": (n/a)"),
        }
    }
}
