use serde::Serialize;
use std::fmt;

/// Event identifier: run, subrun and event numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EventKey {
    pub run: u32,
    pub sub_run: u32,
    pub event: u32,
}

impl EventKey {
    pub fn new(run: u32, sub_run: u32, event: u32) -> Self {
        Self {
            run,
            sub_run,
            event,
        }
    }
}

impl fmt::Display for EventKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {} subRun {} event {}",
            self.run, self.sub_run, self.event
        )
    }
}

/// Module identifier: instance name and module label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ModuleKey {
    pub instance: String,
    pub label: String,
}

impl ModuleKey {
    pub fn new(instance: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            label: label.into(),
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.label, self.instance)
    }
}

/// Name of a timed series: one module, or the whole-event series.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    Module(ModuleKey),
    Events,
}

impl From<ModuleKey> for SeriesKey {
    fn from(key: ModuleKey) -> Self {
        SeriesKey::Module(key)
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesKey::Module(key) => write!(f, "{}", key),
            SeriesKey::Events => f.write_str("=== events ==="),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_event_key_display() {
        let key = EventKey::new(1, 0, 10);
        assert_eq!(key.to_string(), "run 1 subRun 0 event 10");
    }

    #[test]
    fn test_module_key_display_puts_instance_in_brackets() {
        let key = ModuleKey::new("beziertrackercc", "BezierTrackerModule");
        assert_eq!(key.to_string(), "BezierTrackerModule[beziertrackercc]");
    }

    #[test]
    fn test_keys_compare_by_value() {
        let mut seen = HashSet::new();
        assert!(seen.insert(EventKey::new(1, 2, 3)));
        assert!(!seen.insert(EventKey::new(1, 2, 3)));
        assert!(seen.insert(EventKey::new(1, 2, 4)));

        assert_eq!(ModuleKey::new("a", "b"), ModuleKey::new("a", "b"));
        assert_ne!(ModuleKey::new("a", "b"), ModuleKey::new("b", "a"));
    }

    #[test]
    fn test_series_key_display() {
        assert_eq!(SeriesKey::Events.to_string(), "=== events ===");
        let module: SeriesKey = ModuleKey::new("inst", "label").into();
        assert_eq!(module.to_string(), "label[inst]");
    }
}
