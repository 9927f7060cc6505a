use crate::series::TimedSeries;
use modtime_types::{EventKey, ModuleKey};
use std::collections::HashMap;

/// Per-module timing series of a job, in order of first appearance.
///
/// Lookups never change the order; it is what keeps table rows stable from
/// one run to the next.
#[derive(Debug, Clone, Default)]
pub struct JobStats {
    track_entries: bool,
    modules: Vec<TimedSeries>,
    index: HashMap<ModuleKey, usize>,
}

impl JobStats {
    /// Creates an empty registry; new series track entries if `track_entries` is set.
    pub fn new(track_entries: bool) -> Self {
        Self {
            track_entries,
            ..Self::default()
        }
    }

    /// Returns the series for `key`, registering a new one at the end if needed.
    pub fn ensure(&mut self, key: &ModuleKey) -> &mut TimedSeries {
        let position = match self.index.get(key) {
            Some(&position) => position,
            None => {
                let position = self.modules.len();
                self.modules
                    .push(TimedSeries::new(key.clone(), self.track_entries));
                self.index.insert(key.clone(), position);
                position
            }
        };
        &mut self.modules[position]
    }

    pub fn by_index(&self, position: usize) -> Option<&TimedSeries> {
        self.modules.get(position)
    }

    pub fn by_key(&self, key: &ModuleKey) -> Option<&TimedSeries> {
        self.index.get(key).map(|&position| &self.modules[position])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimedSeries> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Largest number of timed events among the modules (0 if none).
    pub fn max_events(&self) -> usize {
        self.modules.iter().map(TimedSeries::n_events).max().unwrap_or(0)
    }

    /// Smallest number of timed events among the modules (0 if none).
    pub fn min_events(&self) -> usize {
        self.modules.iter().map(TimedSeries::n_events).min().unwrap_or(0)
    }

    /// Completes every module series against the same event sequence.
    pub fn complete_all(&mut self, event_keys: &[EventKey]) -> usize {
        self.modules
            .iter_mut()
            .map(|series| series.complete(event_keys))
            .sum()
    }
}

impl<'a> IntoIterator for &'a JobStats {
    type Item = &'a TimedSeries;
    type IntoIter = std::slice::Iter<'a, TimedSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modtime_types::TimingEntry;

    fn module(label: &str) -> ModuleKey {
        ModuleKey::new("inst", label)
    }

    #[test]
    fn test_ensure_keeps_first_seen_order() {
        let mut job = JobStats::new(false);
        job.ensure(&module("b"));
        job.ensure(&module("a"));
        job.ensure(&module("b"));
        job.ensure(&module("c"));

        let labels: Vec<String> = job.iter().map(|s| s.key().to_string()).collect();
        assert_eq!(labels, vec!["b[inst]", "a[inst]", "c[inst]"]);
        assert_eq!(job.len(), 3);
    }

    #[test]
    fn test_lookup_by_index_and_key() {
        let mut job = JobStats::new(false);
        job.ensure(&module("first"))
            .add(TimingEntry::module_entry(EventKey::new(1, 0, 1), module("first"), 0.5));
        job.ensure(&module("second"));

        assert_eq!(job.by_index(0).map(TimedSeries::n_events), Some(1));
        assert_eq!(job.by_key(&module("second")).map(TimedSeries::n_events), Some(0));
        assert!(job.by_index(2).is_none());
        assert!(job.by_key(&module("third")).is_none());
    }

    #[test]
    fn test_min_and_max_events() {
        let mut job = JobStats::new(false);
        assert_eq!(job.max_events(), 0);
        assert_eq!(job.min_events(), 0);

        for event in 1..=3 {
            let key = EventKey::new(1, 0, event);
            job.ensure(&module("busy"))
                .add(TimingEntry::module_entry(key, module("busy"), 0.1));
        }
        job.ensure(&module("idle"))
            .add(TimingEntry::module_entry(EventKey::new(1, 0, 1), module("idle"), 0.1));

        assert_eq!(job.max_events(), 3);
        assert_eq!(job.min_events(), 1);
    }

    #[test]
    fn test_new_series_inherit_tracking() {
        let mut job = JobStats::new(true);
        assert!(job.ensure(&module("a")).is_tracking());
        assert_eq!(job.complete_all(&[EventKey::new(1, 0, 1)]), 1);
        assert!(job.by_key(&module("a")).is_some_and(TimedSeries::has_empty_data));
    }
}
