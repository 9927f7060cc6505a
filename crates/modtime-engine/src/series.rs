use crate::stats::Stats;
use modtime_types::{EventKey, SeriesKey, TimingEntry};
use std::collections::HashMap;

/// Insertion-ordered record of the entries of a series, one per event.
#[derive(Debug, Clone, Default)]
struct EntryLog {
    positions: HashMap<EventKey, usize>,
    keys: Vec<EventKey>,
    entries: Vec<TimingEntry>,
}

impl EntryLog {
    fn contains(&self, key: &EventKey) -> bool {
        self.positions.contains_key(key)
    }

    fn push(&mut self, entry: TimingEntry) {
        self.positions.insert(entry.event_key, self.entries.len());
        self.keys.push(entry.event_key);
        self.entries.push(entry);
    }

    fn get(&self, key: &EventKey) -> Option<&TimingEntry> {
        self.positions.get(key).map(|&position| &self.entries[position])
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Execution time statistics of one module, or of the whole event.
///
/// Optionally the series keeps track of every entry singly, in insertion
/// order, which enables duplicate detection and per-event output.
///
/// An event is added only once its timing is known. When entries are
/// tracked, [`TimedSeries::complete`] appends an empty entry for each event
/// the series has not heard about, so that all series agree on the event
/// sequence even when a module printed nothing for some event.
#[derive(Debug, Clone)]
pub struct TimedSeries {
    key: SeriesKey,
    stats: Stats,
    entries: Option<EntryLog>,
}

impl TimedSeries {
    pub fn new(key: impl Into<SeriesKey>, track_entries: bool) -> Self {
        Self {
            key: key.into(),
            stats: Stats::new(),
            entries: track_entries.then(EntryLog::default),
        }
    }

    /// Series for the whole-event timing.
    pub fn events(track_entries: bool) -> Self {
        Self::new(SeriesKey::Events, track_entries)
    }

    pub fn key(&self) -> &SeriesKey {
        &self.key
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn is_tracking(&self) -> bool {
        self.entries.is_some()
    }

    /// Adds an entry to the sample.
    ///
    /// When tracking, an entry for an event already recorded is ignored and
    /// `false` is returned. Entries without time are recorded but do not
    /// contribute to the statistics.
    pub fn add(&mut self, entry: TimingEntry) -> bool {
        let time = entry.time;
        if let Some(log) = &mut self.entries {
            if log.contains(&entry.event_key) {
                return false;
            }
            log.push(entry);
        }
        if let Some(time) = time {
            self.stats.add(time);
        }
        true
    }

    /// Makes sure an entry for each of `event_keys` is present.
    ///
    /// Unknown keys get an empty entry appended, in their relative order.
    /// Once more than one entry is recorded only the last key of `event_keys`
    /// is examined, so this must be called at every event boundary to keep
    /// earlier events from being skipped. Returns the number of entries added;
    /// always 0 when entries are not tracked.
    pub fn complete(&mut self, event_keys: &[EventKey]) -> usize {
        let Some(log) = &self.entries else {
            return 0;
        };
        let keys = if log.len() > 1 {
            event_keys.last().map(std::slice::from_ref).unwrap_or_default()
        } else {
            event_keys
        };
        keys.iter()
            .filter(|key| self.add(TimingEntry::missing(**key)))
            .count()
    }

    /// Known event keys in insertion order (empty if not tracking).
    pub fn event_keys(&self) -> &[EventKey] {
        self.entries
            .as_ref()
            .map(|log| log.keys.as_slice())
            .unwrap_or_default()
    }

    /// Recorded entries in insertion order (empty if not tracking).
    pub fn entries(&self) -> &[TimingEntry] {
        self.entries
            .as_ref()
            .map(|log| log.entries.as_slice())
            .unwrap_or_default()
    }

    /// Recorded entry for one event, if tracking.
    pub fn entry(&self, key: &EventKey) -> Option<&TimingEntry> {
        self.entries.as_ref().and_then(|log| log.get(key))
    }

    /// Number of recorded entries; the number of timed entries when not tracking.
    pub fn n_entries(&self) -> usize {
        match &self.entries {
            Some(log) => log.len(),
            None => self.stats.n(),
        }
    }

    /// Number of entries with timing information.
    pub fn n_events(&self) -> usize {
        self.stats.n()
    }

    pub fn has_empty_data(&self) -> bool {
        self.n_entries() > self.n_events()
    }
}
