//! CounterSnapshot - a point-in-time view of the resolver's counters.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::counters;

/// A point-in-time snapshot of the watched resolver counters.
///
/// This is the canonical shape every collector normalizes into. Only names
/// from the watch set ([`counters::is_watched`]) are ever inserted through
/// the constructors on this type.
///
/// # Example
///
/// ```rust
/// use recwatch_types::CounterSnapshot;
///
/// let snapshot = CounterSnapshot::watched(
///     [("questions", 40), ("cache-hits", 12), ("uptime", 3600)],
///     1_700_000_000,
/// );
///
/// assert_eq!(snapshot.get("questions"), Some(40));
/// assert_eq!(snapshot.get("uptime"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    /// Counter values keyed by counter name.
    pub values: BTreeMap<String, u64>,

    /// Unix timestamp in whole seconds when this snapshot was taken.
    pub timestamp: i64,
}

impl CounterSnapshot {
    /// Create an empty snapshot with a specific timestamp.
    pub fn with_timestamp(timestamp: i64) -> Self {
        Self {
            values: BTreeMap::new(),
            timestamp,
        }
    }

    /// Build a snapshot from raw counters, keeping only watched names.
    pub fn watched<I, K>(counters: I, timestamp: i64) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: AsRef<str> + Into<String>,
    {
        let values = counters
            .into_iter()
            .filter(|(name, _)| counters::is_watched(name.as_ref()))
            .map(|(name, value)| (name.into(), value))
            .collect();

        Self { values, timestamp }
    }

    /// Create a builder for constructing snapshots.
    pub fn builder() -> CounterSnapshotBuilder {
        CounterSnapshotBuilder::new()
    }

    /// Return a copy of this snapshot re-stamped with another timestamp.
    pub fn at(&self, timestamp: i64) -> Self {
        Self {
            values: self.values.clone(),
            timestamp,
        }
    }

    /// Check if the snapshot holds no counters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of counters in the snapshot.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Get the value of a specific counter.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.values.get(name).copied()
    }

    /// The resolver's security-status code, if it was reported.
    pub fn security_status(&self) -> Option<u64> {
        self.get(counters::SECURITY_STATUS)
    }

    /// Iterate over all counters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &u64)> {
        self.values.iter()
    }
}

/// Builder for constructing `CounterSnapshot` instances.
#[derive(Debug)]
pub struct CounterSnapshotBuilder {
    timestamp: Option<i64>,
    values: BTreeMap<String, u64>,
}

impl CounterSnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            timestamp: None,
            values: BTreeMap::new(),
        }
    }

    /// Set a specific timestamp (seconds since Unix epoch).
    pub fn timestamp(mut self, ts: i64) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Add a counter. Names outside the watch set are ignored.
    pub fn counter(mut self, name: impl Into<String>, value: u64) -> Self {
        let name = name.into();
        if counters::is_watched(&name) {
            self.values.insert(name, value);
        }
        self
    }

    /// Build the snapshot.
    #[cfg(feature = "std")]
    pub fn build(self) -> CounterSnapshot {
        CounterSnapshot {
            timestamp: self.timestamp.unwrap_or_else(current_timestamp_secs),
            values: self.values,
        }
    }

    /// Build the snapshot with a specific timestamp (for no_std).
    #[cfg(not(feature = "std"))]
    pub fn build(self) -> CounterSnapshot {
        CounterSnapshot {
            timestamp: self.timestamp.unwrap_or(0),
            values: self.values,
        }
    }
}

impl Default for CounterSnapshotBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Get current timestamp in whole seconds since Unix epoch.
#[cfg(feature = "std")]
pub fn current_timestamp_secs() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_filters_unwatched() {
        let snapshot = CounterSnapshot::builder()
            .timestamp(1_700_000_000)
            .counter("questions", 10)
            .counter("qa-latency", 250)
            .counter("sys-msec", 99)
            .build();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.timestamp, 1_700_000_000);
        assert_eq!(snapshot.get("qa-latency"), Some(250));
        assert_eq!(snapshot.get("sys-msec"), None);
    }

    #[test]
    fn test_zero_valued_counters_are_not_empty() {
        let snapshot = CounterSnapshot::watched([("questions", 0)], 1);
        assert!(!snapshot.is_empty());
        assert!(CounterSnapshot::watched([("uptime", 5)], 1).is_empty());
    }

    #[test]
    fn test_at_keeps_values() {
        let snapshot = CounterSnapshot::watched([("cache-hits", 3)], 100);
        let earlier = snapshot.at(99);
        assert_eq!(earlier.values, snapshot.values);
        assert_eq!(earlier.timestamp, 99);
    }

    #[test]
    fn test_security_status() {
        let snapshot = CounterSnapshot::watched([("security-status", 2)], 0);
        assert_eq!(snapshot.security_status(), Some(2));
        assert_eq!(CounterSnapshot::default().security_status(), None);
    }
}
