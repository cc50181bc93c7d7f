//! Fixed test data.
//!
//! Lets the whole pipeline run without a resolver: every counter is zero,
//! the security status is "running", and the previous snapshot is the same
//! data one second earlier.

use recwatch_types::{counters, CounterSnapshot};

/// Counters reported by [`FakeAdapter::new`].
const ZEROED: &[&str] = &[
    "nxdomain-answers",
    "noerror-answers",
    "servfail-answers",
    "recursing-questions",
    "recursing-answers",
    "answers-slow",
    "answers0-1",
    "answers1-10",
    "answers10-100",
    "answers100-1000",
    "over-capacity-drops",
    "policy-drops",
    "cache-hits",
    "cache-misses",
    "packetcache-hits",
    "packetcache-misses",
    counters::QA_LATENCY,
];

/// Adapter returning canned counters.
#[derive(Debug, Clone)]
pub struct FakeAdapter {
    counters: Vec<(String, u64)>,
}

impl FakeAdapter {
    /// The standard healthy data set.
    pub fn new() -> Self {
        let mut counters: Vec<(String, u64)> =
            ZEROED.iter().map(|name| (name.to_string(), 0)).collect();
        counters.push((counters::SECURITY_STATUS.to_string(), 1));
        Self { counters }
    }

    /// Serve arbitrary raw counters instead. Unwatched names are dropped on
    /// collection, as with a real resolver.
    pub fn from_counters<I, K>(counters: I) -> Self
    where
        I: IntoIterator<Item = (K, u64)>,
        K: Into<String>,
    {
        Self {
            counters: counters.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Collect the current snapshot, stamped now.
    pub fn collect(&self) -> CounterSnapshot {
        CounterSnapshot::watched(
            self.counters.iter().map(|(k, v)| (k.as_str(), *v)),
            recwatch_types::current_timestamp_secs(),
        )
    }

    /// Collect the current snapshot and a previous one a second older.
    pub fn collect_pair(&self) -> (CounterSnapshot, CounterSnapshot) {
        let current = self.collect();
        let previous = current.at(current.timestamp - 1);
        (previous, current)
    }
}

impl Default for FakeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_data_is_healthy_and_zeroed() {
        let snapshot = FakeAdapter::new().collect();

        assert_eq!(snapshot.security_status(), Some(1));
        assert_eq!(snapshot.len(), ZEROED.len() + 1);
        assert!(snapshot
            .iter()
            .filter(|(name, _)| name.as_str() != counters::SECURITY_STATUS)
            .all(|(_, value)| *value == 0));
    }

    #[test]
    fn test_pair_is_one_second_apart() {
        let (previous, current) = FakeAdapter::new().collect_pair();
        assert_eq!(current.timestamp - previous.timestamp, 1);
        assert_eq!(previous.values, current.values);
    }

    #[test]
    fn test_from_counters_drops_unwatched() {
        let snapshot = FakeAdapter::from_counters([("uptime", 5u64)]).collect();
        assert!(snapshot.is_empty());
    }
}
