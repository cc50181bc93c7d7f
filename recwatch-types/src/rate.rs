//! Per-second rates derived from two counter snapshots.

use alloc::collections::BTreeMap;
use alloc::string::String;

/// Average per-second rates over the window between two snapshots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateSample {
    /// Rate per rate-eligible counter, in units per second.
    pub values: BTreeMap<String, f64>,

    /// Sum of the query-volume counter deltas divided by the elapsed time.
    pub total_query_rate: f64,

    /// Seconds between the two snapshots. Zero for an empty sample.
    pub elapsed_secs: i64,
}

impl RateSample {
    /// The degenerate sample: no rates and a zero query rate.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check if no rates were computed.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get the rate for a specific counter.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Iterate over all rates in counter name order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.values.iter()
    }
}
