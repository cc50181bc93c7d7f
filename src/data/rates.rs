//! Per-second rate calculation between two snapshots.

use std::collections::BTreeMap;
use std::fmt;

use recwatch_types::{counters, CounterSnapshot, RateSample};

/// Why no rates could be derived from a pair of snapshots.
///
/// None of these fail the probe; the caller falls back to
/// [`RateSample::empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Degenerate {
    /// There is no previous snapshot to compare against.
    NoHistory,
    /// Both snapshots were taken in the same second.
    NoElapsedTime,
    /// The previous snapshot is newer than the current one.
    ClockSkew { elapsed: i64 },
    /// A counter went backwards, most likely because the resolver restarted.
    CounterReset {
        counter: String,
        previous: u64,
        current: u64,
    },
}

impl fmt::Display for Degenerate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degenerate::NoHistory => write!(f, "no previous measurement"),
            Degenerate::NoElapsedTime => write!(f, "no time elapsed since previous measurement"),
            Degenerate::ClockSkew { elapsed } => {
                write!(f, "previous measurement is {}s in the future", -elapsed)
            }
            Degenerate::CounterReset {
                counter,
                previous,
                current,
            } => write!(f, "counter {} went back from {} to {}", counter, previous, current),
        }
    }
}

/// Compute average per-second rates between two snapshots.
///
/// Only rate-eligible counters present in both snapshots are rated. If any
/// of them decreased, the whole window is discarded.
///
/// # Example
///
/// ```
/// use recwatch::data::compute_rates;
/// use recwatch_types::CounterSnapshot;
///
/// let previous = CounterSnapshot::watched([("questions", 40)], 1_000);
/// let current = CounterSnapshot::watched([("questions", 100)], 1_010);
///
/// let rates = compute_rates(&previous, &current).unwrap();
/// assert_eq!(rates.total_query_rate, 6.0);
/// ```
pub fn compute_rates(
    previous: &CounterSnapshot,
    current: &CounterSnapshot,
) -> Result<RateSample, Degenerate> {
    if previous.is_empty() {
        return Err(Degenerate::NoHistory);
    }

    let elapsed = current.timestamp - previous.timestamp;
    if elapsed == 0 {
        return Err(Degenerate::NoElapsedTime);
    }
    if elapsed < 0 {
        return Err(Degenerate::ClockSkew { elapsed });
    }

    let mut values = BTreeMap::new();
    let mut query_delta: u64 = 0;

    for &name in counters::RATE_ELIGIBLE {
        let (Some(before), Some(after)) = (previous.get(name), current.get(name)) else {
            continue;
        };
        if after < before {
            return Err(Degenerate::CounterReset {
                counter: name.to_string(),
                previous: before,
                current: after,
            });
        }

        let delta = after - before;
        values.insert(name.to_string(), delta as f64 / elapsed as f64);
        if counters::is_query_volume(name) {
            query_delta = query_delta.saturating_add(delta);
        }
    }

    Ok(RateSample {
        values,
        total_query_rate: query_delta as f64 / elapsed as f64,
        elapsed_secs: elapsed,
    })
}
