//! The fixed counter whitelists.
//!
//! PowerDNS Recursor reports a few hundred statistics. The probe only looks
//! at the handful listed here; everything else is discarded during
//! normalization.

/// Counter holding the resolver's security-status code.
pub const SECURITY_STATUS: &str = "security-status";

/// Counter holding the average query/answer latency in microseconds.
pub const QA_LATENCY: &str = "qa-latency";

/// Counters summed into the headline queries-per-second figure.
pub const QUERY_VOLUME: &[&str] = &["questions"];

/// Counters that are meaningful as a per-second rate.
///
/// Always a superset of [`QUERY_VOLUME`].
pub const RATE_ELIGIBLE: &[&str] = &[
    "questions",
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
];

/// Scalar counters that are watched but passed through unchanged.
pub const SCALAR: &[&str] = &[QA_LATENCY, SECURITY_STATUS];

/// Returns true if the counter is part of the watch set.
pub fn is_watched(name: &str) -> bool {
    is_rate_eligible(name) || SCALAR.contains(&name)
}

/// Returns true if the counter should be averaged per second.
pub fn is_rate_eligible(name: &str) -> bool {
    RATE_ELIGIBLE.contains(&name)
}

/// Returns true if the counter contributes to the query rate.
pub fn is_query_volume(name: &str) -> bool {
    QUERY_VOLUME.contains(&name)
}
