//! Counter normalization.
//!
//! Both collectors hand back raw statistics in their own shape: `rec_control
//! get-all` prints `name value` lines, the HTTP API returns a JSON array of
//! typed records. This module turns either into a [`CounterSnapshot`] that
//! only contains watched counters, stamped with the current time.

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::warn;

use recwatch_types::CounterSnapshot;

/// Record type carrying a plain counter in the statistics API.
pub const STATISTIC_ITEM: &str = "StatisticItem";

/// One entry of the `/statistics` API response.
///
/// Only `StatisticItem` records carry a scalar value; map and ring records
/// carry arrays, hence the untyped `value`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatisticRecord {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
    pub value: Option<serde_json::Value>,
}

/// Normalize `rec_control get-all` output.
pub fn normalize_text(output: &str) -> CounterSnapshot {
    CounterSnapshot::watched(parse_text(output), current_timestamp())
}

/// Normalize the records returned by the statistics API.
pub fn normalize_records(records: &[StatisticRecord]) -> CounterSnapshot {
    CounterSnapshot::watched(parse_records(records), current_timestamp())
}

/// Parse every well-formed `name value` line, watched or not.
pub fn parse_text(output: &str) -> BTreeMap<String, u64> {
    output
        .lines()
        .filter_map(parse_line)
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Parse every `StatisticItem` record with an integer value, watched or not.
pub fn parse_records(records: &[StatisticRecord]) -> BTreeMap<String, u64> {
    let mut counters = BTreeMap::new();

    for record in records {
        let (Some(kind), Some(name), Some(value)) = (&record.kind, &record.name, &record.value)
        else {
            continue;
        };
        if kind != STATISTIC_ITEM {
            continue;
        }

        // The API sends counters as decimal strings
        let parsed = match value {
            serde_json::Value::String(s) => s.trim().parse::<u64>().ok(),
            serde_json::Value::Number(n) => n.as_u64(),
            _ => None,
        };

        match parsed {
            Some(v) => {
                counters.insert(name.clone(), v);
            }
            None => warn!(counter = %name, ?value, "skipping non-integer statistic"),
        }
    }

    counters
}

/// Match a single `^[a-z0-9-]+\s+\d+$` line.
fn parse_line(line: &str) -> Option<(&str, u64)> {
    let split = line.find(char::is_whitespace)?;
    let (name, rest) = line.split_at(split);
    let value = rest.trim_start();

    let name_ok = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    let value_ok = !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit());
    if !name_ok || !value_ok {
        return None;
    }

    value.parse().ok().map(|v| (name, v))
}

fn current_timestamp() -> i64 {
    recwatch_types::current_timestamp_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GET_ALL: &str = "\
all-outqueries\t1234
answers-slow\t17
answers0-1\t5512
cache-hits 900
cache-misses    311
questions\t8000
security-status\t1
qa-latency\t2412
Uptime\t55
nxdomain-answers\t-3
servfail-answers\t12abc
 noerror-answers\t7
policy-drops 2 extra
";

    #[test]
    fn test_parse_text_matches_only_well_formed_lines() {
        let counters = parse_text(GET_ALL);

        assert_eq!(counters.get("all-outqueries"), Some(&1234));
        assert_eq!(counters.get("cache-misses"), Some(&311));
        assert_eq!(counters.get("questions"), Some(&8000));
        // upper case, signs, junk and stray whitespace are rejected
        assert!(!counters.contains_key("Uptime"));
        assert!(!counters.contains_key("nxdomain-answers"));
        assert!(!counters.contains_key("servfail-answers"));
        assert!(!counters.contains_key("noerror-answers"));
        assert!(!counters.contains_key("policy-drops"));
    }

    #[test]
    fn test_normalize_text_keeps_watch_set() {
        let snapshot = normalize_text(GET_ALL);

        assert_eq!(snapshot.get("questions"), Some(8000));
        assert_eq!(snapshot.get("qa-latency"), Some(2412));
        assert_eq!(snapshot.security_status(), Some(1));
        assert_eq!(snapshot.get("all-outqueries"), None);
        assert_eq!(snapshot.len(), 7);
        assert!(snapshot.timestamp > 0);
    }

    #[test]
    fn test_normalize_text_is_idempotent() {
        let first = normalize_text(GET_ALL);
        let second = normalize_text(GET_ALL);
        assert_eq!(first.values, second.values);
    }

    #[test]
    fn test_oversized_value_is_skipped() {
        let counters = parse_text("questions 99999999999999999999999\ncache-hits 1\n");
        assert_eq!(counters.len(), 1);
        assert_eq!(counters.get("cache-hits"), Some(&1));
    }

    #[test]
    fn test_no_watched_counters_is_empty() {
        assert!(normalize_text("uptime 100\nsys-msec 5\n").is_empty());
        assert!(normalize_text("").is_empty());
    }

    #[test]
    fn test_normalize_records() {
        let records: Vec<StatisticRecord> = serde_json::from_str(
            r#"[
                {"name": "questions", "type": "StatisticItem", "value": "4321"},
                {"name": "cache-hits", "type": "StatisticItem", "value": 12},
                {"name": "security-status", "type": "StatisticItem", "value": "2"},
                {"name": "response-by-qtype", "type": "MapStatisticItem",
                 "value": [{"name": "A", "value": "5"}]},
                {"name": "cache-misses", "type": "StatisticItem", "value": "n/a"},
                {"name": "packetcache-hits", "value": "3"},
                {"name": "uptime", "type": "StatisticItem", "value": "600"}
            ]"#,
        )
        .unwrap();

        let snapshot = normalize_records(&records);

        assert_eq!(snapshot.get("questions"), Some(4321));
        assert_eq!(snapshot.get("cache-hits"), Some(12));
        assert_eq!(snapshot.security_status(), Some(2));
        assert_eq!(snapshot.get("cache-misses"), None);
        assert_eq!(snapshot.get("packetcache-hits"), None);
        assert_eq!(snapshot.len(), 3);
    }
}
