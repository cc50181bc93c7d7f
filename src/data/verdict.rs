//! Severity judgments and the final verdict.
//!
//! Each check produces a candidate [`Severity`]; the candidates are folded
//! left to right with [`Severity::escalate`], starting from UNKNOWN.

use recwatch_types::{CounterSnapshot, Metric, RateSample, Severity, Verdict};

/// Query-rate thresholds in queries per second.
///
/// Zero disables a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thresholds {
    /// Query rate at or above which the probe warns.
    pub warning: u64,
    /// Query rate at or above which the probe is critical.
    pub critical: u64,
}

impl Thresholds {
    /// Candidates for a query rate: the warning check, then the critical
    /// check. Disabled or unmet thresholds yield UNKNOWN, which changes
    /// nothing when folded.
    pub fn judge(&self, rate: f64) -> [Severity; 2] {
        let check = |threshold: u64, severity: Severity| {
            if threshold > 0 && rate >= threshold as f64 {
                severity
            } else {
                Severity::Unknown
            }
        };

        [
            check(self.warning, Severity::Warning),
            check(self.critical, Severity::Critical),
        ]
    }
}

/// The resolver's own view of its security status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecurityStatus {
    /// Code 0: the status lookup itself failed.
    ResolutionFailure,
    /// Code 1: running a supported release.
    Running,
    /// Code 2: an upgrade is recommended.
    UpgradeRecommended,
    /// Code 3: the release has known vulnerabilities.
    UpgradeMandatory,
    Unexpected(u64),
}

impl SecurityStatus {
    pub fn from_code(code: u64) -> Self {
        match code {
            0 => SecurityStatus::ResolutionFailure,
            1 => SecurityStatus::Running,
            2 => SecurityStatus::UpgradeRecommended,
            3 => SecurityStatus::UpgradeMandatory,
            other => SecurityStatus::Unexpected(other),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            SecurityStatus::Running => Severity::Ok,
            SecurityStatus::UpgradeRecommended => Severity::Warning,
            SecurityStatus::ResolutionFailure
            | SecurityStatus::UpgradeMandatory
            | SecurityStatus::Unexpected(_) => Severity::Critical,
        }
    }

    pub fn description(&self) -> String {
        match self {
            SecurityStatus::ResolutionFailure => "NXDOMAIN or resolution failure.".to_string(),
            SecurityStatus::Running => "PowerDNS running.".to_string(),
            SecurityStatus::UpgradeRecommended => "PowerDNS upgrade recommended.".to_string(),
            SecurityStatus::UpgradeMandatory => "PowerDNS upgrade mandatory.".to_string(),
            SecurityStatus::Unexpected(code) => {
                format!("PowerDNS unexpected security-status {}.", code)
            }
        }
    }
}

/// Fold candidate severities in order, starting from UNKNOWN.
pub fn aggregate<I>(candidates: I) -> Severity
where
    I: IntoIterator<Item = Severity>,
{
    candidates
        .into_iter()
        .fold(Severity::Unknown, Severity::escalate)
}

/// What to judge and what to report.
#[derive(Debug, Clone, Default)]
pub struct Policy {
    pub thresholds: Thresholds,
    /// Ignore the security-status counter.
    pub skip_security: bool,
    /// Attach per-counter rates as performance data.
    pub perfdata: bool,
}

/// Judge a collected snapshot and its rates.
///
/// Candidates are applied in a fixed order: security status, warning
/// threshold, critical threshold, and finally an unconditional OK.
pub fn assess(current: &CounterSnapshot, rates: &RateSample, policy: &Policy) -> Verdict {
    let security = current
        .security_status()
        .filter(|_| !policy.skip_security)
        .map(SecurityStatus::from_code);

    let mut candidates = Vec::with_capacity(4);
    if let Some(status) = &security {
        candidates.push(status.severity());
    }
    candidates.extend(policy.thresholds.judge(rates.total_query_rate));
    candidates.push(Severity::Ok);

    let phrase = security.map(|s| s.description()).unwrap_or_default();
    let message = format!("{} Queries: {}/s.", phrase, rates.total_query_rate as i64);

    let metrics = if policy.perfdata {
        metrics(rates, &policy.thresholds)
    } else {
        Vec::new()
    };

    Verdict::new(aggregate(candidates), message).with_metrics(metrics)
}

/// Every rated counter, by name, paired with the query-rate thresholds.
// TODO: per-counter thresholds; the query-rate ones are misleading for cache and answer counters
fn metrics(rates: &RateSample, thresholds: &Thresholds) -> Vec<Metric> {
    rates
        .iter()
        .map(|(name, value)| Metric {
            name: name.clone(),
            value: *value,
            warning: thresholds.warning,
            critical: thresholds.critical,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::compute_rates;

    fn policy(warning: u64, critical: u64) -> Policy {
        Policy {
            thresholds: Thresholds { warning, critical },
            ..Default::default()
        }
    }

    fn with_security(code: u64) -> CounterSnapshot {
        CounterSnapshot::watched([("security-status", code)], 0)
    }

    #[test]
    fn test_security_codes() {
        let cases = [
            (1, Severity::Ok, "PowerDNS running. Queries: 0/s."),
            (0, Severity::Critical, "NXDOMAIN or resolution failure. Queries: 0/s."),
            (2, Severity::Warning, "PowerDNS upgrade recommended. Queries: 0/s."),
            (3, Severity::Critical, "PowerDNS upgrade mandatory. Queries: 0/s."),
            (7, Severity::Critical, "PowerDNS unexpected security-status 7. Queries: 0/s."),
        ];

        for (code, severity, message) in cases {
            let verdict = assess(&with_security(code), &RateSample::empty(), &policy(0, 0));
            assert_eq!(verdict.severity, severity, "code {}", code);
            assert_eq!(verdict.message, message);
        }
    }

    #[test]
    fn test_skip_security() {
        let verdict = assess(
            &with_security(3),
            &RateSample::empty(),
            &Policy {
                skip_security: true,
                ..Default::default()
            },
        );
        assert_eq!(verdict.severity, Severity::Ok);
        assert_eq!(verdict.message, " Queries: 0/s.");
    }

    #[test]
    fn test_warning_threshold() {
        let previous = CounterSnapshot::watched([("questions", 40)], 990);
        let current = CounterSnapshot::watched([("questions", 100)], 1_000);
        let rates = compute_rates(&previous, &current).unwrap();

        let verdict = assess(&current, &rates, &policy(5, 0));
        assert_eq!(verdict.severity, Severity::Warning);
        assert_eq!(verdict.message, " Queries: 6/s.");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let rates = RateSample {
            total_query_rate: 10.0,
            ..Default::default()
        };
        let current = CounterSnapshot::default();

        assert_eq!(assess(&current, &rates, &policy(10, 0)).severity, Severity::Warning);
        assert_eq!(assess(&current, &rates, &policy(5, 10)).severity, Severity::Critical);
        assert_eq!(assess(&current, &rates, &policy(11, 20)).severity, Severity::Ok);
    }

    #[test]
    fn test_disabled_thresholds_never_fire() {
        let rates = RateSample {
            total_query_rate: 1e9,
            ..Default::default()
        };
        assert_eq!(
            assess(&CounterSnapshot::default(), &rates, &policy(0, 0)).severity,
            Severity::Ok
        );
    }

    #[test]
    fn test_security_warning_survives_trailing_ok() {
        let verdict = assess(&with_security(2), &RateSample::empty(), &policy(100, 200));
        assert_eq!(verdict.severity, Severity::Warning);
    }

    #[test]
    fn test_security_critical_is_not_softened_by_rate() {
        let rates = RateSample {
            total_query_rate: 50.0,
            ..Default::default()
        };
        let verdict = assess(&with_security(0), &rates, &policy(10, 0));
        assert_eq!(verdict.severity, Severity::Critical);
    }

    #[test]
    fn test_query_rate_is_truncated_in_message() {
        let rates = RateSample {
            total_query_rate: 6.99,
            ..Default::default()
        };
        let verdict = assess(&with_security(1), &rates, &policy(0, 0));
        assert_eq!(verdict.message, "PowerDNS running. Queries: 6/s.");
    }

    #[test]
    fn test_metrics_sorted_with_global_thresholds() {
        let previous = CounterSnapshot::watched(
            [("questions", 0), ("cache-misses", 0), ("answers0-1", 0)],
            0,
        );
        let current = CounterSnapshot::watched(
            [("questions", 20), ("cache-misses", 4), ("answers0-1", 10)],
            2,
        );
        let rates = compute_rates(&previous, &current).unwrap();

        let verdict = assess(
            &current,
            &rates,
            &Policy {
                thresholds: Thresholds {
                    warning: 100,
                    critical: 200,
                },
                perfdata: true,
                ..Default::default()
            },
        );

        let names: Vec<&str> = verdict.metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["answers0-1", "cache-misses", "questions"]);
        assert!(verdict.metrics.iter().all(|m| m.warning == 100 && m.critical == 200));
        assert_eq!(verdict.metrics[2].value, 10.0);
    }

    #[test]
    fn test_no_metrics_unless_requested() {
        let previous = CounterSnapshot::watched([("questions", 0)], 0);
        let current = CounterSnapshot::watched([("questions", 20)], 2);
        let rates = compute_rates(&previous, &current).unwrap();

        assert!(assess(&current, &rates, &policy(0, 0)).metrics.is_empty());
    }

    #[test]
    fn test_aggregate_precedence() {
        use Severity::*;

        assert_eq!(aggregate(Vec::new()), Unknown);
        assert_eq!(aggregate([Unknown, Unknown]), Unknown);
        assert_eq!(aggregate([Critical, Ok, Warning, Ok]), Critical);
        assert_eq!(aggregate([Warning, Ok]), Warning);
        assert_eq!(aggregate([Ok, Warning, Ok]), Warning);
        assert_eq!(aggregate([Ok, Unknown]), Ok);
    }
}
