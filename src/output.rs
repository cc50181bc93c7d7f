//! Monitoring-plugin output.
//!
//! A verdict becomes exactly one line on stdout plus the process exit code:
//!
//! ```text
//! WARNING - PowerDNS running. Queries: 6/s.| 'questions'=6;5;0;0;
//! ```

use std::fmt::Write;

use recwatch_types::{Metric, Verdict};

/// Render a verdict as a plugin output line, without the trailing newline.
///
/// # Example
///
/// ```
/// use recwatch::output::render;
/// use recwatch_types::{Severity, Verdict};
///
/// let verdict = Verdict::new(Severity::Ok, "PowerDNS running. Queries: 0/s.");
/// assert_eq!(render(&verdict), "OK - PowerDNS running. Queries: 0/s.");
/// ```
pub fn render(verdict: &Verdict) -> String {
    let mut line = format!("{} - {}", verdict.severity, verdict.message);
    if !verdict.metrics.is_empty() {
        line.push('|');
        for metric in &verdict.metrics {
            push_metric(&mut line, metric);
        }
    }
    line
}

// Values are truncated toward zero.
fn push_metric(line: &mut String, metric: &Metric) {
    let _ = write!(
        line,
        " '{}'={};{};{};0;",
        metric.name, metric.value as i64, metric.warning, metric.critical
    );
}
