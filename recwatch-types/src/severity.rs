//! Plugin severities and the final verdict.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Monitoring plugin severity.
///
/// The discriminants are the plugin exit codes. They do not define the
/// aggregation order; use [`Severity::escalate`] for that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Ok = 0,
    Warning = 1,
    Critical = 2,
    Unknown = 3,
}

impl Severity {
    /// Combine the current severity with a new candidate.
    ///
    /// Precedence is CRITICAL > WARNING > OK, and an UNKNOWN candidate never
    /// changes anything. CRITICAL is terminal; WARNING only yields to
    /// CRITICAL.
    ///
    /// ```rust
    /// use recwatch_types::Severity;
    ///
    /// assert_eq!(Severity::Warning.escalate(Severity::Ok), Severity::Warning);
    /// assert_eq!(Severity::Ok.escalate(Severity::Unknown), Severity::Ok);
    /// assert_eq!(Severity::Unknown.escalate(Severity::Critical), Severity::Critical);
    /// ```
    pub const fn escalate(self, candidate: Severity) -> Severity {
        match (self, candidate) {
            (current, Severity::Unknown) => current,
            (Severity::Critical, _) => Severity::Critical,
            (_, Severity::Critical) => Severity::Critical,
            (Severity::Warning, _) => Severity::Warning,
            (_, candidate) => candidate,
        }
    }

    /// Process exit code for this severity.
    pub const fn exit_code(self) -> i32 {
        self as i32
    }

    /// Upper-case name used as the first word of plugin output.
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single performance-data entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: f64,
    pub warning: u64,
    pub critical: u64,
}

/// The outcome of one probe invocation.
///
/// Built once and rendered once; there are no mutators.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
    /// Empty unless performance data was requested.
    pub metrics: Vec<Metric>,
}

impl Verdict {
    /// Create a verdict without metrics.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            metrics: Vec::new(),
        }
    }

    /// Verdict for a probe that could not complete.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Severity::Unknown, message)
    }

    /// Attach performance data.
    pub fn with_metrics(mut self, metrics: Vec<Metric>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Process exit code for this verdict.
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }
}
