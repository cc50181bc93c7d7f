//! Rate derivation and severity judgment.
//!
//! This module turns a pair of counter snapshots into a verdict.
//!
//! ## Submodules
//!
//! - [`rates`]: Per-second rates between the previous and current snapshot
//! - [`verdict`]: Security-status and threshold judgments folded into a [`Verdict`]
//!
//! ## Data Flow
//!
//! ```text
//! previous + current CounterSnapshot
//!        │
//!        ▼
//! compute_rates() ──▶ RateSample (or Degenerate → RateSample::empty())
//!        │
//!        ▼
//! assess(current, rates, policy) ──▶ Verdict
//! ```
//!
//! [`Verdict`]: recwatch_types::Verdict

pub mod rates;
pub mod verdict;

pub use rates::{compute_rates, Degenerate};
pub use verdict::{aggregate, assess, Policy, SecurityStatus, Thresholds};
