//! # recwatch
//!
//! A monitoring-plugin probe for the PowerDNS Recursor.
//!
//! Each invocation collects the Recursor's statistics counters, compares them
//! with the snapshot saved by the previous invocation, and reports query rates
//! and the resolver's security status as a single plugin line with an exit
//! code (OK 0, WARNING 1, CRITICAL 2, UNKNOWN 3).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                            probe                               │
//! │  ┌─────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐   │
//! │  │ source  │───▶│   data   │───▶│ Verdict  │───▶│  output  │   │
//! │  │ (input) │    │ (rates,  │    │          │    │ (stdout, │   │
//! │  └────┬────┘    │ severity)│    └──────────┘    │ exit code│   │
//! │       │         └──────────┘                    └──────────┘   │
//! │       ▼                                                        │
//! │  Api | Control | Fake        SnapshotStore (scratch dir)       │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: Counter sources ([`Source`]) and the single-slot
//!   [`SnapshotStore`] holding the previous snapshot
//! - **[`data`]**: Per-second rates and the severity judgments folded into a
//!   [`Verdict`]
//! - **[`probe`]**: The pipeline tying the two together
//! - **[`output`]**: Plugin-line rendering
//! - **[`config`]**: Layered settings
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Default: rec_control over the control socket
//! check_pdns_rec -w 1000 -c 5000 -p
//!
//! # HTTP API, key taken from the environment
//! RECWATCH_API_KEY=changeme check_pdns_rec -A 127.0.0.1 -P 8082
//!
//! # Fixed test data
//! check_pdns_rec -T
//! ```
//!
//! ### As a library
//!
//! ```
//! use recwatch::{output, Probe, SnapshotStore, Source};
//! use recwatch::data::Policy;
//!
//! # tokio_test::block_on(async {
//! let probe = Probe::new(
//!     Source::fake(),
//!     SnapshotStore::new(std::env::temp_dir(), None),
//!     Policy::default(),
//! );
//!
//! let verdict = probe.run().await;
//! assert_eq!(output::render(&verdict), "OK - PowerDNS running. Queries: 0/s.");
//! # });
//! ```

pub mod config;
pub mod data;
pub mod output;
pub mod probe;
pub mod source;

// Re-export main types for convenience
pub use config::{Mode, Overrides, Settings};
pub use data::{Policy, Thresholds};
pub use probe::{Probe, ProbeError};
pub use recwatch_types::{Severity, Verdict};
pub use source::{SnapshotStore, Source, StoreError};
