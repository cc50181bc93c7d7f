//! # recwatch-adapters
//!
//! Collectors for PowerDNS Recursor statistics.
//!
//! Every adapter hands back a [`CounterSnapshot`] that has already been
//! normalized: only watched counters, stamped with the collection time.
//!
//! ## Supported Sources
//!
//! - **rec_control** (`control` feature) - Runs `rec_control get-all` against
//!   the Recursor's control socket
//! - **HTTP API** (`api` feature) - Queries `/api/v1/servers/localhost/statistics`
//!   on the Recursor's web server
//! - **Fake** (always available) - Fixed all-zero data for testing the pipeline
//!
//! ## Quick Start (HTTP API)
//!
//! ```rust,no_run
//! use recwatch_adapters::api::PdnsApiAdapter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = PdnsApiAdapter::builder()
//!         .host("127.0.0.1")
//!         .api_key("changeme")
//!         .build()?;
//!
//!     // Collect a snapshot
//!     let snapshot = adapter.collect().await?;
//!
//!     println!("Collected {} counters", snapshot.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fake;
pub mod normalize;

#[cfg(feature = "api")]
pub mod api;

#[cfg(feature = "control")]
pub mod control;

pub use error::AdapterError;
pub use fake::FakeAdapter;

// Re-export types for convenience
pub use recwatch_types::{CounterSnapshot, RateSample, Severity, Verdict};
