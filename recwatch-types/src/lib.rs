//! # recwatch-types
//!
//! Core types for the recwatch PowerDNS Recursor probe. This crate defines the
//! canonical data model shared by the collectors in `recwatch-adapters` and
//! the rate/severity engine in `recwatch`.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Core types work without any serialization framework
//! - **One canonical shape**: Every collector produces the same [`CounterSnapshot`]
//! - **Fixed whitelists**: The counters the probe cares about are declared once, in [`counters`]
//! - **Versioned persistence**: [`SnapshotRecord`] carries [`SCHEMA_VERSION`] so stale or
//!   corrupt state files are detected instead of misread
//!
//! ## Features
//!
//! - `std` (default): Standard library support (wall-clock timestamps)
//! - `minicbor`: Compact binary encoding of [`SnapshotRecord`] via CBOR
//!
//! ## Example
//!
//! ```rust
//! use recwatch_types::{CounterSnapshot, Severity};
//!
//! let snapshot = CounterSnapshot::builder()
//!     .timestamp(1_700_000_000)
//!     .counter("questions", 1500)
//!     .counter("security-status", 1)
//!     .counter("not-watched", 7)
//!     .build();
//!
//! // Anything outside the watch set is dropped
//! assert_eq!(snapshot.len(), 2);
//! assert_eq!(Severity::Unknown.escalate(Severity::Ok), Severity::Ok);
//! ```
//!
//! ## Schema Version
//!
//! The current schema version is **1**. The version is written into every
//! persisted snapshot record.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod counters;
mod rate;
mod record;
mod severity;
mod snapshot;

pub use rate::*;
pub use record::*;
pub use severity::*;
pub use snapshot::*;

/// Current schema version.
///
/// Increment this when making breaking changes to the persisted snapshot
/// record. Older records are then reported as incompatible and ignored.
pub const SCHEMA_VERSION: u32 = 1;
