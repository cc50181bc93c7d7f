//! The probe pipeline.
//!
//! ```text
//! Source::collect() ──▶ current snapshot ──┐
//!                                          ├──▶ compute_rates() ──▶ assess() ──▶ Verdict
//! SnapshotStore::load() ─▶ previous ───────┘
//!        (then save(current))
//! ```
//!
//! Fatal errors skip every judgment and become an UNKNOWN verdict carrying
//! only the error message.

use thiserror::Error;
use tracing::debug;

use recwatch_adapters::AdapterError;
use recwatch_types::{RateSample, Verdict};

use crate::data::{assess, compute_rates, Policy};
use crate::source::{Collection, SnapshotStore, Source, StoreError};

/// Errors that abort a probe run.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Collection(#[from] AdapterError),

    /// The source answered, but reported none of the watched counters.
    #[error("No data available")]
    NoData,

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// One configured probe.
#[derive(Debug, Clone)]
pub struct Probe {
    source: Source,
    store: SnapshotStore,
    policy: Policy,
}

impl Probe {
    pub fn new(source: Source, store: SnapshotStore, policy: Policy) -> Self {
        Self {
            source,
            store,
            policy,
        }
    }

    /// Run the probe. Always yields a verdict.
    pub async fn run(&self) -> Verdict {
        match self.try_run().await {
            Ok(verdict) => verdict,
            Err(e) => {
                debug!(error = ?e, source = self.source.description(), "probe failed");
                Verdict::unknown(e.to_string())
            }
        }
    }

    /// Run the probe, surfacing fatal errors.
    pub async fn try_run(&self) -> Result<Verdict, ProbeError> {
        let collection = self.source.collect().await?;
        self.evaluate(collection)
    }

    /// Judge a collection against the stored history.
    ///
    /// Without a baseline from the source, the previous snapshot is loaded
    /// and the current one saved before any rates are computed; failing to
    /// save is fatal.
    pub fn evaluate(&self, collection: Collection) -> Result<Verdict, ProbeError> {
        let Collection { current, baseline } = collection;
        if current.is_empty() {
            return Err(ProbeError::NoData);
        }
        debug!(counters = current.len(), timestamp = current.timestamp, "collected");

        let previous = match baseline {
            Some(baseline) => baseline,
            None => {
                let previous = self.store.load();
                self.store.save(&current)?;
                previous
            }
        };

        let rates = match compute_rates(&previous, &current) {
            Ok(rates) => {
                debug!(
                    elapsed_secs = rates.elapsed_secs,
                    query_rate = rates.total_query_rate,
                    "rated"
                );
                rates
            }
            Err(reason) => {
                debug!(%reason, "no usable rate window");
                RateSample::empty()
            }
        };

        Ok(assess(&current, &rates, &self.policy))
    }
}
