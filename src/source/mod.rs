//! Data sources for resolver counters.
//!
//! A [`Source`] wraps one of the collectors from `recwatch-adapters` and
//! produces a normalized [`Collection`]. The previous snapshot normally comes
//! from the [`SnapshotStore`]; the test source brings its own baseline and
//! never touches the store.

mod store;

pub use store::{record_name, SnapshotStore, StoreError, RECORD_PREFIX};

use recwatch_adapters::api::PdnsApiAdapter;
use recwatch_adapters::control::RecControlAdapter;
use recwatch_adapters::{AdapterError, FakeAdapter};
use recwatch_types::CounterSnapshot;

/// The result of one collection.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Watched counters as of now.
    pub current: CounterSnapshot,
    /// Previous snapshot supplied by the source itself, bypassing the store.
    pub baseline: Option<CounterSnapshot>,
}

/// Where the counters come from.
///
/// # Example
///
/// ```
/// use recwatch::source::Source;
///
/// # tokio_test::block_on(async {
/// let source = Source::fake();
/// let collection = source.collect().await.unwrap();
/// assert!(collection.baseline.is_some());
/// assert_eq!(source.description(), "test data");
/// # });
/// ```
#[derive(Debug, Clone)]
pub enum Source {
    /// The Recursor's HTTP API.
    Api(PdnsApiAdapter),
    /// `rec_control get-all` over the control socket.
    Control(RecControlAdapter),
    /// Fixed test data.
    Fake(FakeAdapter),
}

impl Source {
    /// The standard test data source.
    pub fn fake() -> Self {
        Source::Fake(FakeAdapter::new())
    }

    /// Collect the current counters.
    pub async fn collect(&self) -> Result<Collection, AdapterError> {
        match self {
            Source::Api(adapter) => Ok(Collection {
                current: adapter.collect().await?,
                baseline: None,
            }),
            Source::Control(adapter) => Ok(Collection {
                current: adapter.collect().await?,
                baseline: None,
            }),
            Source::Fake(adapter) => {
                let (previous, current) = adapter.collect_pair();
                Ok(Collection {
                    current,
                    baseline: Some(previous),
                })
            }
        }
    }

    /// Returns a human-readable description of the source.
    pub fn description(&self) -> &'static str {
        match self {
            Source::Api(_) => "api",
            Source::Control(_) => "rec_control",
            Source::Fake(_) => "test data",
        }
    }
}
