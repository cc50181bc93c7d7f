//! The persisted form of a counter snapshot.

use alloc::collections::BTreeMap;
use alloc::string::String;
#[cfg(feature = "minicbor")]
use alloc::vec::Vec;
use core::fmt;

use crate::{CounterSnapshot, SCHEMA_VERSION};

/// A counter snapshot as written to the scratch directory.
///
/// Fields carry explicit CBOR indices so that new fields can be appended
/// without breaking older readers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "minicbor", derive(minicbor::Encode, minicbor::Decode))]
pub struct SnapshotRecord {
    /// Schema version of the writer. Readers accept only their own
    /// version; fields added later get new indices and are skipped by
    /// older readers.
    #[cfg_attr(feature = "minicbor", n(0))]
    pub version: u32,

    /// Unix timestamp in seconds of the stored snapshot.
    #[cfg_attr(feature = "minicbor", n(1))]
    pub timestamp: i64,

    /// Counter values keyed by name.
    #[cfg_attr(feature = "minicbor", n(2))]
    pub values: BTreeMap<String, u64>,
}

/// Just the version of a record, readable from any schema.
#[cfg(feature = "minicbor")]
#[derive(minicbor::Decode)]
struct RecordHeader {
    #[n(0)]
    version: u32,
}

/// Errors decoding a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The bytes are not a snapshot record.
    Malformed(String),
    /// The record was written with an incompatible schema.
    Incompatible(u32),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Malformed(reason) => write!(f, "malformed snapshot record: {}", reason),
            RecordError::Incompatible(version) => write!(
                f,
                "snapshot record schema {} is incompatible with {}",
                version, SCHEMA_VERSION
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RecordError {}

impl From<&CounterSnapshot> for SnapshotRecord {
    fn from(snapshot: &CounterSnapshot) -> Self {
        Self {
            version: SCHEMA_VERSION,
            timestamp: snapshot.timestamp,
            values: snapshot.values.clone(),
        }
    }
}

impl From<SnapshotRecord> for CounterSnapshot {
    fn from(record: SnapshotRecord) -> Self {
        CounterSnapshot {
            values: record.values,
            timestamp: record.timestamp,
        }
    }
}

impl SnapshotRecord {
    /// Returns true if this build can read the record.
    pub fn is_compatible(&self) -> bool {
        self.version == SCHEMA_VERSION
    }
}

#[cfg(feature = "minicbor")]
impl SnapshotRecord {
    /// Encode the record as CBOR.
    pub fn to_bytes(&self) -> Result<Vec<u8>, minicbor::encode::Error<core::convert::Infallible>> {
        minicbor::to_vec(self)
    }

    /// Decode a record, checking the schema version before the body.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RecordError> {
        use alloc::string::ToString;

        let header: RecordHeader =
            minicbor::decode(bytes).map_err(|e| RecordError::Malformed(e.to_string()))?;
        if header.version != SCHEMA_VERSION {
            return Err(RecordError::Incompatible(header.version));
        }

        minicbor::decode(bytes).map_err(|e| RecordError::Malformed(e.to_string()))
    }
}
