use serde::{Deserialize, Serialize};
use std::fmt;
use xxhash_rust::xxh3::xxh3_64;

/// Cache key for a computed snapshot.
///
/// The digest is the xxh3-64 hash of the inputs encoded as canonical JSON (object
/// keys sorted), so equal inputs always produce equal keys, whatever the iteration
/// order of the maps they were built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotKey {
    pub business_id: String,
    pub digest: u64,
}

impl SnapshotKey {
    pub fn of<T: Serialize + ?Sized>(
        business_id: impl Into<String>,
        inputs: &T,
    ) -> Result<Self, serde_json::Error> {
        let canonical = serde_json::to_value(inputs)?;
        let bytes = serde_json::to_vec(&canonical)?;
        Ok(Self {
            business_id: business_id.into(),
            digest: xxh3_64(&bytes),
        })
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:016x}", self.business_id, self.digest)
    }
}
