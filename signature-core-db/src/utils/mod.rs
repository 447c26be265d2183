use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Content hash of an entity: CBOR encoding fed to XxHash64 (seed 0).
///
/// Stable across runs and platforms; used for audit chaining and to skip
/// updates that change nothing.
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}
