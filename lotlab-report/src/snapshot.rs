//! Content-addressed snapshot hashing.
//!
//! Two reports built from identical order tapes carry identical snapshot
//! hashes, which makes idempotence observable across runs and lets callers
//! detect that a cached report is still current.

use lotlab_core::domain::Portfolio;

/// Deterministic blake3 hash over the portfolio's canonical JSON
/// (per-asset order map plus transactions; BTreeMap keys give a stable
/// serialization order).
pub fn snapshot_hash(portfolio: &Portfolio) -> String {
    let json = serde_json::to_string(portfolio).expect("Portfolio serialization failed");
    blake3::hash(json.as_bytes()).to_hex().to_string()
}
