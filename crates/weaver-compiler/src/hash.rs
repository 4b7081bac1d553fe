//! Canonical hashing of a normalized SDD, stamped into WSpec provenance.

use sha2::{Digest, Sha256};
use weaver_core::SankeyDefinition;

/// Hashes `sdd` into the hex-encoded SHA-256 digest stamped into
/// [`weaver_core::Provenance::input_hash`].
///
/// Hashes the JSON encoding rather than a `Debug` rendering: every
/// collection in the SDD model is already a `Vec` (declaration order) or
/// a `BTreeSet`/`BTreeMap` (canonical key order), so the same SDD value
/// always serializes to the same bytes regardless of how it was built.
pub fn hash_sdd(sdd: &SankeyDefinition) -> String {
    let bytes = serde_json::to_vec(sdd).expect("SankeyDefinition always serializes");
    let digest = Sha256::digest(&bytes);
    format!("{digest:x}")
}
