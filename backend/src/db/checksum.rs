//! Dataset fingerprinting.

use sha2::{Digest, Sha256};

/// SHA-256 of `content`, hex encoded.
///
/// Used to fingerprint the dataset file a repository was loaded from so the
/// health endpoint can report which data is being served.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
