//! SHA-256 checksum utility for detecting edits to applied migrations.

use sha2::{Digest, Sha256};

/// Compute the lower-case hex SHA256 checksum of a string
pub fn compute_checksum(s: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(s.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}
