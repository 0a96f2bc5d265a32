//! Utility functions for the block Merkle tree.

pub mod hasher;

/// Formats a digest as lowercase hex for log and error messages.
pub fn short_hex(digest: &[u8]) -> String {
    if digest.len() <= 8 {
        return hex::encode(digest);
    }
    format!("{}..", hex::encode(&digest[..8]))
}
