//! Hashing utilities for the block Merkle tree.
//!
//! This module provides SHA-256 based hashing functions for:
//! - Raw data blocks (the leaves)
//! - Pairs of digests (the inner nodes)
//!
//! No domain separation is applied: a leaf is `sha256(block)` and an inner
//! node is `sha256(left || right)`. Both functions are pure.

use sha2::{Digest, Sha256};

use crate::def::HASH_LEN;

/// Type alias for a 32-byte hash value.
pub type Hash32 = [u8; HASH_LEN];

/// Computes the SHA-256 hash of a single value.
///
/// # Arguments
/// * `a` - Value to hash
///
/// # Returns
/// The 32-byte hash of the input
pub fn hash<T: AsRef<[u8]>>(a: T) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.finalize().into()
}

/// Computes the SHA-256 hash of `a || b`.
///
/// The order is significant: `hash2(a, b)` and `hash2(b, a)` are unrelated
/// digests. No width check is done on the inputs, callers hand in full-width
/// digests.
///
/// # Arguments
/// * `a` - Left child hash
/// * `b` - Right child hash
///
/// # Returns
/// The 32-byte hash of the concatenation
pub fn hash2<T: AsRef<[u8]>, U: AsRef<[u8]>>(a: T, b: U) -> Hash32 {
    let mut hasher = Sha256::new();
    hasher.update(a);
    hasher.update(b);
    hasher.finalize().into()
}

/// Computes the SHA-256 hash of two values with optional order swapping.
///
/// Similar to [`hash2`], but hashes `b || a` when `exchange_ab` is set.
///
/// # Arguments
/// * `a` - First value to hash
/// * `b` - Second value to hash
/// * `exchange_ab` - Whether to swap the order of a and b
pub fn hash2x<T: AsRef<[u8]>, U: AsRef<[u8]>>(a: T, b: U, exchange_ab: bool) -> Hash32 {
    let mut hasher = Sha256::new();
    if exchange_ab {
        hasher.update(b);
        hasher.update(a);
    } else {
        hasher.update(a);
        hasher.update(b);
    }
    hasher.finalize().into()
}
