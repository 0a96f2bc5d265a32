//! Core definitions and constants for the block Merkle tree.

/// Width in bytes of every digest stored in a tree (SHA-256).
pub const HASH_LEN: usize = 32;

/// Number of nodes on the level above a level holding `len` nodes.
///
/// An odd trailing node is paired with a copy of itself, so the parent level
/// always has `ceil(len / 2)` nodes.
pub const fn parent_level_len(len: usize) -> usize {
    len.div_ceil(2)
}

/// Number of levels above the leaves for a tree over `leaf_count` leaves.
///
/// This is also the length of every proof path generated from such a tree.
/// A single leaf has height 0.
pub fn tree_height(leaf_count: usize) -> usize {
    let mut height = 0;
    let mut len = leaf_count;
    while len > 1 {
        len = parent_level_len(len);
        height += 1;
    }
    height
}
