//! Construction of the full digest pyramid over an ordered sequence of blocks.
//!
//! Level 0 holds one leaf digest per input block. Every level above is
//! produced by hashing consecutive pairs of the level below; when a level has
//! an odd number of nodes its last node is paired with a copy of itself. The
//! copy only exists while hashing, stored levels keep their natural length.
//!
//! All levels are retained so that proof generation is a pure read over the
//! stored pyramid.

use log::debug;

use crate::check;
use crate::def::parent_level_len;
use crate::error::{CheckError, MerkleError};
use crate::utils::hasher::{self, Hash32};
use crate::utils::short_hex;

/// An immutable Merkle tree over an ordered sequence of data blocks.
///
/// `levels[0]` are the leaves, `levels[levels.len() - 1]` holds only the
/// root. A `Tree` is never mutated after construction, so it can be shared
/// between threads and read concurrently without locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    levels: Vec<Vec<Hash32>>,
}

impl Tree {
    /// Builds a tree from data blocks in caller-determined order.
    ///
    /// Block `i` becomes leaf `i`. Building twice from the same bytes in the
    /// same order yields the same root.
    ///
    /// # Errors
    /// Returns [`MerkleError::EmptyInput`] when `blocks` yields nothing.
    pub fn new<I, B>(blocks: I) -> Result<Self, MerkleError>
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        let leaves: Vec<Hash32> = blocks.into_iter().map(hasher::hash).collect();
        Self::from_leaf_hashes(leaves)
    }

    /// Builds a tree from leaf digests that were already computed.
    ///
    /// # Errors
    /// Returns [`MerkleError::EmptyInput`] when `leaves` is empty.
    pub fn from_leaf_hashes(leaves: Vec<Hash32>) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyInput);
        }
        let leaf_count = leaves.len();
        let levels = calculate_tree_levels(leaves);
        let tree = Self { levels };
        debug!(
            "built merkle tree: leaves={} height={} root={}",
            leaf_count,
            tree.height(),
            short_hex(&tree.root())
        );
        Ok(tree)
    }

    /// Restores a tree from a complete set of levels, e.g. ones kept by a
    /// caller from an earlier build.
    ///
    /// Every level is re-derived from the one below before it is accepted.
    pub fn from_levels(levels: Vec<Vec<Hash32>>) -> Result<Self, CheckError> {
        check::check_levels(&levels)?;
        Ok(Self { levels })
    }

    /// Returns a copy of the root digest.
    pub fn root(&self) -> Hash32 {
        // from_leaf_hashes and from_levels both guarantee a one-node top level
        self.levels[self.levels.len() - 1][0]
    }

    /// Returns a copy of the ordered leaf digests.
    pub fn leaves(&self) -> Vec<Hash32> {
        self.levels[0].clone()
    }

    /// Returns the digest of leaf `index`, if it exists.
    pub fn leaf(&self, index: usize) -> Option<&Hash32> {
        self.levels[0].get(index)
    }

    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of levels above the leaves; equals the length of every proof
    /// generated from this tree.
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Returns the stored nodes of level `level` (0 = leaves).
    pub fn level(&self, level: usize) -> Option<&[Hash32]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    pub fn levels(&self) -> &[Vec<Hash32>] {
        &self.levels
    }
}

/// Builds all levels of the tree from the leaf hashes, up to the root.
fn calculate_tree_levels(leaves: Vec<Hash32>) -> Vec<Vec<Hash32>> {
    let mut all_levels = vec![leaves];
    loop {
        let current = &all_levels[all_levels.len() - 1];
        if current.len() <= 1 {
            break;
        }
        let next = calculate_next_level(current);
        all_levels.push(next);
    }
    all_levels
}

/// Computes the parent level of `current`.
///
/// An odd trailing node is hashed with a duplicate of itself, never with a
/// zero or placeholder digest.
pub(crate) fn calculate_next_level(current: &[Hash32]) -> Vec<Hash32> {
    let mut next = Vec::with_capacity(parent_level_len(current.len()));
    for pair in current.chunks(2) {
        let left = &pair[0];
        let right = pair.get(1).unwrap_or(left);
        next.push(hasher::hash2(left, right));
    }
    next
}
