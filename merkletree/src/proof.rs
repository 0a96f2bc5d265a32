//! Inclusion proof generation and verification.
//!
//! A proof path is the list of sibling digests met while walking from a leaf
//! to the root, ordered bottom-up. The leaf index alone decides on which side
//! each sibling is concatenated: at every level an even index means the
//! running hash is the left child, an odd index means it is the right child.
//!
//! A node that was the last, unpaired node of an odd-sized level was hashed
//! with a copy of itself, so its own digest is recorded as its sibling.
//!
//! Verification is a pure function of its arguments; it never needs a
//! [`Tree`].

use log::debug;

use crate::error::MerkleError;
use crate::tree::Tree;
use crate::utils::hasher::{self, Hash32};

/// An inclusion proof for one leaf.
///
/// This is a plain owned value: it stays valid after the tree it was
/// generated from is dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProofPath {
    /// Position of the proved leaf in the tree's input order.
    pub leaf_index: usize,
    /// Digest of the proved leaf.
    pub leaf_hash: Hash32,
    /// Sibling digests from the leaf level up to the level below the root.
    pub siblings: Vec<Hash32>,
}

impl ProofPath {
    /// Checks this proof against a trusted root.
    ///
    /// See [`verify_proof`] for the meaning of the result.
    pub fn check(&self, root: &[u8]) -> Result<bool, MerkleError> {
        verify_proof(root, &self.siblings, &self.leaf_hash, self.leaf_index)
    }

    /// Recomputes the root this proof commits to.
    pub fn compute_root(&self) -> Hash32 {
        let mut current_hash = self.leaf_hash;
        let mut current_index = self.leaf_index;
        for sibling in &self.siblings {
            current_hash = climb(&current_hash, sibling, current_index);
            current_index /= 2;
        }
        current_hash
    }

    /// Number of siblings; equals the height of the source tree.
    pub fn height(&self) -> usize {
        self.siblings.len()
    }

    /// Splits the proof into `(siblings, leaf_hash)`.
    pub fn into_parts(self) -> (Vec<Hash32>, Hash32) {
        (self.siblings, self.leaf_hash)
    }
}

impl Tree {
    /// Creates the authentication path for the leaf at `leaf_index`.
    ///
    /// Any integer type is accepted; negative values and values that do not
    /// fit `usize` are reported the same way as indices past the last leaf.
    ///
    /// # Errors
    /// Returns [`MerkleError::OutOfBoundary`] unless
    /// `0 <= leaf_index < leaf_count`.
    pub fn generate_proof<I: TryInto<usize>>(
        &self,
        leaf_index: I,
    ) -> Result<ProofPath, MerkleError> {
        let leaf_count = self.leaf_count();
        let index = match leaf_index.try_into() {
            Ok(index) if index < leaf_count => index,
            _ => {
                debug!("proof requested outside of {} leaves", leaf_count);
                return Err(MerkleError::OutOfBoundary { leaf_count });
            }
        };

        let levels = self.levels();
        let mut siblings = Vec::with_capacity(self.height());
        let mut current_index = index;
        for level in &levels[..levels.len() - 1] {
            let sibling_index = current_index ^ 1;
            // the last node of an odd level was paired with itself
            let sibling = level.get(sibling_index).unwrap_or(&level[current_index]);
            siblings.push(*sibling);
            current_index /= 2;
        }

        Ok(ProofPath {
            leaf_index: index,
            leaf_hash: levels[0][index],
            siblings,
        })
    }
}

/// Checks that `leaf_hash` at `leaf_index` hashes up to `expected_root`
/// through `proof_path`.
///
/// Empty slices stand for absent values.
///
/// Returns `Ok(true)` when the recomputed root equals `expected_root` byte
/// for byte and `Ok(false)` for any well-formed proof that does not (a
/// tampered digest or the wrong index). With an empty `proof_path` the proof
/// is valid iff `leaf_hash == expected_root`, the single-leaf case.
///
/// # Errors
/// - [`MerkleError::InvalidProofInputs`] if `expected_root` or `leaf_hash`
///   is empty.
/// - [`MerkleError::InvalidProof`] if any sibling in `proof_path` is empty.
pub fn verify_proof<S: AsRef<[u8]>>(
    expected_root: &[u8],
    proof_path: &[S],
    leaf_hash: &[u8],
    leaf_index: usize,
) -> Result<bool, MerkleError> {
    if expected_root.is_empty() || leaf_hash.is_empty() {
        return Err(MerkleError::InvalidProofInputs);
    }
    let mut current_hash = leaf_hash.to_vec();
    let mut current_index = leaf_index;
    for (position, sibling) in proof_path.iter().enumerate() {
        let sibling = non_empty(sibling, position)?;
        current_hash = climb(&current_hash, sibling, current_index).to_vec();
        current_index /= 2;
    }

    Ok(current_hash == expected_root)
}

fn non_empty<S: AsRef<[u8]>>(sibling: &S, position: usize) -> Result<&[u8], MerkleError> {
    let sibling = sibling.as_ref();
    if sibling.is_empty() {
        return Err(MerkleError::InvalidProof { position });
    }
    Ok(sibling)
}

/// Hashes the running node with its sibling; an odd index puts the sibling
/// on the left.
fn climb(current: &[u8], sibling: &[u8], index: usize) -> Hash32 {
    hasher::hash2x(current, sibling, index % 2 == 1)
}
