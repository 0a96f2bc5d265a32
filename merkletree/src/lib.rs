//! A binary Merkle tree over an ordered sequence of opaque data blocks.
//!
//! # Overview
//! The crate provides:
//! - Deterministic root computation over the full dataset ([`Tree::new`])
//! - Compact inclusion proofs ([`Tree::generate_proof`]) that let a verifier
//!   confirm a single block's membership and position from the root, the
//!   block's digest, its index and a logarithmic-size sibling path
//! - Tree-independent verification of such proofs ([`verify_proof`])
//!
//! # Hashing
//! Leaves are `sha256(block)`, inner nodes are `sha256(left || right)`. When a
//! level has an odd number of nodes, its last node is paired with a copy of
//! itself. Changing any of these rules changes every root and proof.
//!
//! # Example
//! ```
//! use merkletree::{verify_proof, Tree};
//!
//! let tree = Tree::new([b"A", b"B", b"C"]).unwrap();
//! let root = tree.root();
//!
//! let proof = tree.generate_proof(2).unwrap();
//! assert_eq!(proof.siblings.len(), tree.height());
//! assert!(verify_proof(&root, &proof.siblings, &proof.leaf_hash, 2).unwrap());
//! assert!(!verify_proof(&root, &proof.siblings, &proof.leaf_hash, 1).unwrap());
//! ```
//!
//! # Concurrency
//! A [`Tree`] is immutable once built and can be read from many threads at
//! once. Verification touches no shared state.

pub mod check;
pub mod def;
pub mod error;
pub mod proof;
pub mod tree;
pub mod utils;

pub use error::{CheckError, MerkleError};
pub use proof::{verify_proof, ProofPath};
pub use tree::Tree;
pub use utils::hasher::{self, Hash32};
