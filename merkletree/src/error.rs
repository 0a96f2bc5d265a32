use thiserror::Error;

/// Errors returned by tree construction, proof generation and proof
/// verification.
///
/// A well-formed proof that does not match the expected root is not an
/// error: verification returns `Ok(false)` for it. These variants only
/// describe inputs that cannot be evaluated at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("merkletree: empty data blocks")]
    EmptyInput,

    #[error("merkletree: leaf is out of boundary (leaf count {leaf_count})")]
    OutOfBoundary { leaf_count: usize },

    #[error("merkletree: invalid inputs: expected root, leaf hash cannot be empty")]
    InvalidProofInputs,

    #[error("merkletree: invalid proof: empty sibling hash at position {position}")]
    InvalidProof { position: usize },
}

/// Errors reported by the consistency checks in [`crate::check`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("tree has no levels")]
    NoLevels,

    #[error("level {level} is empty")]
    EmptyLevel { level: usize },

    #[error("level {level} has {got} nodes, expected {expected}")]
    LevelLength {
        level: usize,
        expected: usize,
        got: usize,
    },

    #[error("top level has {0} nodes, expected exactly one")]
    TopLevel(usize),

    #[error("mismatch at {level}-{index}: parent does not hash its children")]
    NodeMismatch { level: usize, index: usize },
}
