//! Verification utilities for tree consistency checking.
//!
//! The checks re-derive every level from the one below and make sure that:
//! 1. Each level has `ceil(len / 2)` nodes of the level below it
//! 2. Every parent hashes its two children (or its only child, duplicated)
//! 3. The top level holds exactly one node, the root

use crate::def::parent_level_len;
use crate::error::CheckError;
use crate::tree::{calculate_next_level, Tree};
use crate::utils::hasher::Hash32;

/// Verifies that `parent` is the level computed from `children`.
///
/// `parent_level` is only used to locate the mismatch in the error.
pub fn check_level(
    parent_level: usize,
    children: &[Hash32],
    parent: &[Hash32],
) -> Result<(), CheckError> {
    let expected = parent_level_len(children.len());
    if parent.len() != expected {
        return Err(CheckError::LevelLength {
            level: parent_level,
            expected,
            got: parent.len(),
        });
    }
    let recomputed = calculate_next_level(children);
    if let Some(index) = recomputed.iter().zip(parent).position(|(a, b)| a != b) {
        return Err(CheckError::NodeMismatch {
            level: parent_level,
            index,
        });
    }
    Ok(())
}

/// Verifies a full set of levels, leaves first.
pub fn check_levels(levels: &[Vec<Hash32>]) -> Result<(), CheckError> {
    let Some(top) = levels.last() else {
        return Err(CheckError::NoLevels);
    };
    if levels[0].is_empty() {
        return Err(CheckError::EmptyLevel { level: 0 });
    }
    for (k, pair) in levels.windows(2).enumerate() {
        check_level(k + 1, &pair[0], &pair[1])?;
    }
    if top.len() != 1 {
        return Err(CheckError::TopLevel(top.len()));
    }
    Ok(())
}

/// Performs a complete consistency check of the tree.
pub fn check_hash_consistency(tree: &Tree) -> Result<(), CheckError> {
    check_levels(tree.levels())
}
