//! Turning a directory listing into Merkle tree blocks.
//!
//! One block per listing entry, in listing order:
//! - directory: `"{path}:dir"`
//! - file: `"{path}:file:"` followed by the 32-byte content hash
//!
//! `{path}` is the `/`-separated name bytes of the entry. The path is part of
//! every block, so renaming or moving a file changes the root even when no
//! content changed. Symbolic links have no block.

use std::path::Path;

use anyhow::Result;
use merkletree::{MerkleError, Tree};

use super::scan::{scan_dir, EntryKind, FileInfo};

/// Serializes one listing entry into its block, `None` for a symbolic link.
pub fn file_block(info: &FileInfo) -> Option<Vec<u8>> {
    let mut block = info.name.clone();
    match info.kind {
        EntryKind::Dir => block.extend_from_slice(b":dir"),
        EntryKind::File => {
            block.extend_from_slice(b":file:");
            if let Some(hash) = &info.hash {
                block.extend_from_slice(hash);
            }
        }
        EntryKind::Symlink => return None,
    }
    Some(block)
}

/// Builds the tree of a sorted listing.
///
/// A listing without files or directories has no tree and yields `None`.
pub fn build_tree(files: &[FileInfo]) -> Result<Option<Tree>> {
    match Tree::new(files.iter().filter_map(file_block)) {
        Ok(tree) => Ok(Some(tree)),
        Err(MerkleError::EmptyInput) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Scans `dir` and builds the tree of its listing.
///
/// The returned listing holds exactly the entries that became leaves, so
/// positions in it are leaf indices.
pub fn scan_tree(dir: &Path, hash_threads: usize) -> Result<(Vec<FileInfo>, Option<Tree>)> {
    let mut files = scan_dir(dir, hash_threads)?;
    files.retain(|f| !f.is_symlink());
    let tree = build_tree(&files)?;
    Ok((files, tree))
}

/// Position of `name` in a sorted listing.
pub fn find_index(files: &[FileInfo], name: &[u8]) -> Option<usize> {
    files
        .binary_search_by(|f| f.name.as_slice().cmp(name))
        .ok()
}
