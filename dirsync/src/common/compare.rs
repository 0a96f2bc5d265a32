//! Listing comparison.

use std::collections::HashMap;
use std::path::PathBuf;

use super::scan::FileInfo;

/// Actions that bring a destination listing in line with a source listing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// Source entries that are missing or different in the destination,
    /// in source listing order
    pub to_copy: Vec<FileInfo>,
    /// Destination paths whose kind (file, directory or symbolic link)
    /// differs from the source; they are removed before their source entry
    /// is copied
    pub to_replace: Vec<PathBuf>,
    /// Destination paths that do not exist in the source
    pub to_delete: Vec<PathBuf>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.to_copy.is_empty() && self.to_replace.is_empty() && self.to_delete.is_empty()
    }
}

/// Identifies the differences between a source and a destination listing.
///
/// A source file is copied when the destination lacks it or holds different
/// contents. A source directory is created when the destination lacks it.
/// Metadata (size, modification time) is not compared, only content hashes.
///
/// Symbolic links in the source are never copied. A destination link is
/// replaced when the source has a file or directory at its path and left
/// alone otherwise, so nothing is ever written through a link.
pub fn compare_listings(source: &[FileInfo], destination: &[FileInfo]) -> SyncPlan {
    let source_map: HashMap<&[u8], &FileInfo> = source
        .iter()
        .filter(|f| !f.is_symlink())
        .map(|f| (f.name.as_slice(), f))
        .collect();
    let destination_map: HashMap<&[u8], &FileInfo> =
        destination.iter().map(|f| (f.name.as_slice(), f)).collect();

    let mut plan = SyncPlan::default();
    for file in source.iter().filter(|f| !f.is_symlink()) {
        match destination_map.get(file.name.as_slice()) {
            None => plan.to_copy.push(file.clone()),
            Some(existing) if existing.kind != file.kind => {
                plan.to_replace.push(existing.path.clone());
                plan.to_copy.push(file.clone());
            }
            Some(existing) if !file.is_dir() && existing.hash != file.hash => {
                plan.to_copy.push(file.clone());
            }
            Some(_) => {}
        }
    }

    for file in destination.iter().filter(|f| !f.is_symlink()) {
        if !source_map.contains_key(file.name.as_slice()) {
            plan.to_delete.push(file.path.clone());
        }
    }
    plan
}
