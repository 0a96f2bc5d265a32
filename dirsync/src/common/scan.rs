//! Directory scanning.
//!
//! A scan lists every entry below a root (the root itself excluded), hashes
//! file contents with SHA-256 and sorts the listing by the `/`-separated
//! bytes of the relative path. The sort is what makes block order, and
//! therefore the tree root, reproducible across runs and machines.
//!
//! Symbolic links are listed but never followed, read or hashed.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{bail, Context, Result};
use log::debug;
use merkletree::Hash32;
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use super::utils::{relative_path, slash_name};

const READ_BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// Metadata about one entry of a scanned directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    /// Path relative to the scanned root
    pub path: PathBuf,
    /// `path` as `/`-separated bytes, the sort key of a listing
    pub name: Vec<u8>,
    /// Size in bytes as reported by the file system
    pub size: u64,
    pub modified: SystemTime,
    pub kind: EntryKind,
    /// SHA-256 of the contents; `None` unless `kind` is `File`
    pub hash: Option<Hash32>,
}

impl FileInfo {
    pub fn new(path: PathBuf, kind: EntryKind) -> Self {
        Self {
            name: slash_name(&path),
            path,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
            kind,
            hash: None,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }
}

/// Scans `root` recursively and returns its entries sorted by path.
///
/// Symbolic links are listed with kind `Symlink`. File contents are hashed on
/// a rayon pool with `hash_threads` threads (0 = rayon default).
pub fn scan_dir(root: &Path, hash_threads: usize) -> Result<Vec<FileInfo>> {
    if !root.is_dir() {
        bail!("{} is not a directory", root.display());
    }
    let mut entries: Vec<(PathBuf, FileInfo)> = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {}", root.display()))?;
        let file_type = entry.file_type();
        let kind = if file_type.is_symlink() {
            debug!("symbolic link {}", entry.path().display());
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Dir
        } else {
            EntryKind::File
        };
        // not followed, so a link reports its own metadata
        let metadata = entry
            .metadata()
            .with_context(|| format!("reading metadata of {}", entry.path().display()))?;
        let mut info = FileInfo::new(relative_path(root, entry.path())?, kind);
        info.size = metadata.len();
        info.modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        entries.push((entry.into_path(), info));
    }

    hash_contents(&mut entries, hash_threads)?;

    let mut files: Vec<FileInfo> = entries.into_iter().map(|(_, info)| info).collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("scanned {}: {} entries", root.display(), files.len());
    Ok(files)
}

fn hash_contents(entries: &mut [(PathBuf, FileInfo)], hash_threads: usize) -> Result<()> {
    let hash_all = |entries: &mut [(PathBuf, FileInfo)]| -> Result<()> {
        entries
            .par_iter_mut()
            .filter(|(_, info)| info.kind == EntryKind::File)
            .try_for_each(|(path, info)| {
                info.hash = Some(hash_file(path)?);
                Ok(())
            })
    };
    if hash_threads == 0 {
        return hash_all(entries);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(hash_threads)
        .build()
        .context("building hash thread pool")?;
    pool.install(|| hash_all(entries))
}

/// Calculates the SHA-256 hash of a file's contents.
pub fn hash_file(path: &Path) -> Result<Hash32> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_BUF_SIZE];
    loop {
        let n = file
            .read(&mut buf)
            .with_context(|| format!("reading {}", path.display()))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hasher.finalize().into())
}
