//! Synchronization of a destination directory with a source directory.

use std::fs::{self, File};
use std::io::{self, ErrorKind};
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info, warn};
use merkletree::Hash32;

use super::blocks::{build_tree, scan_tree};
use super::compare::{compare_listings, SyncPlan};
use super::config::SyncConfig;
use super::scan::{scan_dir, FileInfo};
use super::utils::hex_root;

/// Outcome of a synchronization run.
///
/// In a dry run the counters hold the planned actions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub already_in_sync: bool,
    pub source_root: Hash32,
    pub destination_root: Option<Hash32>,
    pub created_dirs: usize,
    pub copied_files: usize,
    pub deleted: usize,
}

pub struct DirectorySync {
    config: SyncConfig,
}

impl DirectorySync {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Brings the destination directory in line with the source directory.
    ///
    /// Returns early, without comparing listings, when both roots are equal.
    pub fn sync(&self) -> Result<SyncReport> {
        let src = &self.config.source_dir;
        info!("scanning source directory {}", src.display());
        let (source, source_tree) = scan_tree(src, self.config.hash_threads)?;
        let source_tree = source_tree
            .ok_or_else(|| anyhow!("no files to build tree from in {}", src.display()))?;
        let source_root = source_tree.root();
        info!("source root {} ({} entries)", hex_root(Some(&source_root)), source.len());

        let destination = self.scan_destination()?;
        let destination_root = build_tree(&destination)?.map(|tree| tree.root());
        info!("destination root {}", hex_root(destination_root.as_ref()));

        let mut report = SyncReport {
            source_root,
            destination_root,
            ..SyncReport::default()
        };
        if destination_root == Some(source_root) {
            info!("directories are already in sync");
            report.already_in_sync = true;
            return Ok(report);
        }

        let mut plan = compare_listings(&source, &destination);
        if !self.config.delete_extraneous {
            plan.to_delete.clear();
        }
        info!(
            "{} to copy, {} to replace, {} to delete",
            plan.to_copy.len(),
            plan.to_replace.len(),
            plan.to_delete.len()
        );
        self.apply(&plan, &mut report)?;
        Ok(report)
    }

    fn scan_destination(&self) -> Result<Vec<FileInfo>> {
        let dst = &self.config.destination_dir;
        match fs::metadata(dst) {
            Ok(metadata) if metadata.is_dir() => {
                info!("scanning destination directory {}", dst.display());
                scan_dir(dst, self.config.hash_threads)
            }
            Ok(_) => bail!("destination {} is not a directory", dst.display()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("destination {} does not exist yet", dst.display());
                Ok(Vec::new())
            }
            Err(err) => {
                Err(err).with_context(|| format!("reading metadata of {}", dst.display()))
            }
        }
    }

    fn apply(&self, plan: &SyncPlan, report: &mut SyncReport) -> Result<()> {
        let src = &self.config.source_dir;
        let dst = &self.config.destination_dir;
        let dry_run = self.config.dry_run;

        if !dry_run && !dst.exists() {
            fs::create_dir_all(dst)
                .with_context(|| format!("creating destination {}", dst.display()))?;
        }

        for path in plan.to_delete.iter().chain(plan.to_replace.iter()) {
            if dry_run {
                info!("[dry-run] would delete {}", path.display());
            } else {
                remove_path(&dst.join(path))?;
                info!("deleted {}", path.display());
            }
            report.deleted += 1;
        }

        // parents sort before their children
        for dir in plan.to_copy.iter().filter(|f| f.is_dir()) {
            if dry_run {
                info!("[dry-run] would create directory {}", dir.path.display());
            } else {
                let target = dst.join(&dir.path);
                fs::create_dir_all(&target)
                    .with_context(|| format!("creating directory {}", target.display()))?;
                debug!("created directory {}", dir.path.display());
            }
            report.created_dirs += 1;
        }

        for file in plan.to_copy.iter().filter(|f| !f.is_dir()) {
            if dry_run {
                info!(
                    "[dry-run] would copy {} ({} bytes)",
                    file.path.display(),
                    file.size
                );
            } else {
                copy_file(
                    &src.join(&file.path),
                    &dst.join(&file.path),
                    self.config.preserve_permissions,
                )?;
                info!("copied {} ({} bytes)", file.path.display(), file.size);
            }
            report.copied_files += 1;
        }
        Ok(())
    }
}

/// Copies one file, creating missing parent directories of `dst`.
///
/// A symbolic link at `dst` is removed first, the copy never writes through
/// it. With `preserve_permissions` the permission bits of `src` are carried
/// over, otherwise the copy gets the default permissions of a new file.
pub fn copy_file(src: &Path, dst: &Path, preserve_permissions: bool) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    if fs::symlink_metadata(dst).is_ok_and(|m| m.file_type().is_symlink()) {
        warn!("replacing symbolic link {}", dst.display());
        fs::remove_file(dst).with_context(|| format!("deleting {}", dst.display()))?;
    }
    let context = || format!("copying {} to {}", src.display(), dst.display());
    if preserve_permissions {
        fs::copy(src, dst).with_context(context)?;
        return Ok(());
    }
    let mut reader = File::open(src).with_context(context)?;
    let mut writer = File::create(dst).with_context(context)?;
    io::copy(&mut reader, &mut writer).with_context(context)?;
    Ok(())
}

/// Removes a file or a whole directory tree; a missing path is not an error.
fn remove_path(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
        Err(err) => {
            return Err(err).with_context(|| format!("reading metadata of {}", path.display()))
        }
    };
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Err(err) if err.kind() != ErrorKind::NotFound => {
            Err(err).with_context(|| format!("deleting {}", path.display()))
        }
        _ => Ok(()),
    }
}
