//! Configuration for a synchronization run.

use std::path::{Path, PathBuf};

/// Configuration for one source → destination synchronization.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Directory whose contents are authoritative
    pub source_dir: PathBuf,
    /// Directory that is brought in line with the source
    pub destination_dir: PathBuf,
    /// Only log the planned actions, never touch the destination
    pub dry_run: bool,
    /// Remove destination paths that do not exist in the source
    pub delete_extraneous: bool,
    /// Copy the permission bits of source files onto their copies
    pub preserve_permissions: bool,
    /// Threads used to hash file contents, 0 means rayon's default
    pub hash_threads: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("."),
            destination_dir: PathBuf::from("."),
            dry_run: false,
            delete_extraneous: true,
            preserve_permissions: true,
            hash_threads: 0,
        }
    }
}

impl SyncConfig {
    pub fn from_dirs<P: AsRef<Path>, Q: AsRef<Path>>(source_dir: P, destination_dir: Q) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
            destination_dir: destination_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.dry_run = dry_run;
    }

    pub fn set_delete_extraneous(&mut self, delete_extraneous: bool) {
        self.delete_extraneous = delete_extraneous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_dirs_keeps_defaults() {
        let mut config = SyncConfig::from_dirs("/tmp/a", "/tmp/b");
        assert_eq!(config.source_dir, PathBuf::from("/tmp/a"));
        assert_eq!(config.destination_dir, PathBuf::from("/tmp/b"));
        assert!(!config.dry_run);
        assert!(config.delete_extraneous);
        assert!(config.preserve_permissions);
        assert_eq!(config.hash_threads, 0);

        config.set_dry_run(true);
        config.set_delete_extraneous(false);
        assert!(config.dry_run);
        assert!(!config.delete_extraneous);
    }
}
