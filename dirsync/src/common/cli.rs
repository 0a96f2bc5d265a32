use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::config::SyncConfig;

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Make DESTINATION an exact copy of SOURCE
    Sync {
        source: PathBuf,

        destination: PathBuf,

        /// Log the planned actions without touching the destination
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Keep destination entries that do not exist in the source
        #[arg(long, default_value_t = false)]
        no_delete: bool,

        /// Do not carry permission bits over to copied files
        #[arg(long, default_value_t = false)]
        no_preserve_permissions: bool,

        /// Threads used to hash file contents, 0 means one per core
        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
    /// Print the Merkle root of a directory
    Root {
        dir: PathBuf,

        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
    /// Print and check the inclusion proof of one path inside a directory
    Prove {
        dir: PathBuf,

        /// Path relative to DIR, `/`-separated
        path: String,

        #[arg(long, default_value_t = 0)]
        threads: usize,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(name = "dirsync", version, about = "Merkle tree based directory synchronization")]
pub struct SyncCli {
    #[command(subcommand)]
    pub command: Command,

    /// Default log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Command {
    /// Builds the run configuration of a `sync` command.
    pub fn sync_config(&self) -> Option<SyncConfig> {
        match self {
            Command::Sync {
                source,
                destination,
                dry_run,
                no_delete,
                no_preserve_permissions,
                threads,
            } => {
                let mut config = SyncConfig::from_dirs(source, destination);
                config.set_dry_run(*dry_run);
                config.set_delete_extraneous(!*no_delete);
                config.preserve_permissions = !*no_preserve_permissions;
                config.hash_threads = *threads;
                Some(config)
            }
            _ => None,
        }
    }
}
