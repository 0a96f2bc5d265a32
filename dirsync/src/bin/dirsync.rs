// Main file for dirsync.
// 3 sub-commands
// - sync: make a destination directory match a source directory
// - root: print the Merkle root of a directory
// - prove: print the inclusion proof of one path
use anyhow::Result;
use clap::Parser;
use dirsync::common::config::SyncConfig;
use dirsync::common::sync::DirectorySync;
use dirsync::common::{blocks, cli, prove, utils};
use log::info;

fn sync(config: SyncConfig) -> Result<()> {
    let report = DirectorySync::new(config).sync()?;
    let root = utils::hex_root(Some(&report.source_root));
    if report.already_in_sync {
        println!("already in sync: {}", root);
    } else {
        println!(
            "synced {}: {} directories created, {} files copied, {} deleted",
            root, report.created_dirs, report.copied_files, report.deleted
        );
    }
    Ok(())
}

fn run(args: &cli::SyncCli) -> Result<()> {
    match &args.command {
        cli::Command::Sync { .. } => {
            if let Some(config) = args.command.sync_config() {
                sync(config)?;
            }
        }
        cli::Command::Root { dir, threads } => {
            let (files, tree) = blocks::scan_tree(dir, *threads)?;
            info!("{} entries in {}", files.len(), dir.display());
            println!("{}", utils::hex_root(tree.map(|t| t.root()).as_ref()));
        }
        cli::Command::Prove { dir, path, threads } => {
            let proof = prove::prove_path(dir, path, *threads)?;
            print!("{}", proof.render());
            println!("valid: {}", proof.verify()?);
        }
    }
    Ok(())
}

fn main() {
    let args = cli::SyncCli::parse();
    utils::init_logging(&args.log_level);
    if let Err(err) = run(&args) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
