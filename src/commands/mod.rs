//! Subcommand implementations

pub mod check;
pub mod ls;
pub mod sync;

use crate::config::{Cli, Command, FileConfig, StorageConfig};
use crate::types::Root;
use crate::Config;
use std::process::ExitCode;

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let file = FileConfig::discover(cli.config.as_deref())?;

    match cli.command {
        Command::Sync(args) => {
            let config = Config::from_sync_args(&file, &args)?;
            sync::run(&config, cli.quiet)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => {
            let config = Config::from_check_args(&file, &args)?;
            if check::run(&config)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Ls(args) => {
            let storage = StorageConfig::merge(&file, &args.storage);
            storage.validate()?;
            let root = Root::new(args.root)?;
            ls::run(&root, &storage, args.json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
