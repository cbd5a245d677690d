//! Command line definition

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Two-way additive sync between two rclone roots
#[derive(Parser, Debug)]
#[command(name = "duosync", version, about, long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to ./duosync.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors and hide progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy files present on only one side to the other side
    Sync(SyncArgs),

    /// Exit 0 when both roots hold identical files, 1 otherwise
    Check(CheckArgs),

    /// Print the listing of one root
    Ls(LsArgs),
}

/// Options shared by every subcommand that talks to the storage tool
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// rclone-compatible command to run
    #[arg(long, value_name = "CMD")]
    pub rclone: Option<String>,

    /// Exclude paths matching GLOB (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Extra argument passed to every rclone invocation (repeatable)
    #[arg(long = "flag", value_name = "ARG", allow_hyphen_values = true)]
    pub flags: Vec<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// First root (local path or remote:path)
    pub root_a: Option<String>,

    /// Second root (local path or remote:path)
    pub root_b: Option<String>,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Show planned copies without performing them
    #[arg(long)]
    pub dry_run: bool,

    /// Run an equality check after syncing and warn on remaining differences
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// First root (local path or remote:path)
    pub root_a: Option<String>,

    /// Second root (local path or remote:path)
    pub root_b: Option<String>,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Compare by downloading content when the roots share no hash type
    #[arg(long)]
    pub download: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LsArgs {
    /// Root to list
    pub root: String,

    #[command(flatten)]
    pub storage: StorageArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}
