//! Configuration management

mod cli;
mod file;

pub use cli::{CheckArgs, Cli, Command, LsArgs, StorageArgs, SyncArgs};
pub use file::{FileConfig, DEFAULT_CONFIG_FILE};

use crate::lister::PathFilter;
use crate::storage::{RcloneStorage, DEFAULT_RCLONE_COMMAND};
use crate::synchronizer::Synchronizer;
use crate::types::{Root, SyncError};

/// How to reach the storage tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// rclone-compatible program
    pub rclone_command: String,

    /// Extra arguments for every invocation
    pub flags: Vec<String>,

    /// Exclude globs
    pub exclude_patterns: Vec<String>,

    /// Pass `--download` to equality checks
    pub check_download: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            rclone_command: DEFAULT_RCLONE_COMMAND.to_string(),
            flags: Vec::new(),
            exclude_patterns: Vec::new(),
            check_download: false,
        }
    }
}

impl StorageConfig {
    /// Merge file values with command line values
    ///
    /// The command line wins for the rclone command; list options from both
    /// sources are concatenated, file entries first.
    pub fn merge(file: &FileConfig, args: &StorageArgs) -> Self {
        let rclone_command = args
            .rclone
            .clone()
            .or_else(|| file.rclone.clone())
            .unwrap_or_else(|| DEFAULT_RCLONE_COMMAND.to_string());

        Self {
            rclone_command,
            flags: file.flags.iter().chain(&args.flags).cloned().collect(),
            exclude_patterns: file.exclude.iter().chain(&args.exclude).cloned().collect(),
            check_download: file.check_download,
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        if self.rclone_command.trim().is_empty() {
            return Err(SyncError::Config(
                "rclone command cannot be empty".to_string(),
            ));
        }
        self.filter().map(|_| ())
    }

    /// Adapter invoking the configured command
    pub fn storage(&self) -> RcloneStorage {
        RcloneStorage::new(self.rclone_command.clone())
            .with_flags(self.flags.clone())
            .with_check_download(self.check_download)
    }

    /// Compiled exclude filter
    pub fn filter(&self) -> Result<PathFilter, SyncError> {
        PathFilter::new(self.exclude_patterns.clone())
    }
}

/// Global configuration for a sync or check run
#[derive(Debug, Clone)]
pub struct Config {
    /// First root
    pub root_a: Root,

    /// Second root
    pub root_b: Root,

    /// Storage tool settings
    pub storage: StorageConfig,

    /// Dry run (show plan, don't execute)
    pub dry_run: bool,

    /// Run an equality check after syncing
    pub verify: bool,
}

impl Config {
    /// Config with default storage settings
    pub fn new(root_a: Root, root_b: Root) -> Self {
        Self {
            root_a,
            root_b,
            storage: StorageConfig::default(),
            dry_run: false,
            verify: false,
        }
    }

    /// Build from `sync` arguments on top of a config file
    pub fn from_sync_args(file: &FileConfig, args: &SyncArgs) -> Result<Self, SyncError> {
        let (root_a, root_b) = resolve_roots(file, args.root_a.as_deref(), args.root_b.as_deref())?;
        let config = Self {
            root_a,
            root_b,
            storage: StorageConfig::merge(file, &args.storage),
            dry_run: args.dry_run,
            verify: args.verify,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build from `check` arguments on top of a config file
    pub fn from_check_args(file: &FileConfig, args: &CheckArgs) -> Result<Self, SyncError> {
        let (root_a, root_b) = resolve_roots(file, args.root_a.as_deref(), args.root_b.as_deref())?;
        let mut storage = StorageConfig::merge(file, &args.storage);
        storage.check_download |= args.download;

        let config = Self {
            root_a,
            root_b,
            storage,
            dry_run: false,
            verify: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), SyncError> {
        // Ensure the pair is really two roots
        if self.root_a.same_location(&self.root_b) {
            return Err(SyncError::Config(
                "Root A and root B cannot be the same".to_string(),
            ));
        }
        self.storage.validate()
    }

    /// Synchronizer for this pair, backed by rclone
    pub fn synchronizer(&self) -> Result<Synchronizer<RcloneStorage>, SyncError> {
        Ok(Synchronizer::new(
            self.root_a.clone(),
            self.root_b.clone(),
            self.storage.storage(),
        )
        .with_filter(self.storage.filter()?))
    }
}

fn resolve_roots(
    file: &FileConfig,
    root_a: Option<&str>,
    root_b: Option<&str>,
) -> Result<(Root, Root), SyncError> {
    let pick = |cli: Option<&str>, from_file: &Option<String>, name: &str| {
        cli.map(str::to_string)
            .or_else(|| from_file.clone())
            .ok_or_else(|| {
                SyncError::Config(format!(
                    "{name} is missing: pass it on the command line or set it in {DEFAULT_CONFIG_FILE}"
                ))
            })
            .and_then(Root::new)
    };

    Ok((
        pick(root_a, &file.root_a, "root_a")?,
        pick(root_b, &file.root_b, "root_b")?,
    ))
}
