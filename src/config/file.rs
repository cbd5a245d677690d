//! TOML config file

use crate::types::SyncError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "duosync.toml";

/// Contents of a config file; every key is optional
///
/// ```toml
/// root_a = "~/Documents"
/// root_b = "gdrive:Documents"
/// rclone = "/usr/local/bin/rclone"
/// flags = ["--fast-list"]
/// exclude = ["*.tmp", ".cache/**"]
/// check_download = false
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub root_a: Option<String>,
    pub root_b: Option<String>,
    pub rclone: Option<String>,
    pub flags: Vec<String>,
    pub exclude: Vec<String>,
    pub check_download: bool,
}

impl FileConfig {
    /// Parse config text
    pub fn parse(text: &str) -> Result<Self, SyncError> {
        toml::from_str(text).map_err(|err| SyncError::Config(format!("Invalid config file: {err}")))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let text = fs::read_to_string(path).map_err(|err| {
            SyncError::Config(format!("Cannot read config file {}: {}", path.display(), err))
        })?;
        Self::parse(&text)
    }

    /// Load `explicit` if given, else `./duosync.toml` if it exists, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, SyncError> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}
