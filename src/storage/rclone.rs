//! rclone adapter - Shells out to an rclone-compatible command

use super::RemoteStorage;
use crate::lister::{parse_lsjson, PathFilter};
use crate::types::{FileEntry, Root, SyncError};
use std::process::{Command, Output};
use tracing::debug;

/// Command used when none is configured
pub const DEFAULT_RCLONE_COMMAND: &str = "rclone";

/// Storage adapter that runs `rclone check`, `rclone lsjson` and `rclone copyto`
///
/// Every invocation is blocking. Output is captured; stderr ends up in the
/// error reason on failure and in debug logs otherwise.
#[derive(Debug, Clone)]
pub struct RcloneStorage {
    /// Program to run (name on PATH or full path)
    command: String,

    /// Extra flags appended after the subcommand on every invocation
    flags: Vec<String>,

    /// Pass `--download` to `check` so backends without a common hash compare content
    check_download: bool,
}

impl RcloneStorage {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            flags: Vec::new(),
            check_download: false,
        }
    }

    /// Append extra flags to every invocation
    pub fn with_flags(mut self, flags: Vec<String>) -> Self {
        self.flags = flags;
        self
    }

    /// Toggle `--download` for equality checks
    pub fn with_check_download(mut self, enabled: bool) -> Self {
        self.check_download = enabled;
        self
    }

    /// Program this adapter runs
    pub fn command(&self) -> &str {
        &self.command
    }

    fn check_args(&self, root_a: &Root, root_b: &Root, filter: &PathFilter) -> Vec<String> {
        let mut args = vec!["check".to_string()];
        args.extend(filter.patterns().iter().map(|p| format!("--exclude={p}")));
        if self.check_download {
            args.push("--download".to_string());
        }
        args.extend(self.flags.iter().cloned());
        args.push(root_a.to_string());
        args.push(root_b.to_string());
        args
    }

    fn list_args(&self, root: &Root) -> Vec<String> {
        let mut args: Vec<String> = ["lsjson", "--hash", "--recursive", "--files-only"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        args.extend(self.flags.iter().cloned());
        args.push(root.to_string());
        args
    }

    fn copy_args(&self, path: &str, from: &Root, to: &Root) -> Vec<String> {
        let mut args = vec!["copyto".to_string()];
        args.extend(self.flags.iter().cloned());
        args.push(from.join(path));
        args.push(to.join(path));
        args
    }

    fn run(&self, args: &[String]) -> std::io::Result<Output> {
        debug!(command = %self.command, ?args, "Invoking storage tool");
        let output = Command::new(&self.command).args(args).output()?;
        debug!(
            status = ?output.status.code(),
            stderr = %String::from_utf8_lossy(&output.stderr).trim(),
            "Storage tool exited"
        );
        Ok(output)
    }

    fn describe_failure(&self, output: &Output) -> String {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let status = match output.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "termination by signal".to_string(),
        };
        if stderr.is_empty() {
            format!("{} failed with {}", self.command, status)
        } else {
            format!("{} failed with {}: {}", self.command, status, stderr)
        }
    }
}

impl Default for RcloneStorage {
    fn default() -> Self {
        Self::new(DEFAULT_RCLONE_COMMAND)
    }
}

impl RemoteStorage for RcloneStorage {
    fn compare_equal(
        &self,
        root_a: &Root,
        root_b: &Root,
        filter: &PathFilter,
    ) -> Result<bool, SyncError> {
        let output = self.run(&self.check_args(root_a, root_b, filter))?;
        Ok(output.status.success())
    }

    fn list_with_hashes(&self, root: &Root) -> Result<Vec<FileEntry>, SyncError> {
        let output = self
            .run(&self.list_args(root))
            .map_err(|err| SyncError::Listing {
                root: root.to_string(),
                reason: format!("could not start {}: {}", self.command, err),
            })?;

        if !output.status.success() {
            return Err(SyncError::Listing {
                root: root.to_string(),
                reason: self.describe_failure(&output),
            });
        }

        parse_lsjson(&output.stdout).map_err(|err| SyncError::Listing {
            root: root.to_string(),
            reason: format!("unexpected lsjson output: {err}"),
        })
    }

    fn copy(&self, path: &str, from: &Root, to: &Root) -> Result<(), SyncError> {
        let copy_error = |reason: String| SyncError::Copy {
            path: path.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            reason,
        };

        let output = self
            .run(&self.copy_args(path, from, to))
            .map_err(|err| copy_error(format!("could not start {}: {}", self.command, err)))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(copy_error(self.describe_failure(&output)))
        }
    }
}
