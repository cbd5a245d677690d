//! Error types for duosync

use thiserror::Error;

/// Error types for duosync operations
#[derive(Debug, Error)]
pub enum SyncError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listing a root failed or returned output that does not parse
    #[error("Could not list files on {root}: {reason}")]
    Listing { root: String, reason: String },

    /// A single copy invocation failed
    #[error("Could not copy file {path} from {from} to {to}: {reason}")]
    Copy {
        path: String,
        from: String,
        to: String,
        reason: String,
    },
}

impl SyncError {
    /// Check if this error came from listing a root
    pub fn is_listing_error(&self) -> bool {
        matches!(self, SyncError::Listing { .. })
    }

    /// Check if this error came from a copy invocation
    pub fn is_copy_error(&self) -> bool {
        matches!(self, SyncError::Copy { .. })
    }

    /// Check if this error is a configuration problem
    pub fn is_config_error(&self) -> bool {
        matches!(self, SyncError::Config(_))
    }

    /// Path of the failing copy, if any
    pub fn failed_path(&self) -> Option<&str> {
        match self {
            SyncError::Copy { path, .. } => Some(path),
            _ => None,
        }
    }
}
