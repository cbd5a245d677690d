//! Root - Address of one side of a sync pair

use super::SyncError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque storage location (local path or rclone remote such as `gdrive:docs`)
///
/// No internal structure is modeled; the address is handed to the storage
/// adapter as-is. The only rule enforced here is that it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Root(String);

impl Root {
    /// Create a root, rejecting empty or whitespace-only addresses
    pub fn new(address: impl Into<String>) -> Result<Self, SyncError> {
        let address = address.into();
        if address.trim().is_empty() {
            return Err(SyncError::Config("Root address cannot be empty".to_string()));
        }
        Ok(Self(address))
    }

    /// The raw address string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Address of `path` under this root
    ///
    /// A separator is only inserted when the root does not already end with
    /// one. Remote roots such as `remote:` take the path directly, since
    /// `remote:/path` means something else to rclone.
    pub fn join(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.0.ends_with('/') || self.0.ends_with(':') {
            format!("{}{}", self.0, path)
        } else {
            format!("{}/{}", self.0, path)
        }
    }

    /// Check if both addresses name the same location
    ///
    /// Trailing `/` separators are ignored, so `dir` and `dir/` match.
    pub fn same_location(&self, other: &Root) -> bool {
        let trimmed = |address: &str| -> String {
            let stripped = address.trim_end_matches('/');
            if stripped.is_empty() {
                "/".to_string()
            } else {
                stripped.to_string()
            }
        };
        trimmed(&self.0) == trimmed(&other.0)
    }
}

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Root {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Root {
    type Error = SyncError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Root::new(value)
    }
}

impl TryFrom<&str> for Root {
    type Error = SyncError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Root::new(value)
    }
}

impl From<Root> for String {
    fn from(root: Root) -> Self {
        root.0
    }
}
