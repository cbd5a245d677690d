//! FileEntry - A single file in a root listing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Hash kinds tried by [`FileEntry::hash`], most preferred first
const PREFERRED_HASHES: [&str; 2] = ["sha1", "md5"];

/// Represents a file under a root
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the root, `/`-separated
    pub path: String,

    /// Size in bytes, `None` when the backend cannot tell
    pub size: Option<u64>,

    /// Last modification time (UTC)
    pub mod_time: Option<DateTime<Utc>>,

    /// MIME type reported by the backend
    pub mime_type: Option<String>,

    /// Content digests keyed by hash kind (`md5`, `sha1`, ...)
    pub hashes: BTreeMap<String, String>,
}

impl FileEntry {
    /// Create an entry carrying only a path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size: None,
            mod_time: None,
            mime_type: None,
            hashes: BTreeMap::new(),
        }
    }

    /// Set the size for this entry
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Add a digest of the given kind
    pub fn with_hash(mut self, kind: impl Into<String>, digest: impl Into<String>) -> Self {
        self.hashes.insert(kind.into(), digest.into());
        self
    }

    /// Preferred content digest
    ///
    /// Picks `sha1`, then `md5`, then whichever kind sorts first.
    pub fn hash(&self) -> Option<&str> {
        PREFERRED_HASHES
            .iter()
            .find_map(|kind| self.hashes.get(*kind))
            .or_else(|| self.hashes.values().next())
            .map(String::as_str)
    }

    /// Check if any digest is known for this entry
    pub fn has_hash(&self) -> bool {
        !self.hashes.is_empty()
    }

    /// Size in bytes, treating unknown as zero
    pub fn size_or_zero(&self) -> u64 {
        self.size.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_file_entry() {
        let entry = FileEntry::new("docs/readme.md");

        assert_eq!(entry.path, "docs/readme.md");
        assert_eq!(entry.size, None);
        assert!(entry.mod_time.is_none());
        assert!(!entry.has_hash());
        assert_eq!(entry.hash(), None);
        assert_eq!(entry.size_or_zero(), 0);
    }

    #[test]
    fn test_hash_prefers_sha1() {
        let entry = FileEntry::new("a.txt")
            .with_hash("md5", "m")
            .with_hash("sha1", "s")
            .with_hash("crc32", "c");

        assert_eq!(entry.hash(), Some("s"));
    }

    #[test]
    fn test_hash_falls_back_to_md5() {
        let entry = FileEntry::new("a.txt")
            .with_hash("quickxor", "q")
            .with_hash("md5", "m");

        assert_eq!(entry.hash(), Some("m"));
    }

    #[test]
    fn test_hash_falls_back_to_first_kind() {
        let entry = FileEntry::new("a.txt")
            .with_hash("whirlpool", "w")
            .with_hash("dropbox", "d");

        assert_eq!(entry.hash(), Some("d"));
    }

    #[test]
    fn test_with_size() {
        let entry = FileEntry::new("big.bin").with_size(4096);
        assert_eq!(entry.size, Some(4096));
        assert_eq!(entry.size_or_zero(), 4096);
    }

    #[test]
    fn test_serialization_keeps_hashes() {
        let entry = FileEntry::new("a.txt").with_size(3).with_hash("md5", "abc");

        let serialized = serde_json::to_string(&entry).expect("Failed to serialize");
        let deserialized: FileEntry =
            serde_json::from_str(&serialized).expect("Failed to deserialize");

        assert_eq!(entry, deserialized);
    }
}
