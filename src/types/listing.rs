//! Listing - Files under one root, keyed by relative path

use super::{FileEntry, Root};
use std::collections::HashMap;
use std::time::Duration;

/// Snapshot of a root's files
///
/// Built fresh for every operation and dropped afterwards; never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    /// Map: relative path → FileEntry
    pub entries: HashMap<String, FileEntry>,

    /// Aggregate statistics
    pub total_size: u64,
    pub total_files: usize,

    /// Listing metadata
    pub list_duration: Duration,
    pub root: Root,
}

impl Listing {
    /// Create a new empty Listing
    pub fn new(root: Root) -> Self {
        Self {
            entries: HashMap::new(),
            total_size: 0,
            total_files: 0,
            list_duration: Duration::from_secs(0),
            root,
        }
    }

    /// Insert a file entry keyed by its path
    ///
    /// If the path already exists, the old entry is replaced and statistics are adjusted.
    pub fn insert(&mut self, entry: FileEntry) {
        if let Some(old_entry) = self.entries.get(&entry.path) {
            self.total_size = self.total_size.saturating_sub(old_entry.size_or_zero());
            self.total_files = self.total_files.saturating_sub(1);
        }

        self.total_size += entry.size_or_zero();
        self.total_files += 1;
        self.entries.insert(entry.path.clone(), entry);
    }

    /// Get a file entry by path
    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.get(path)
    }

    /// Check if a path exists in the listing
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Return the number of file entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the listing is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterator over all entries (path, FileEntry pairs)
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FileEntry)> {
        self.entries.iter()
    }

    /// Iterator over just the paths
    pub fn paths(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Entries whose path is not a key of `other`
    ///
    /// Presence is decided on the path alone; hashes are not looked at.
    pub fn missing_from<'a>(&'a self, other: &'a Listing) -> impl Iterator<Item = &'a FileEntry> {
        self.entries
            .iter()
            .filter(move |(path, _)| !other.contains(path))
            .map(|(_, entry)| entry)
    }

    /// Set the listing duration once the external call returns
    pub fn set_list_duration(&mut self, duration: Duration) {
        self.list_duration = duration;
    }
}
