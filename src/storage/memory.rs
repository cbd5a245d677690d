//! In-memory storage backend
//!
//! Keeps every root as a map of path → bytes and hashes content with blake3.
//! Copies are recorded so callers can see exactly what a sync did, and
//! individual paths or roots can be made to fail.

use super::RemoteStorage;
use crate::lister::PathFilter;
use crate::types::{FileEntry, Root, SyncError};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Hash kind reported for in-memory files
pub const MEMORY_HASH_KIND: &str = "blake3";

/// One copy performed by [`MemoryStorage`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyRecord {
    pub path: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    roots: HashMap<String, BTreeMap<String, Vec<u8>>>,
    failing_copies: HashSet<String>,
    failing_roots: HashSet<String>,
    copies: Vec<CopyRecord>,
}

/// Storage backend living entirely in process memory
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: Mutex<MemoryState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make sure `root` exists, even with no files in it
    pub fn create_root(&self, root: &str) {
        self.state().roots.entry(root.to_string()).or_default();
    }

    /// Write a file, creating the root if needed
    pub fn put(&self, root: &str, path: &str, content: impl AsRef<[u8]>) {
        self.state()
            .roots
            .entry(root.to_string())
            .or_default()
            .insert(path.to_string(), content.as_ref().to_vec());
    }

    /// Content of a file, if present
    pub fn read(&self, root: &str, path: &str) -> Option<Vec<u8>> {
        self.state()
            .roots
            .get(root)
            .and_then(|files| files.get(path).cloned())
    }

    /// Sorted set of paths under `root` (empty for unknown roots)
    pub fn paths(&self, root: &str) -> BTreeSet<String> {
        self.state()
            .roots
            .get(root)
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Reject every future copy of `path`, in either direction
    pub fn fail_copy(&self, path: &str) {
        self.state().failing_copies.insert(path.to_string());
    }

    /// Reject every future listing of `root`
    pub fn fail_listing(&self, root: &str) {
        self.state().failing_roots.insert(root.to_string());
    }

    /// Copies performed so far, in order
    pub fn copies(&self) -> Vec<CopyRecord> {
        self.state().copies.clone()
    }

    fn digest(content: &[u8]) -> String {
        blake3::hash(content).to_hex().to_string()
    }

    fn hashed_files(
        state: &MemoryState,
        root: &Root,
        filter: &PathFilter,
    ) -> Result<BTreeMap<String, String>, SyncError> {
        let files = state.roots.get(root.as_str()).ok_or_else(|| SyncError::Listing {
            root: root.to_string(),
            reason: "directory not found".to_string(),
        })?;
        Ok(files
            .iter()
            .filter(|(path, _)| !filter.is_excluded(path))
            .map(|(path, content)| (path.clone(), Self::digest(content)))
            .collect())
    }
}

impl RemoteStorage for MemoryStorage {
    fn compare_equal(
        &self,
        root_a: &Root,
        root_b: &Root,
        filter: &PathFilter,
    ) -> Result<bool, SyncError> {
        let state = self.state();
        let a = Self::hashed_files(&state, root_a, filter)?;
        let b = Self::hashed_files(&state, root_b, filter)?;
        Ok(a == b)
    }

    fn list_with_hashes(&self, root: &Root) -> Result<Vec<FileEntry>, SyncError> {
        let state = self.state();
        if state.failing_roots.contains(root.as_str()) {
            return Err(SyncError::Listing {
                root: root.to_string(),
                reason: "listing rejected by backend".to_string(),
            });
        }

        let files = state.roots.get(root.as_str()).ok_or_else(|| SyncError::Listing {
            root: root.to_string(),
            reason: "directory not found".to_string(),
        })?;

        Ok(files
            .iter()
            .map(|(path, content)| {
                FileEntry::new(path.clone())
                    .with_size(content.len() as u64)
                    .with_hash(MEMORY_HASH_KIND, Self::digest(content))
            })
            .collect())
    }

    fn copy(&self, path: &str, from: &Root, to: &Root) -> Result<(), SyncError> {
        let mut state = self.state();
        let copy_error = |reason: &str| SyncError::Copy {
            path: path.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.to_string(),
        };

        if state.failing_copies.contains(path) {
            return Err(copy_error("copy rejected by backend"));
        }

        let content = state
            .roots
            .get(from.as_str())
            .and_then(|files| files.get(path))
            .cloned()
            .ok_or_else(|| copy_error("source file not found"))?;

        state
            .roots
            .entry(to.to_string())
            .or_default()
            .insert(path.to_string(), content);
        state.copies.push(CopyRecord {
            path: path.to_string(),
            from: from.to_string(),
            to: to.to_string(),
        });
        Ok(())
    }
}
