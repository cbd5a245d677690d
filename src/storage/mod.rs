//! Storage adapters - Listing, equality checks and copies against real backends

mod memory;
mod rclone;

pub use memory::{CopyRecord, MemoryStorage};
pub use rclone::{RcloneStorage, DEFAULT_RCLONE_COMMAND};

use crate::lister::PathFilter;
use crate::types::{FileEntry, Root, SyncError};

/// Capability the synchronizer needs from a storage backend
///
/// The diff and copy orchestration only ever talks to this trait, so a
/// different tool or a native client library can be swapped in without
/// touching it. All calls are blocking.
pub trait RemoteStorage {
    /// Compare both roots, content hashes included
    ///
    /// `Ok(true)` only when the backend reports the two trees equal. Paths
    /// matched by `filter` are left out of the comparison.
    fn compare_equal(&self, root_a: &Root, root_b: &Root, filter: &PathFilter)
        -> Result<bool, SyncError>;

    /// Every file under `root`, recursively, with content hashes
    fn list_with_hashes(&self, root: &Root) -> Result<Vec<FileEntry>, SyncError>;

    /// Copy `path` from one root to the same relative location in the other
    fn copy(&self, path: &str, from: &Root, to: &Root) -> Result<(), SyncError>;
}
