//! Root listing

mod filter;
mod lsjson;

pub use filter::PathFilter;
pub use lsjson::parse_lsjson;

use crate::storage::RemoteStorage;
use crate::types::{Listing, Root, SyncError};
use std::time::Instant;
use tracing::debug;

/// Builds a [`Listing`] for a root through a storage adapter
pub struct Lister<'a, S: RemoteStorage + ?Sized> {
    storage: &'a S,
    filter: &'a PathFilter,
}

impl<'a, S: RemoteStorage + ?Sized> Lister<'a, S> {
    pub fn new(storage: &'a S, filter: &'a PathFilter) -> Self {
        Self { storage, filter }
    }

    /// List every file under `root`, keyed by relative path
    ///
    /// Excluded paths are dropped. A later record for an already seen path
    /// replaces the earlier one.
    pub fn list(&self, root: &Root) -> Result<Listing, SyncError> {
        let started = Instant::now();
        let entries = self.storage.list_with_hashes(root)?;

        let mut listing = Listing::new(root.clone());
        let mut excluded = 0usize;
        for entry in entries {
            if self.filter.is_excluded(&entry.path) {
                excluded += 1;
                continue;
            }
            listing.insert(entry);
        }
        listing.set_list_duration(started.elapsed());

        debug!(
            root = %root,
            files = listing.total_files,
            bytes = listing.total_size,
            excluded,
            elapsed_ms = listing.list_duration.as_millis() as u64,
            "Listed root"
        );
        Ok(listing)
    }
}
