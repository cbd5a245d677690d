//! Two-way synchronizer between a pair of roots

use crate::diff::{generate_sync_plan, SyncPlan};
use crate::executor::{execute_plan, ExecutionCallback, ExecutionStats};
use crate::lister::{Lister, PathFilter};
use crate::storage::{RcloneStorage, RemoteStorage};
use crate::types::{Listing, Root, SyncError};
use tracing::{debug, info, warn};

/// Outcome of a successful [`Synchronizer::synchronize`] call
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// The copies that were planned and executed
    pub plan: SyncPlan,

    /// Execution counters
    pub stats: ExecutionStats,
}

impl SyncReport {
    /// Check if the roots already held the same paths
    pub fn was_noop(&self) -> bool {
        self.plan.is_empty()
    }
}

/// Keeps two roots holding the same set of paths
///
/// Stateless apart from the roots, the storage adapter and the exclude
/// filter, all fixed at construction. Every call lists both roots afresh.
pub struct Synchronizer<S: RemoteStorage> {
    root_a: Root,
    root_b: Root,
    storage: S,
    filter: PathFilter,
}

impl Synchronizer<RcloneStorage> {
    /// Synchronizer driving the given rclone-compatible command
    pub fn with_rclone(root_a: Root, root_b: Root, command: impl Into<String>) -> Self {
        Self::new(root_a, root_b, RcloneStorage::new(command))
    }
}

impl<S: RemoteStorage> Synchronizer<S> {
    pub fn new(root_a: Root, root_b: Root, storage: S) -> Self {
        Self {
            root_a,
            root_b,
            storage,
            filter: PathFilter::empty(),
        }
    }

    /// Hide matching paths from listing, planning and equality checks
    pub fn with_filter(mut self, filter: PathFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn root_a(&self) -> &Root {
        &self.root_a
    }

    pub fn root_b(&self) -> &Root {
        &self.root_b
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Check whether both roots hold identical files, content included
    ///
    /// Delegated to the storage adapter's own comparison. A failing
    /// comparison is reported as `false` just like a real difference; the
    /// two cases are not told apart.
    pub fn is_synced(&self) -> bool {
        match self
            .storage
            .compare_equal(&self.root_a, &self.root_b, &self.filter)
        {
            Ok(equal) => {
                debug!(root_a = %self.root_a, root_b = %self.root_b, equal, "Compared roots");
                equal
            }
            Err(err) => {
                warn!(
                    root_a = %self.root_a,
                    root_b = %self.root_b,
                    error = %err,
                    "Equality check failed, treating roots as not synced"
                );
                false
            }
        }
    }

    /// List one root through the storage adapter, honouring excludes
    pub fn list(&self, root: &Root) -> Result<Listing, SyncError> {
        Lister::new(&self.storage, &self.filter).list(root)
    }

    /// List both roots, A first
    pub fn listings(&self) -> Result<(Listing, Listing), SyncError> {
        let listing_a = self.list(&self.root_a)?;
        let listing_b = self.list(&self.root_b)?;
        Ok((listing_a, listing_b))
    }

    /// Compute the copies [`synchronize`](Self::synchronize) would perform
    pub fn plan(&self) -> Result<SyncPlan, SyncError> {
        let (listing_a, listing_b) = self.listings()?;
        Ok(generate_sync_plan(&listing_a, &listing_b))
    }

    /// Copy every path present on only one side to the other side
    ///
    /// Additive only: nothing is deleted and files present on both sides
    /// are never touched, even when their contents differ. A listing failure
    /// aborts before any copy; a copy failure aborts the remaining copies.
    pub fn synchronize(&self) -> Result<SyncReport, SyncError> {
        self.synchronize_with(None)
    }

    /// [`synchronize`](Self::synchronize), reporting progress to `on_event`
    pub fn synchronize_with(
        &self,
        on_event: Option<&ExecutionCallback>,
    ) -> Result<SyncReport, SyncError> {
        let plan = self.plan()?;
        info!(
            root_a = %self.root_a,
            root_b = %self.root_b,
            a_to_b = plan.stats.a_to_b,
            b_to_a = plan.stats.b_to_a,
            "Synchronizing"
        );

        let stats = self.execute(&plan, on_event)?;
        Ok(SyncReport { plan, stats })
    }

    /// Run an already computed plan against this pair of roots
    pub fn execute(
        &self,
        plan: &SyncPlan,
        on_event: Option<&ExecutionCallback>,
    ) -> Result<ExecutionStats, SyncError> {
        execute_plan(plan, &self.storage, &self.root_a, &self.root_b, on_event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::ExecutionEvent;
    use crate::storage::MemoryStorage;
    use std::sync::{Arc, Mutex};

    fn pair(storage: MemoryStorage) -> Synchronizer<MemoryStorage> {
        Synchronizer::new(
            Root::new("root1").unwrap(),
            Root::new("root2").unwrap(),
            storage,
        )
    }

    #[test]
    fn test_with_rclone_uses_given_command() {
        let sync = Synchronizer::with_rclone(
            Root::new("a").unwrap(),
            Root::new("b").unwrap(),
            "/opt/bin/rclone",
        );
        assert_eq!(sync.storage().command(), "/opt/bin/rclone");
        assert_eq!(sync.root_a().as_str(), "a");
        assert_eq!(sync.root_b().as_str(), "b");
    }

    #[test]
    fn test_plan_does_not_copy() {
        let storage = MemoryStorage::new();
        storage.put("root1", "a.txt", "a");
        storage.create_root("root2");
        let sync = pair(storage);

        let plan = sync.plan().unwrap();
        assert_eq!(plan.stats.a_to_b, 1);
        assert!(sync.storage().copies().is_empty());
        assert!(sync.storage().paths("root2").is_empty());
    }

    #[test]
    fn test_report_was_noop_when_already_synced() {
        let storage = MemoryStorage::new();
        storage.put("root1", "x.txt", "x");
        storage.put("root2", "x.txt", "x");

        let report = pair(storage).synchronize().unwrap();
        assert!(report.was_noop());
        assert_eq!(report.stats.completed_actions, 0);
    }

    #[test]
    fn test_synchronize_with_reports_events_in_copy_order() {
        let storage = MemoryStorage::new();
        storage.put("root1", "a.txt", "aa");
        storage.put("root2", "b.txt", "bbb");
        let sync = pair(storage);

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&events);
        let callback = move |event: &ExecutionEvent| {
            let label = match event {
                ExecutionEvent::ActionStart { direction, path, .. } => {
                    format!("start:{direction}:{path}")
                }
                ExecutionEvent::ActionSuccess {
                    path, bytes_copied, ..
                } => format!("ok:{path}:{bytes_copied}"),
                ExecutionEvent::ActionError { path, .. } => format!("error:{path}"),
                ExecutionEvent::Complete { stats } => {
                    format!("complete:{}/{}", stats.completed_actions, stats.total_actions)
                }
            };
            sink.lock().unwrap().push(label);
        };

        let report = sync.synchronize_with(Some(&callback)).unwrap();
        assert_eq!(report.stats.completed_actions, 2);
        assert_eq!(report.stats.bytes_copied, 5);

        let events = events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "start:A -> B:a.txt",
                "ok:a.txt:2",
                "start:B -> A:b.txt",
                "ok:b.txt:3",
                "complete:2/2",
            ]
        );
    }

    #[test]
    fn test_is_synced_false_when_root_missing() {
        let storage = MemoryStorage::new();
        storage.put("root1", "x.txt", "x");
        assert!(!pair(storage).is_synced());
    }
}
