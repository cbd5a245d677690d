//! Executor - Runs a sync plan through a storage adapter

use crate::diff::SyncPlan;
use crate::storage::RemoteStorage;
use crate::types::{CopyAction, Direction, Root, SyncError};
use std::io::Error;
use tracing::{info, warn};

/// Execution progress statistics for a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of actions in the input plan.
    pub total_actions: usize,
    /// Number of successfully processed actions.
    pub completed_actions: usize,
    /// Number of failed actions (zero or one: the first failure stops the run).
    pub failed_actions: usize,
    /// Aggregate known bytes of copied files.
    pub bytes_copied: u64,
}

impl ExecutionStats {
    /// Actions never attempted because an earlier copy failed
    pub fn skipped_actions(&self) -> usize {
        self.total_actions
            .saturating_sub(self.completed_actions + self.failed_actions)
    }
}

/// Events emitted while executing a plan.
#[derive(Debug)]
pub enum ExecutionEvent {
    /// Copy started.
    ActionStart {
        index: usize,
        total: usize,
        direction: Direction,
        path: String,
    },
    /// Copy succeeded.
    ActionSuccess {
        index: usize,
        total: usize,
        direction: Direction,
        path: String,
        bytes_copied: u64,
    },
    /// Copy failed; execution stops after this event.
    ActionError {
        index: usize,
        total: usize,
        direction: Direction,
        path: String,
        error: SyncError,
    },
    /// Plan execution finished (with or without a failure).
    Complete { stats: ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback = dyn Fn(&ExecutionEvent) + Send + Sync;

/// Execute a sync plan
///
/// Copies run one at a time in plan order. The first failing copy aborts the
/// run: files already copied stay where they are, the rest are not attempted,
/// and the copy error is returned.
pub fn execute_plan<S: RemoteStorage + ?Sized>(
    plan: &SyncPlan,
    storage: &S,
    root_a: &Root,
    root_b: &Root,
    on_event: Option<&ExecutionCallback>,
) -> Result<ExecutionStats, SyncError> {
    let mut stats = ExecutionStats {
        total_actions: plan.actions.len(),
        ..Default::default()
    };

    for (idx, action) in plan.actions.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            ExecutionEvent::ActionStart {
                index,
                total: stats.total_actions,
                direction: action.direction,
                path: action.path().to_string(),
            },
        );

        match execute_action(action, storage, root_a, root_b) {
            Ok(bytes) => {
                stats.completed_actions += 1;
                stats.bytes_copied += bytes;

                emit_event(
                    on_event,
                    ExecutionEvent::ActionSuccess {
                        index,
                        total: stats.total_actions,
                        direction: action.direction,
                        path: action.path().to_string(),
                        bytes_copied: bytes,
                    },
                );
            }
            Err(err) => {
                stats.failed_actions += 1;
                warn!(
                    path = action.path(),
                    direction = %action.direction,
                    error = %err,
                    remaining = stats.skipped_actions(),
                    "Copy failed, aborting sync"
                );

                emit_event(
                    on_event,
                    ExecutionEvent::ActionError {
                        index,
                        total: stats.total_actions,
                        direction: action.direction,
                        path: action.path().to_string(),
                        error: clone_error_for_event(&err),
                    },
                );
                emit_event(
                    on_event,
                    ExecutionEvent::Complete {
                        stats: stats.clone(),
                    },
                );
                return Err(err);
            }
        }
    }

    emit_event(
        on_event,
        ExecutionEvent::Complete {
            stats: stats.clone(),
        },
    );
    Ok(stats)
}

fn execute_action<S: RemoteStorage + ?Sized>(
    action: &CopyAction,
    storage: &S,
    root_a: &Root,
    root_b: &Root,
) -> Result<u64, SyncError> {
    let (from, to) = action.direction.endpoints(root_a, root_b);
    info!(path = action.path(), from = %from, to = %to, "Copying file");
    storage.copy(action.path(), from, to)?;
    Ok(action.entry.size_or_zero())
}

fn emit_event(on_event: Option<&ExecutionCallback>, event: ExecutionEvent) {
    if let Some(callback) = on_event {
        callback(&event);
    }
}

fn clone_error_for_event(error: &SyncError) -> SyncError {
    match error {
        SyncError::Io(e) => SyncError::Io(Error::new(e.kind(), e.to_string())),
        SyncError::Config(msg) => SyncError::Config(msg.clone()),
        SyncError::Listing { root, reason } => SyncError::Listing {
            root: root.clone(),
            reason: reason.clone(),
        },
        SyncError::Copy {
            path,
            from,
            to,
            reason,
        } => SyncError::Copy {
            path: path.clone(),
            from: from.clone(),
            to: to.clone(),
            reason: reason.clone(),
        },
    }
}
