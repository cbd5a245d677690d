//! Main sync command

use crate::diff::{generate_sync_plan, SyncPlan};
use crate::executor::ExecutionEvent;
use crate::storage::RemoteStorage;
use crate::synchronizer::{SyncReport, Synchronizer};
use crate::types::{Direction, Listing, Root, SyncError};
use crate::ui::ProgressReporter;
use crate::Config;
use console::style;
use indicatif::HumanBytes;
use std::sync::{Arc, Mutex};

/// Run the sync operation
///
/// Returns `None` for a dry run, otherwise the executed report.
pub fn run(config: &Config, quiet: bool) -> Result<Option<SyncReport>, SyncError> {
    let synchronizer = config.synchronizer()?;
    let reporter = Arc::new(Mutex::new(if quiet {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new()
    }));

    let listing_a = list_with_progress(&synchronizer, synchronizer.root_a(), "root A", &reporter)?;
    let listing_b = list_with_progress(&synchronizer, synchronizer.root_b(), "root B", &reporter)?;
    if let Ok(progress) = reporter.lock() {
        progress.end_listing();
    }

    let plan = generate_sync_plan(&listing_a, &listing_b);
    print_plan_summary(&plan, config);

    if config.dry_run {
        print_dry_run_actions(&plan);
        println!("Dry-run mode: no changes were made.");
        return Ok(None);
    }

    let stats = if plan.is_empty() {
        println!("Nothing to sync.");
        Default::default()
    } else {
        if let Ok(mut progress) = reporter.lock() {
            progress.start_transfer(plan.len() as u64);
        }

        let progress_cb = {
            let reporter = Arc::clone(&reporter);
            move |event: &ExecutionEvent| match event {
                ExecutionEvent::ActionStart {
                    direction, path, ..
                } => {
                    if let Ok(progress) = reporter.lock() {
                        progress.set_current_file(*direction, path);
                    }
                }
                ExecutionEvent::ActionSuccess { bytes_copied, .. } => {
                    if let Ok(mut progress) = reporter.lock() {
                        progress.complete_transfer_file(*bytes_copied);
                    }
                }
                ExecutionEvent::ActionError {
                    direction,
                    path,
                    error,
                    ..
                } => {
                    if let Ok(progress) = reporter.lock() {
                        progress.transfer_error(*direction, path, &error.to_string());
                    }
                }
                ExecutionEvent::Complete { stats } => {
                    if let Ok(progress) = reporter.lock() {
                        progress.finish_transfer(
                            stats.completed_actions,
                            stats.failed_actions,
                            stats.bytes_copied,
                        );
                    }
                }
            }
        };

        match synchronizer.execute(&plan, Some(&progress_cb)) {
            Ok(stats) => stats,
            Err(err) => {
                println!("{}", format_error_report(&err, plan.len()));
                return Err(err);
            }
        }
    };

    if config.verify {
        println!("{}", format_verify_result(synchronizer.is_synced()));
    }

    Ok(Some(SyncReport { plan, stats }))
}

fn list_with_progress<S: RemoteStorage>(
    synchronizer: &Synchronizer<S>,
    root: &Root,
    label: &str,
    reporter: &Arc<Mutex<ProgressReporter>>,
) -> Result<Listing, SyncError> {
    if let Ok(progress) = reporter.lock() {
        progress.start_listing(label);
    }
    let listing = synchronizer.list(root)?;
    if let Ok(progress) = reporter.lock() {
        progress.finish_listing(label, listing.total_files, listing.total_size);
    }
    Ok(listing)
}

fn print_plan_summary(plan: &SyncPlan, config: &Config) {
    println!("{}", format_plan_preview(plan, config));
}

fn format_plan_preview(plan: &SyncPlan, config: &Config) -> String {
    format!(
        "Plan:\n  A: {}\n  B: {}\n  A -> B: {}  B -> A: {}\n  Total bytes to transfer: {}",
        config.root_a,
        config.root_b,
        plan.stats.a_to_b,
        plan.stats.b_to_a,
        HumanBytes(plan.stats.total_bytes)
    )
}

fn print_dry_run_actions(plan: &SyncPlan) {
    println!("{}", format_dry_run_actions(plan));
}

fn format_dry_run_actions(plan: &SyncPlan) -> String {
    if plan.is_empty() {
        return "Dry-run actions:\n  (no planned copies)".to_string();
    }

    let mut lines = Vec::with_capacity(plan.len() + 1);
    lines.push("Dry-run actions:".to_string());
    for direction in [Direction::AToB, Direction::BToA] {
        let mut paths: Vec<&str> = plan.actions_in(direction).map(|a| a.path()).collect();
        paths.sort_unstable();
        for path in paths {
            lines.push(format!("  COPY  {}  {}", direction, path));
        }
    }

    lines.join("\n")
}

fn humanize_error(error: &SyncError) -> (String, Option<String>) {
    match error {
        SyncError::Copy { reason, .. } => (
            format!("The storage tool refused the copy ({reason})"),
            Some(
                "Fix the cause and re-run sync; files already copied are kept and only missing ones are retried."
                    .to_string(),
            ),
        ),
        SyncError::Listing { reason, .. } => (
            format!("A root could not be listed ({reason})"),
            Some("Check the root address and the rclone remote configuration.".to_string()),
        ),
        SyncError::Io(io) => (
            format!("I/O operation failed: {}", io),
            Some("Check that the rclone command exists and is executable.".to_string()),
        ),
        SyncError::Config(msg) => (msg.clone(), None),
    }
}

fn format_error_report(error: &SyncError, planned: usize) -> String {
    let (message, suggestion) = humanize_error(error);
    let mut lines = vec![format!("{} {}", style("Sync aborted:").red().bold(), message)];
    if let SyncError::Copy { path, from, to, .. } = error {
        lines.push(format!("  Path: {}", path));
        lines.push(format!("  From: {}", from));
        lines.push(format!("  To:   {}", to));
    }
    lines.push(format!("  Planned copies: {}", planned));
    if let Some(suggestion) = suggestion {
        lines.push(format!("  Try: {}", suggestion));
    }
    lines.join("\n")
}

fn format_verify_result(synced: bool) -> String {
    if synced {
        format!("{} roots are identical", style("Verified:").green().bold())
    } else {
        format!(
            "{} roots still differ. Files present on both sides with different content are not reconciled by sync.",
            style("Warning:").yellow().bold()
        )
    }
}
