//! Progress reporting

use crate::types::Direction;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::time::Instant;

/// Progress reporter for sync operations
pub struct ProgressReporter {
    list_bar: ProgressBar,
    transfer_bar: ProgressBar,
    transfer_started_at: Option<Instant>,
    transferred_bytes: u64,
}

impl ProgressReporter {
    /// Create a new progress reporter drawing to stderr
    pub fn new() -> Self {
        let list_bar = ProgressBar::new_spinner();
        list_bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Self::styled(list_bar, ProgressBar::new(0))
    }

    /// Reporter that draws nothing (quiet mode)
    pub fn hidden() -> Self {
        Self::styled(ProgressBar::hidden(), ProgressBar::hidden())
    }

    fn styled(list_bar: ProgressBar, transfer_bar: ProgressBar) -> Self {
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            list_bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        if let Ok(style) =
            ProgressStyle::with_template("{bar:30.cyan/blue} {pos}/{len} files | {msg}")
        {
            transfer_bar.set_style(style.progress_chars("=>-"));
        }

        Self {
            list_bar,
            transfer_bar,
            transfer_started_at: None,
            transferred_bytes: 0,
        }
    }

    /// Mark start of a listing phase.
    pub fn start_listing(&self, label: &str) {
        self.list_bar.set_message(format!("Listing {}...", label));
    }

    /// Mark completion of a listing phase.
    pub fn finish_listing(&self, label: &str, files: usize, bytes: u64) {
        self.list_bar.set_message(format!(
            "Listed {}: {} files | {}",
            label,
            files,
            HumanBytes(bytes)
        ));
    }

    /// Stop the listing spinner.
    pub fn end_listing(&self) {
        self.list_bar.finish();
    }

    /// Initialize transfer phase progress.
    pub fn start_transfer(&mut self, total_transfer_files: u64) {
        self.transfer_started_at = Some(Instant::now());
        self.transferred_bytes = 0;
        self.transfer_bar.set_length(total_transfer_files);
        self.transfer_bar.set_position(0);
        self.transfer_bar
            .set_message("Starting transfer...".to_string());
    }

    /// Update current file indicator.
    pub fn set_current_file(&self, direction: Direction, path: &str) {
        self.transfer_bar
            .set_message(format!("{} {}", direction, path));
    }

    /// Mark one transfer file complete and refresh throughput display.
    pub fn complete_transfer_file(&mut self, bytes: u64) {
        self.transferred_bytes = self.transferred_bytes.saturating_add(bytes);
        self.transfer_bar.inc(1);

        let throughput = self.current_throughput_bps();
        self.transfer_bar.set_message(format!(
            "{} transferred | {}/s",
            HumanBytes(self.transferred_bytes),
            HumanBytes(throughput)
        ));
    }

    /// Surface a copy error in transfer phase.
    pub fn transfer_error(&self, direction: Direction, path: &str, err: &str) {
        self.transfer_bar
            .println(format!("ERROR {} {}: {}", direction, path, err));
    }

    /// Finalize transfer phase.
    pub fn finish_transfer(&self, succeeded: usize, failed: usize, bytes: u64) {
        let throughput = self.current_throughput_bps();
        self.transfer_bar.finish_with_message(format!(
            "Copies complete: {} succeeded, {} failed | {} total | {}/s",
            succeeded,
            failed,
            HumanBytes(bytes),
            HumanBytes(throughput)
        ));
    }

    fn current_throughput_bps(&self) -> u64 {
        match self.transfer_started_at {
            Some(started) => {
                let elapsed = started.elapsed();
                let secs = elapsed.as_secs_f64();
                if secs > 0.0 {
                    (self.transferred_bytes as f64 / secs) as u64
                } else {
                    0
                }
            }
            None => 0,
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}
