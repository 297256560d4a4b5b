//! Per-requirement progress on stderr
//!
//! One bar spans the requirements file. It is never drawn in quiet or JSON
//! runs, so stdout stays clean for piping.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {prefix:.yellow} {msg}";

/// Tracks which requirement is being resolved and how many were skipped
pub struct CheckProgress {
    bar: Option<ProgressBar>,
    skipped: usize,
}

impl CheckProgress {
    /// Bar over `total` requirements, drawn only when `visible`
    pub fn new(total: usize, visible: bool) -> Self {
        let bar = visible.then(|| {
            let bar = ProgressBar::new(total as u64);
            let style = ProgressStyle::default_bar()
                .template(TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓▒░");
            bar.set_style(style);
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        Self { bar, skipped: 0 }
    }

    /// Announce the requirement now being looked up
    pub fn checking(&self, name: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(format!("checking {}", name));
        }
    }

    /// The current requirement produced an outcome
    pub fn resolved(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// The current requirement could not be looked up
    pub fn skipped(&mut self) {
        self.skipped += 1;
        if let Some(bar) = &self.bar {
            bar.set_prefix(format!("{} skipped", self.skipped));
            bar.inc(1);
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Remove the bar before results are printed
    pub fn finish(self) {
        if let Some(bar) = self.bar {
            bar.finish_and_clear();
        }
    }
}
