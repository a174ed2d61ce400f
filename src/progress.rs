//! Scan progress reporting via indicatif.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Progress callback for the scan pipeline.
///
/// Implemented by UI layers; the finder itself stays terminal-free.
pub trait ProgressCallback: Send + Sync {
    /// Called once when the scan of `root` begins.
    fn on_scan_start(&self, root: &Path);

    /// Called after each file is hashed, with the running count.
    fn on_file_hashed(&self, count: usize, path: &Path);

    /// Called once when the scan completes, with the final hash count.
    fn on_scan_end(&self, total: usize);
}

/// Spinner-based progress display for terminal runs.
///
/// Quiet mode produces a hidden bar so callers don't need to special-case.
pub struct ScanProgress {
    bar: ProgressBar,
}

impl ScanProgress {
    /// Create a progress display.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar
        };
        Self { bar }
    }
}

impl ProgressCallback for ScanProgress {
    fn on_scan_start(&self, root: &Path) {
        self.bar.set_message(format!("Scanning {}", root.display()));
    }

    fn on_file_hashed(&self, count: usize, _path: &Path) {
        // Coarse updates keep the display cheap on fast filesystems.
        if count % 50 == 0 {
            self.bar.set_message(format!("Hashed {count} files"));
        }
    }

    fn on_scan_end(&self, total: usize) {
        self.bar
            .finish_with_message(format!("Hashed {total} files"));
    }
}
