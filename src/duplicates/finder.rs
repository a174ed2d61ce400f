//! Duplicate finder: orchestrates walk, hash, and accumulation.
//!
//! # Overview
//!
//! The pipeline is a single full pass: walk the tree, digest every file, and
//! accumulate digest → files in a [`DigestIndex`](super::DigestIndex). The
//! index is complete before any interactive resolution begins, so nothing
//! races the prompt loop.
//!
//! Hashing may fan out across a bounded worker pool purely for throughput;
//! worker results are collected back into one ordered vector and accumulated
//! by a single writer, so discovery order and the "first copy" of each group
//! are identical to a sequential run.
//!
//! An interrupt during the scan is not an error: the finder stops walking and
//! hashing, then reports whatever duplicates were confirmed among files
//! processed so far, with [`ScanSummary::interrupted`] set.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (groups, summary) = finder.find_duplicates(Path::new("/some/dir")).unwrap();
//! println!("{} duplicate groups", summary.duplicate_groups);
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use crate::progress::ProgressCallback;
use crate::scanner::{Digest, FileRecord, HashError, Hasher, ScanError, Walker, WalkerConfig};

use super::{DigestIndex, DuplicateGroup};

/// Configuration for the duplicate finder.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Number of hashing worker threads; 0 or 1 means fully sequential.
    pub io_threads: usize,
    /// Walker configuration for the traversal phase.
    pub walker_config: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback.
    pub progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("io_threads", &self.io_threads)
            .field("walker_config", &self.walker_config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl FinderConfig {
    /// Set the hashing worker count.
    #[must_use]
    pub fn with_io_threads(mut self, threads: usize) -> Self {
        self.io_threads = threads;
        self
    }

    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = config;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Summary statistics from one scan.
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Files discovered by the walk
    pub total_files: usize,
    /// Files successfully hashed
    pub hashed_files: usize,
    /// Files excluded because hashing failed
    pub failed_files: usize,
    /// Confirmed duplicate groups
    pub duplicate_groups: usize,
    /// Redundant copies across all groups (originals not counted)
    pub duplicate_files: usize,
    /// Bytes reclaimable if every redundant copy were removed
    pub reclaimable_space: u64,
    /// Wall-clock duration of the scan
    pub scan_duration: std::time::Duration,
    /// Whether the scan was cut short by an interrupt
    pub interrupted: bool,
    /// Non-fatal errors collected along the way
    pub scan_errors: Vec<ScanError>,
}

impl ScanSummary {
    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize::b(self.reclaimable_space).to_string()
    }
}

/// Fatal errors for a scan that never got started.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The requested root does not exist.
    #[error("path not found: {0}")]
    PathNotFound(PathBuf),

    /// The requested root is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// The walk → hash → accumulate orchestrator.
pub struct DuplicateFinder {
    config: FinderConfig,
    hasher: Hasher,
}

impl DuplicateFinder {
    /// Create a finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        let mut hasher = Hasher::new();
        if let Some(ref flag) = config.shutdown_flag {
            hasher = hasher.with_shutdown_flag(Arc::clone(flag));
        }
        Self { config, hasher }
    }

    /// Create a finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Scan a directory tree and return its duplicate groups.
    ///
    /// # Errors
    ///
    /// Only path validation is fatal: the root must exist and be a
    /// directory. Everything after that is collected in the summary, and an
    /// interrupt yields partial results rather than an error.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let start = std::time::Instant::now();
        let mut summary = ScanSummary::default();

        if !root.exists() {
            return Err(FinderError::PathNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        log::info!("Scanning {}", root.display());
        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_start(root);
        }

        // Walk first: the record list fixes discovery order for everything
        // downstream.
        let mut walker = Walker::new(root, self.config.walker_config.clone());
        if let Some(ref flag) = self.config.shutdown_flag {
            walker = walker.with_shutdown_flag(Arc::clone(flag));
        }

        let mut records = Vec::new();
        for result in walker.walk() {
            match result {
                Ok(record) => records.push(record),
                Err(e) => summary.scan_errors.push(e),
            }
        }
        summary.total_files = records.len();

        if self.config.is_shutdown_requested() {
            summary.interrupted = true;
        }

        log::info!("Found {} files to hash", records.len());

        let outcomes = self.hash_records(records);

        // Single-writer accumulation: worker results arrive as one ordered
        // vector, so the index sees files in discovery order.
        let mut index = DigestIndex::new();
        for (record, outcome) in outcomes {
            match outcome {
                Ok(digest) => {
                    summary.hashed_files += 1;
                    index.insert(digest, record);
                }
                Err(HashError::Interrupted(_)) => {
                    summary.interrupted = true;
                }
                Err(e) => {
                    log::warn!("Failed to hash {}: {}", record.path.display(), e);
                    summary.failed_files += 1;
                    summary.scan_errors.push(ScanError::Hash(e));
                }
            }
        }

        if self.config.is_shutdown_requested() {
            summary.interrupted = true;
        }

        let groups = index.into_duplicates();
        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_space = groups.iter().map(DuplicateGroup::wasted_space).sum();
        summary.scan_duration = start.elapsed();

        if let Some(ref callback) = self.config.progress_callback {
            callback.on_scan_end(summary.hashed_files);
        }

        log::info!(
            "Scan complete: {} groups, {} redundant copies, {} reclaimable{}",
            summary.duplicate_groups,
            summary.duplicate_files,
            summary.reclaimable_display(),
            if summary.interrupted {
                " (interrupted, partial)"
            } else {
                ""
            }
        );

        Ok((groups, summary))
    }

    /// Digest every record, sequentially or on a bounded pool.
    ///
    /// Output order always equals input order; `par_iter().collect()`
    /// preserves it, which keeps parallel runs byte-identical to sequential
    /// ones.
    fn hash_records(
        &self,
        records: Vec<FileRecord>,
    ) -> Vec<(FileRecord, Result<Digest, HashError>)> {
        if records.is_empty() {
            return Vec::new();
        }

        let hashed_so_far = std::sync::atomic::AtomicUsize::new(0);
        let hash_one = |record: FileRecord| {
            if self.config.is_shutdown_requested() {
                let path = record.path.clone();
                return (record, Err(HashError::Interrupted(path)));
            }
            let outcome = self.hasher.hash_file(&record.path);
            if outcome.is_ok() {
                let done = hashed_so_far.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(ref callback) = self.config.progress_callback {
                    callback.on_file_hashed(done, &record.path);
                }
            }
            (record, outcome)
        };

        if self.config.io_threads <= 1 {
            return records.into_iter().map(hash_one).collect();
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.io_threads)
            .build();

        match pool {
            Ok(pool) => pool.install(|| records.into_par_iter().map(hash_one).collect()),
            Err(e) => {
                log::warn!("Failed to build hashing pool, falling back to sequential: {e}");
                records.into_iter().map(hash_one).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, content: &[u8]) {
        File::create(dir.join(name))
            .unwrap()
            .write_all(content)
            .unwrap();
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let finder = DuplicateFinder::with_defaults();
        let result = finder.find_duplicates(Path::new("/no/such/root/xyz"));
        assert!(matches!(result, Err(FinderError::PathNotFound(_))));
    }

    #[test]
    fn test_file_root_is_fatal() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "plain.txt", b"not a directory");

        let finder = DuplicateFinder::with_defaults();
        let result = finder.find_duplicates(&dir.path().join("plain.txt"));
        assert!(matches!(result, Err(FinderError::NotADirectory(_))));
    }

    #[test]
    fn test_basic_duplicate_detection() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a.txt", b"hello");
        write_file(dir.path(), "b.txt", b"hello");
        write_file(dir.path(), "c.txt", b"world");

        let finder = DuplicateFinder::with_defaults();
        let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 2);
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.hashed_files, 3);
        assert_eq!(summary.duplicate_files, 1);
        assert!(!summary.interrupted);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let dir = tempdir().unwrap();
        for i in 0..6 {
            write_file(dir.path(), &format!("dup{i}.txt"), b"shared payload");
        }
        write_file(dir.path(), "unique.txt", b"one of a kind");

        let sequential = DuplicateFinder::new(FinderConfig::default().with_io_threads(1));
        let parallel = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));

        let (seq_groups, _) = sequential.find_duplicates(dir.path()).unwrap();
        let (par_groups, _) = parallel.find_duplicates(dir.path()).unwrap();

        assert_eq!(seq_groups.len(), par_groups.len());
        for (a, b) in seq_groups.iter().zip(par_groups.iter()) {
            assert_eq!(a.digest, b.digest);
            assert_eq!(a.paths(), b.paths());
        }
    }

    #[test]
    fn test_shutdown_before_scan_reports_partial() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a.txt", b"hello");
        write_file(dir.path(), "b.txt", b"hello");

        let flag = Arc::new(AtomicBool::new(true));
        let finder = DuplicateFinder::new(FinderConfig::default().with_shutdown_flag(flag));

        let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();
        assert!(groups.is_empty());
        assert!(summary.interrupted);
    }

    #[test]
    fn test_reclaimable_space() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "a.bin", &[7u8; 1000]);
        write_file(dir.path(), "b.bin", &[7u8; 1000]);
        write_file(dir.path(), "c.bin", &[7u8; 1000]);

        let finder = DuplicateFinder::with_defaults();
        let (_, summary) = finder.find_duplicates(dir.path()).unwrap();

        assert_eq!(summary.reclaimable_space, 2000);
    }
}
