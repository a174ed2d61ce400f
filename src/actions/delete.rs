//! Permanent file deletion with per-file error isolation.
//!
//! # Overview
//!
//! Deletions are irreversible; there is no trash layer and no undo. What the
//! module does guarantee:
//! - each target is attempted independently (one failure never aborts the
//!   rest of a plan)
//! - an interrupt stops further deletions without disturbing completed ones
//! - every outcome is reported, success or failure, per file
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::actions::delete::delete_file;
//! use std::path::Path;
//!
//! match delete_file(Path::new("/path/to/duplicate.txt")) {
//!     Ok(result) => println!("Removed {} ({} bytes)", result.path.display(), result.size),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (already deleted or moved).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Contents no longer match the retained copy (paranoid verification).
    #[error("contents changed since scan, refusing to delete: {0}")]
    ContentsChanged(PathBuf),

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Result of one successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was removed.
    pub path: PathBuf,
    /// Size of the removed file in bytes.
    pub size: u64,
}

/// Aggregate outcome of a deletion plan.
#[derive(Debug, Default)]
pub struct BatchDeleteResult {
    /// Successfully removed files.
    pub successes: Vec<DeleteResult>,
    /// Failed removals with their errors.
    pub failures: Vec<(PathBuf, DeleteError)>,
    /// Total bytes freed.
    pub bytes_freed: u64,
    /// Whether the plan was cut short by an interrupt.
    pub interrupted: bool,
}

impl BatchDeleteResult {
    /// Number of successful removals.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of failed removals.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Check whether every removal succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line human-readable summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let freed = bytesize::ByteSize::b(self.bytes_freed);
        if self.all_succeeded() {
            format!("Deleted {} file(s), freed {}", self.success_count(), freed)
        } else {
            format!(
                "Deleted {} file(s), {} failed, freed {}",
                self.success_count(),
                self.failure_count(),
                freed
            )
        }
    }
}

/// Permanently delete a single file.
///
/// The size is captured before removal so the caller can report bytes freed.
///
/// # Errors
///
/// - [`DeleteError::NotFound`] if the file no longer exists
/// - [`DeleteError::PermissionDenied`] if removal is not allowed
/// - [`DeleteError::Io`] for any other failure
pub fn delete_file(path: &Path) -> Result<DeleteResult, DeleteError> {
    let metadata = fs::metadata(path).map_err(|e| convert_io_error(path, e))?;
    let size = metadata.len();

    fs::remove_file(path).map_err(|e| convert_io_error(path, e))?;

    log::info!("Deleted {} ({} bytes)", path.display(), size);
    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
    })
}

/// Execute a deletion plan with per-file error isolation.
///
/// Targets are processed in order, never in parallel, so outcomes are
/// deterministic and reportable. If `shutdown_flag` flips mid-plan, no
/// further deletions are issued and the result is marked interrupted;
/// already-completed removals stand.
pub fn delete_batch(
    targets: &[PathBuf],
    shutdown_flag: Option<&Arc<AtomicBool>>,
) -> BatchDeleteResult {
    let mut result = BatchDeleteResult::default();

    for path in targets {
        if shutdown_flag.is_some_and(|f| f.load(Ordering::SeqCst)) {
            log::warn!("Deletion interrupted; {} target(s) left untouched", {
                targets.len() - result.success_count() - result.failure_count()
            });
            result.interrupted = true;
            break;
        }

        match delete_file(path) {
            Ok(deleted) => {
                result.bytes_freed += deleted.size;
                result.successes.push(deleted);
            }
            Err(e) => {
                log::warn!("Failed to delete {}: {}", path.display(), e);
                result.failures.push((path.clone(), e));
            }
        }
    }

    result
}

fn convert_io_error(path: &Path, error: io::Error) -> DeleteError {
    match error.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: error,
        },
    }
}
