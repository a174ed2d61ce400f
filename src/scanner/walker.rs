//! Directory walker built on `walkdir`.
//!
//! # Overview
//!
//! Enumerates every regular file beneath a root, depth-first with children
//! sorted by file name so "first discovered" is stable across runs. Directory
//! symlinks are never followed, which rules out traversal cycles. Unreadable
//! subtrees are reported as [`ScanError`] values in the output stream instead
//! of aborting the walk.
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! let files: Vec<_> = walker.walk().filter_map(Result::ok).collect();
//! println!("found {} files", files.len());
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use walkdir::WalkDir;

use super::{FileRecord, ScanError, WalkerConfig};

/// Recursive file discovery under a single root.
#[derive(Debug)]
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Walker {
    /// Create a walker for the given root.
    #[must_use]
    pub fn new(root: &Path, config: WalkerConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            shutdown_flag: None,
        }
    }

    /// Attach a shutdown flag; when it flips, iteration ends early.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Check a candidate file against the exclusion set.
    ///
    /// Exclusion entries are canonical, so the candidate is canonicalized
    /// for the comparison; if that fails the literal path is compared.
    fn is_excluded(&self, path: &Path) -> bool {
        if self.config.excluded.is_empty() {
            return false;
        }
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.config.excluded.iter().any(|e| *e == canonical)
    }

    fn is_hidden(entry: &walkdir::DirEntry) -> bool {
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
    }

    /// Walk the tree, yielding file records.
    ///
    /// Errors are yielded as [`ScanError`] values rather than stopping
    /// iteration; the caller decides whether to log or collect them.
    /// Traversal order is deterministic (children sorted by file name).
    pub fn walk(&self) -> impl Iterator<Item = Result<FileRecord, ScanError>> + '_ {
        let skip_hidden = self.config.skip_hidden;
        let root = self.root.clone();

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                // Never filter the root itself, even if the root dir is hidden.
                if entry.path() == root {
                    return true;
                }
                !(skip_hidden && Self::is_hidden(entry))
            })
            .filter_map(move |entry_result| {
                if self.is_shutdown_requested() {
                    log::debug!("Walker: shutdown requested, stopping iteration");
                    return None;
                }

                match entry_result {
                    Ok(entry) => self.process_entry(&entry),
                    Err(e) => Some(Err(self.convert_walk_error(e))),
                }
            })
    }

    fn process_entry(&self, entry: &walkdir::DirEntry) -> Option<Result<FileRecord, ScanError>> {
        // Regular files only; directories, symlinks, sockets etc. are skipped.
        // file_type() here is the symlink metadata since follow_links is off,
        // so a symlink to a file is not reported as a file either.
        if !entry.file_type().is_file() {
            return None;
        }

        let path = entry.path();

        if self.is_excluded(path) {
            log::debug!("Excluded from scan: {}", path.display());
            return None;
        }

        let size = match entry.metadata() {
            Ok(m) => m.len(),
            Err(e) => {
                return Some(Err(self.convert_walk_error(e)));
            }
        };

        if let Some(min) = self.config.min_size {
            if size < min {
                log::trace!("Skipping file below min size ({}): {}", size, path.display());
                return None;
            }
        }

        Some(Ok(FileRecord::new(path.to_path_buf(), size)))
    }

    fn convert_walk_error(&self, error: walkdir::Error) -> ScanError {
        let path = error
            .path()
            .map_or_else(|| self.root.clone(), Path::to_path_buf);

        match error.io_error().map(std::io::Error::kind) {
            Some(std::io::ErrorKind::PermissionDenied) => {
                log::warn!("Permission denied: {}", path.display());
                ScanError::PermissionDenied(path)
            }
            Some(std::io::ErrorKind::NotFound) => {
                log::debug!("Entry vanished during walk: {}", path.display());
                ScanError::NotFound(path)
            }
            _ => {
                log::warn!("Walker error for {}: {}", path.display(), error);
                ScanError::Io {
                    path,
                    source: error
                        .into_io_error()
                        .unwrap_or_else(|| std::io::Error::other("walk error")),
                }
            }
        }
    }
}
