//! Scanner module: directory traversal and content hashing.
//!
//! The scanner is split into two submodules:
//! - [`walker`]: recursive discovery of regular files under a root
//! - [`hasher`]: streaming SHA-256 digests of file contents
//!
//! # Example
//!
//! ```no_run
//! use dupesweep::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("/home/user/Downloads"), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

pub use hasher::{digest_to_hex, hash_bytes, hex_to_digest, Digest, Hasher};
pub use walker::Walker;

/// One discovered regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Path to the file as produced by the walk
    pub path: PathBuf,
    /// File size in bytes at discovery time
    pub size: u64,
}

impl FileRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Skip hidden files and directories (names starting with `.`).
    pub skip_hidden: bool,

    /// Minimum file size to include, in bytes.
    pub min_size: Option<u64>,

    /// Canonicalized paths to exclude from the walk.
    ///
    /// The caller seeds this with the running executable so a scan that
    /// covers the tool's own location never offers it for deletion.
    pub excluded: Vec<PathBuf>,
}

impl WalkerConfig {
    /// Add a path to the exclusion set, canonicalizing when possible.
    ///
    /// Paths that cannot be canonicalized (already deleted, permission
    /// denied) are kept as given; exclusion then falls back to a literal
    /// comparison.
    #[must_use]
    pub fn with_excluded(mut self, path: &std::path::Path) -> Self {
        let canonical = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.excluded.push(canonical);
        self
    }
}

/// Errors surfaced while walking a directory tree.
///
/// All of these are non-fatal to a scan: the walker reports them and keeps
/// going.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied for a file or subdirectory.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An entry vanished between listing and inspection.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// Any other I/O failure during traversal.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Hashing a discovered file failed.
    #[error(transparent)]
    Hash(#[from] HashError),
}

/// Errors surfaced while hashing a single file.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The file was not found (deleted between walk and hash).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Hashing was abandoned because shutdown was requested.
    #[error("hashing interrupted: {0}")]
    Interrupted(PathBuf),

    /// Any other read failure.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}
