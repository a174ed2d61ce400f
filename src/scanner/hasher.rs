//! Streaming SHA-256 file hasher.
//!
//! # Overview
//!
//! Computes content digests by reading files in fixed-size chunks, so memory
//! use stays bounded no matter how large the target is. I/O failures come
//! back as typed [`HashError`] values; the scan logs and skips the file
//! instead of aborting.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use sha2::{Digest as _, Sha256};

use super::HashError;

/// Read buffer size for streaming hash computation (64 KiB).
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// SHA-256 digest as a fixed-size byte array.
pub type Digest = [u8; 32];

/// Content hasher with optional shutdown awareness.
///
/// The hasher itself is stateless between files; it exists as a struct so a
/// shutdown flag can be attached once and shared across a whole scan.
#[derive(Debug, Default, Clone)]
pub struct Hasher {
    shutdown_flag: Option<Arc<AtomicBool>>,
}

impl Hasher {
    /// Create a new hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a shutdown flag checked between read chunks.
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

    /// Compute the SHA-256 digest of a file's full content.
    ///
    /// Streams the file in [`HASH_BUFFER_SIZE`] chunks; never loads the
    /// whole file into memory.
    ///
    /// # Errors
    ///
    /// - [`HashError::NotFound`] if the file vanished
    /// - [`HashError::PermissionDenied`] if it cannot be read
    /// - [`HashError::Interrupted`] if shutdown was requested mid-read
    /// - [`HashError::Io`] for any other read failure
    pub fn hash_file(&self, path: &Path) -> Result<Digest, HashError> {
        let file = File::open(path).map_err(|e| Self::convert_io_error(path, e))?;

        let mut reader = BufReader::with_capacity(HASH_BUFFER_SIZE, file);
        let mut hasher = Sha256::new();
        let mut buffer = [0u8; HASH_BUFFER_SIZE];

        loop {
            if self.is_shutdown_requested() {
                return Err(HashError::Interrupted(path.to_path_buf()));
            }

            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| Self::convert_io_error(path, e))?;

            if bytes_read == 0 {
                break;
            }

            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize().into())
    }

    fn convert_io_error(path: &Path, error: std::io::Error) -> HashError {
        match error.kind() {
            std::io::ErrorKind::NotFound => HashError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => {
                HashError::PermissionDenied(path.to_path_buf())
            }
            _ => HashError::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}

/// Compute the SHA-256 digest of an in-memory byte slice.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> Digest {
    Sha256::digest(data).into()
}

/// Render a digest as a lowercase hex string.
#[must_use]
pub fn digest_to_hex(digest: &Digest) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Parse a 64-character hex string back into a digest.
#[must_use]
pub fn hex_to_digest(hex: &str) -> Option<Digest> {
    if hex.len() != 64 {
        return None;
    }

    let mut digest = [0u8; 32];
    for (i, chunk) in hex.as_bytes().chunks(2).enumerate() {
        let pair = std::str::from_utf8(chunk).ok()?;
        digest[i] = u8::from_str_radix(pair, 16).ok()?;
    }
    Some(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_known_digest() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "hello.txt", b"Hello, World!");

        let digest = Hasher::new().hash_file(&path).unwrap();

        // Known SHA-256 of "Hello, World!"
        assert_eq!(
            digest_to_hex(&digest),
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[test]
    fn test_identical_content_identical_digest() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same content");
        let b = write_file(&dir, "b.txt", b"same content");

        let hasher = Hasher::new();
        assert_eq!(hasher.hash_file(&a).unwrap(), hasher.hash_file(&b).unwrap());
    }

    #[test]
    fn test_different_content_different_digest() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"first");
        let b = write_file(&dir, "b.txt", b"second");

        let hasher = Hasher::new();
        assert_ne!(hasher.hash_file(&a).unwrap(), hasher.hash_file(&b).unwrap());
    }

    #[test]
    fn test_streaming_matches_in_memory() {
        let dir = TempDir::new().unwrap();
        // Larger than one read buffer so multiple chunks are exercised.
        let content: Vec<u8> = (0..HASH_BUFFER_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let path = write_file(&dir, "big.bin", &content);

        let streamed = Hasher::new().hash_file(&path).unwrap();
        assert_eq!(streamed, hash_bytes(&content));
    }

    #[test]
    fn test_missing_file() {
        let result = Hasher::new().hash_file(Path::new("/no/such/file.txt"));
        assert!(matches!(result, Err(HashError::NotFound(_))));
    }

    #[test]
    fn test_interrupted_hashing() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.txt", b"content");

        let flag = Arc::new(AtomicBool::new(true));
        let hasher = Hasher::new().with_shutdown_flag(flag);

        assert!(matches!(
            hasher.hash_file(&path),
            Err(HashError::Interrupted(_))
        ));
    }

    #[test]
    fn test_hex_round_trip() {
        let digest = hash_bytes(b"round trip");
        let hex = digest_to_hex(&digest);
        assert_eq!(hex.len(), 64);
        assert_eq!(hex_to_digest(&hex).unwrap(), digest);
    }

    #[test]
    fn test_hex_to_digest_invalid() {
        assert!(hex_to_digest("short").is_none());
        assert!(hex_to_digest(&"z".repeat(64)).is_none());
    }
}
