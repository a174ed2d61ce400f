//! Duplicate group type.

use std::path::PathBuf;

use crate::scanner::{digest_to_hex, Digest, FileRecord};

/// A confirmed group of files sharing one content digest.
///
/// Members are in discovery order; index 0 is the first-discovered copy and
/// is the one retained by the "all" selection and by batch keep-first mode.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// SHA-256 digest shared by every member
    pub digest: Digest,
    /// File size in bytes (identical content implies identical size)
    pub size: u64,
    /// Member files in discovery order
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create a new group.
    #[must_use]
    pub fn new(digest: Digest, size: u64, files: Vec<FileRecord>) -> Self {
        Self { digest, size, files }
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (total minus the one original).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes reclaimable if every copy but one were removed.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as a lowercase hex string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        digest_to_hex(&self.digest)
    }

    /// Short digest prefix for display purposes only.
    #[must_use]
    pub fn digest_prefix(&self) -> String {
        let mut hex = self.digest_hex();
        hex.truncate(12);
        hex
    }

    /// Paths of all members, in discovery order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::hash_bytes;

    fn group_of(n: usize) -> DuplicateGroup {
        let files = (0..n)
            .map(|i| FileRecord::new(PathBuf::from(format!("/tmp/file{i}.txt")), 100))
            .collect();
        DuplicateGroup::new(hash_bytes(b"content"), 100, files)
    }

    #[test]
    fn test_duplicate_count_and_waste() {
        let group = group_of(3);
        assert_eq!(group.len(), 3);
        assert_eq!(group.duplicate_count(), 2);
        assert_eq!(group.wasted_space(), 200);
    }

    #[test]
    fn test_two_member_group() {
        let group = group_of(2);
        assert_eq!(group.duplicate_count(), 1);
        assert_eq!(group.wasted_space(), 100);
    }

    #[test]
    fn test_digest_prefix_length() {
        let group = group_of(2);
        assert_eq!(group.digest_prefix().len(), 12);
        assert!(group.digest_hex().starts_with(&group.digest_prefix()));
    }

    #[test]
    fn test_paths_preserve_order() {
        let group = group_of(3);
        let paths = group.paths();
        assert_eq!(paths[0], PathBuf::from("/tmp/file0.txt"));
        assert_eq!(paths[2], PathBuf::from("/tmp/file2.txt"));
    }
}
