//! Digest index: the accumulation phase of duplicate detection.
//!
//! # Overview
//!
//! A single-pass, in-memory mapping from content digest to the ordered list
//! of files carrying it. Insertion order within a group is discovery order,
//! and groups themselves are emitted in first-discovery order, so output is
//! deterministic for a deterministic walk. Total memory is O(number of
//! files), the accepted ceiling for interactive single-host scans.
//!
//! Files whose digest computation failed never enter the index; the caller
//! logs those and moves on.

use std::collections::HashMap;

use crate::scanner::{Digest, FileRecord};

use super::DuplicateGroup;

/// Accumulator mapping digests to the files that share them.
///
/// Built by exactly one writer; the interactive phase only reads the
/// filtered [`DuplicateGroup`] output.
#[derive(Debug, Default)]
pub struct DigestIndex {
    groups: HashMap<Digest, Vec<FileRecord>>,
    /// Digests in order of first sighting, for deterministic emission.
    order: Vec<Digest>,
}

impl DigestIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully hashed file.
    pub fn insert(&mut self, digest: Digest, record: FileRecord) {
        let entry = self.groups.entry(digest).or_insert_with(|| {
            self.order.push(digest);
            Vec::new()
        });
        entry.push(record);
    }

    /// Number of distinct digests seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of files recorded.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Consume the index, keeping only digests with two or more files.
    ///
    /// Groups come out in first-discovery order; members stay in discovery
    /// order. Every returned group has `len() >= 2`.
    #[must_use]
    pub fn into_duplicates(mut self) -> Vec<DuplicateGroup> {
        let mut duplicates = Vec::new();

        for digest in self.order.drain(..) {
            let Some(files) = self.groups.remove(&digest) else {
                continue;
            };
            if files.len() < 2 {
                continue;
            }
            let size = files[0].size;
            log::debug!(
                "Duplicate group {}: {} files of {} bytes",
                crate::scanner::digest_to_hex(&digest),
                files.len(),
                size
            );
            duplicates.push(DuplicateGroup::new(digest, size, files));
        }

        duplicates
    }
}
