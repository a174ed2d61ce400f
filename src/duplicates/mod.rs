//! Duplicate detection: digest accumulation and group management.
//!
//! Submodules:
//! - [`groups`]: the [`DuplicateGroup`] type and its accessors
//! - [`index`]: digest → ordered file list accumulation
//! - [`finder`]: the walk → hash → group orchestrator

pub mod finder;
pub mod groups;
pub mod index;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::DuplicateGroup;
pub use index::DigestIndex;
