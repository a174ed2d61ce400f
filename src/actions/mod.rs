//! File actions: deletion and pre-deletion verification.
//!
//! Deletion here is permanent (`fs::remove_file`) and per-file isolated: one
//! failed removal never blocks the rest of a plan, and there is no rollback.
//! The verify module backs paranoid mode, comparing a doomed file against the
//! retained copy byte for byte before it is removed.

pub mod delete;
pub mod verify;

pub use delete::{delete_batch, delete_file, BatchDeleteResult, DeleteError, DeleteResult};
pub use verify::files_identical;
