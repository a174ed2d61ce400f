//! Interactive and batch resolution of duplicate groups.
//!
//! Resolution is split so every stage is independently testable:
//! - [`command`]: one text line parsed into a typed [`GroupCommand`] before
//!   any deletion logic runs
//! - [`engine`]: the per-group present → decide → execute loop, generic over
//!   its input and output streams
//! - [`batch`]: the non-interactive keep-first flow with dry-run reporting
//!
//! State machine per group: `Presented` then one of `Skip`, `AllButFirst`,
//! `IndicesChosen`, `InvalidChoice`; chosen plans execute to `Done`, invalid
//! input lands in `SkippedWithError`. No group is revisited within a run.

pub mod batch;
pub mod command;
pub mod engine;

pub use batch::{apply_keep_first, deletion_candidates, print_report, BatchReport};
pub use command::{parse_command, CommandError, GroupCommand};
pub use engine::{resolve_groups, DeletionPlan, GroupOutcome, ResolveOptions};
