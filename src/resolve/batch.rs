//! Non-interactive keep-first resolution.
//!
//! # Overview
//!
//! Batch mode never asks per group: the first-discovered copy of each group
//! is always kept and every other member is a deletion candidate. The
//! default is a dry run that only lists candidates; applying deletions is a
//! separate, explicitly requested step, gated behind a confirmation at the
//! application boundary. Rendering, candidate selection, and execution are
//! separate functions so each is testable on its own.

use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use bytesize::ByteSize;
use yansi::Paint;

use crate::actions::{delete_batch, files_identical};
use crate::duplicates::DuplicateGroup;

/// Outcome of a batch apply pass.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files removed
    pub deleted: usize,
    /// Files that failed to delete
    pub failed: usize,
    /// Bytes freed
    pub bytes_freed: u64,
    /// Whether the pass was cut short by an interrupt
    pub interrupted: bool,
}

/// Deletion candidates under the keep-first policy: every member of every
/// group except index 0, in group order.
#[must_use]
pub fn deletion_candidates(groups: &[DuplicateGroup]) -> Vec<PathBuf> {
    groups
        .iter()
        .flat_map(|g| g.files.iter().skip(1).map(|f| f.path.clone()))
        .collect()
}

/// Print the duplicate report: every group with its members, keepers marked,
/// and the reclaimable total.
///
/// # Errors
///
/// Propagates I/O errors from `output`.
pub fn print_report<W: Write>(groups: &[DuplicateGroup], output: &mut W) -> std::io::Result<()> {
    if groups.is_empty() {
        writeln!(output, "No duplicate files found.")?;
        return Ok(());
    }

    writeln!(
        output,
        "Found {} duplicate group(s):",
        groups.len()
    )?;

    for group in groups {
        writeln!(
            output,
            "\n{} {} ({} each)",
            "Digest".cyan(),
            group.digest_prefix(),
            ByteSize::b(group.size)
        )?;
        for (index, file) in group.files.iter().enumerate() {
            let marker = if index == 0 { "keep  " } else { "delete" };
            writeln!(output, "  {} {}", marker, file.path.display())?;
        }
    }

    let reclaimable: u64 = groups.iter().map(DuplicateGroup::wasted_space).sum();
    let candidates: usize = groups.iter().map(DuplicateGroup::duplicate_count).sum();
    writeln!(
        output,
        "\n{candidates} file(s) marked for deletion, {} reclaimable",
        ByteSize::b(reclaimable)
    )?;

    Ok(())
}

/// Apply keep-first deletions across all groups.
///
/// Each group's candidates are deleted with per-file isolation; with
/// `paranoid` set, every candidate is byte-compared against its group's
/// index 0 first and skipped (as a failure) on divergence. An interrupt
/// stops the pass between files.
///
/// # Errors
///
/// Propagates I/O errors from `output`; deletion failures are reported
/// inline, never propagated.
pub fn apply_keep_first<W: Write>(
    groups: &[DuplicateGroup],
    output: &mut W,
    paranoid: bool,
    shutdown_flag: Option<&Arc<AtomicBool>>,
) -> std::io::Result<BatchReport> {
    let mut report = BatchReport::default();

    for group in groups {
        if report.interrupted {
            break;
        }

        let keeper = &group.files[0].path;
        let mut targets = Vec::new();

        for file in group.files.iter().skip(1) {
            if paranoid {
                match files_identical(&file.path, keeper) {
                    Ok(true) => {}
                    Ok(false) => {
                        writeln!(
                            output,
                            "  {} contents changed since scan, keeping {}",
                            "WARN".yellow(),
                            file.path.display()
                        )?;
                        report.failed += 1;
                        continue;
                    }
                    Err(e) => {
                        writeln!(
                            output,
                            "  {} could not verify {}: {}",
                            "WARN".yellow(),
                            file.path.display(),
                            e
                        )?;
                        report.failed += 1;
                        continue;
                    }
                }
            }
            targets.push(file.path.clone());
        }

        let result = delete_batch(&targets, shutdown_flag);
        for deleted in &result.successes {
            writeln!(output, "  {} {}", "Deleted".green(), deleted.path.display())?;
        }
        for (path, error) in &result.failures {
            writeln!(output, "  {} {}: {}", "ERROR".red(), path.display(), error)?;
        }

        report.deleted += result.success_count();
        report.failed += result.failure_count();
        report.bytes_freed += result.bytes_freed;
        report.interrupted |= result.interrupted;
    }

    writeln!(
        output,
        "\nDeleted {} file(s), {} failed, freed {}{}",
        report.deleted,
        report.failed,
        ByteSize::b(report.bytes_freed),
        if report.interrupted { " (interrupted)" } else { "" }
    )?;

    Ok(report)
}
