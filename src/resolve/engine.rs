//! Interactive per-group resolution loop.
//!
//! # Overview
//!
//! For each duplicate group in turn: present its members, read exactly one
//! command line, parse it into a typed [`GroupCommand`], derive a
//! [`DeletionPlan`], and execute the plan with per-file error isolation.
//! Parsing never touches the filesystem and planning is pure, so both are
//! tested without a terminal; the loop itself is generic over `BufRead` and
//! `Write` for the same reason.
//!
//! An interrupt between groups ends the session; an interrupt inside a plan
//! stops further deletions while leaving completed ones alone.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bytesize::ByteSize;
use yansi::Paint;

use crate::actions::{delete_file, files_identical, DeleteError};
use crate::duplicates::DuplicateGroup;

use super::{parse_command, GroupCommand};

/// Options for an interactive resolution session.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Byte-compare each doomed file against the group's retained copy
    /// before deleting it.
    pub paranoid: bool,
}

/// Files marked for removal within one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionPlan {
    /// (group index, path) pairs in the order the operator named them.
    pub targets: Vec<(usize, PathBuf)>,
}

impl DeletionPlan {
    /// Derive a plan from a parsed command. `Skip` yields no plan.
    #[must_use]
    pub fn from_command(group: &DuplicateGroup, command: &GroupCommand) -> Option<Self> {
        let indices: Vec<usize> = match command {
            GroupCommand::Skip => return None,
            GroupCommand::AllButFirst => (1..group.len()).collect(),
            GroupCommand::Indices(indices) => indices.clone(),
        };

        Some(Self {
            targets: indices
                .into_iter()
                .map(|i| (i, group.files[i].path.clone()))
                .collect(),
        })
    }

    /// Indices of group members *not* in the plan, in group order.
    #[must_use]
    pub fn retained(&self, group_len: usize) -> Vec<usize> {
        (0..group_len)
            .filter(|i| !self.targets.iter().any(|(t, _)| t == i))
            .collect()
    }
}

/// Terminal state of one group's resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupOutcome {
    /// A plan was executed; counts cover this group only.
    Done {
        /// Files removed
        deleted: usize,
        /// Files that failed to delete
        failed: usize,
    },
    /// The operator skipped the group.
    Skipped,
    /// The command was invalid; nothing was deleted.
    SkippedWithError,
}

/// Run the interactive loop over every group.
///
/// Reads one decision line per group from `input` and writes all
/// presentation and outcome text to `output`. Returns one [`GroupOutcome`]
/// per group visited; an interrupt or end of input ends the session early,
/// so the result may be shorter than `groups`.
///
/// # Errors
///
/// Only I/O errors on `input`/`output` propagate; deletion failures are
/// reported inline and isolated per file.
pub fn resolve_groups<R: BufRead, W: Write>(
    groups: &[DuplicateGroup],
    input: &mut R,
    output: &mut W,
    options: &ResolveOptions,
    shutdown_flag: Option<&Arc<AtomicBool>>,
) -> std::io::Result<Vec<GroupOutcome>> {
    let mut outcomes = Vec::new();

    for (group_number, group) in groups.iter().enumerate() {
        if is_interrupted(shutdown_flag) {
            writeln!(output, "{}", "Interrupted, leaving remaining groups.".yellow())?;
            break;
        }

        present_group(output, group, group_number, groups.len())?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input: nothing more can be decided.
            break;
        }

        let command = match parse_command(&line, group.len()) {
            Ok(command) => command,
            Err(e) => {
                writeln!(output, "  {} {}", "Invalid choice:".red(), e)?;
                writeln!(output, "  Skipping this group; nothing was deleted.")?;
                outcomes.push(GroupOutcome::SkippedWithError);
                continue;
            }
        };

        let Some(plan) = DeletionPlan::from_command(group, &command) else {
            writeln!(output, "  Skipped.")?;
            outcomes.push(GroupOutcome::Skipped);
            continue;
        };

        let outcome = execute_plan(output, group, &plan, options, shutdown_flag)?;
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

fn is_interrupted(flag: Option<&Arc<AtomicBool>>) -> bool {
    flag.is_some_and(|f| f.load(Ordering::SeqCst))
}

fn present_group<W: Write>(
    output: &mut W,
    group: &DuplicateGroup,
    group_number: usize,
    total_groups: usize,
) -> std::io::Result<()> {
    writeln!(output)?;
    writeln!(
        output,
        "{} {}/{} (digest {}..., {} each)",
        "Group".cyan().bold(),
        group_number + 1,
        total_groups,
        group.digest_prefix(),
        ByteSize::b(group.size)
    )?;

    for (index, file) in group.files.iter().enumerate() {
        writeln!(
            output,
            "  [{index}] {} ({})",
            file.path.display(),
            ByteSize::b(file.size)
        )?;
    }

    writeln!(
        output,
        "  Enter indices to delete (e.g. '1 2'), 'a' to keep only [0], 's' or empty to skip"
    )?;
    write!(output, "> ")?;
    output.flush()
}

/// Execute one plan with per-file error isolation.
fn execute_plan<W: Write>(
    output: &mut W,
    group: &DuplicateGroup,
    plan: &DeletionPlan,
    options: &ResolveOptions,
    shutdown_flag: Option<&Arc<AtomicBool>>,
) -> std::io::Result<GroupOutcome> {
    // Paranoid comparisons run against the first member the plan retains.
    // A plan that dooms every member has no reference copy left to check
    // against, so verification is skipped for it.
    let reference = options
        .paranoid
        .then(|| plan.retained(group.len()).into_iter().next())
        .flatten()
        .map(|i| group.files[i].path.clone());

    let mut deleted = 0;
    let mut failed = 0;

    for (index, path) in &plan.targets {
        if is_interrupted(shutdown_flag) {
            writeln!(
                output,
                "  {}",
                "Interrupted, remaining files in this group were not touched.".yellow()
            )?;
            break;
        }

        if let Some(ref keeper) = reference {
            match files_identical(path, keeper) {
                Ok(true) => {}
                Ok(false) => {
                    let err = DeleteError::ContentsChanged(path.clone());
                    writeln!(output, "  {} [{index}] {}", "ERROR".red(), err)?;
                    failed += 1;
                    continue;
                }
                Err(e) => {
                    writeln!(
                        output,
                        "  {} [{index}] could not verify {}: {}",
                        "ERROR".red(),
                        path.display(),
                        e
                    )?;
                    failed += 1;
                    continue;
                }
            }
        }

        match delete_file(path) {
            Ok(result) => {
                writeln!(output, "  {} [{index}] {}", "Deleted".green(), result.path.display())?;
                deleted += 1;
            }
            Err(e) => {
                writeln!(output, "  {} [{index}] {}", "ERROR".red(), e)?;
                failed += 1;
            }
        }
    }

    Ok(GroupOutcome::Done { deleted, failed })
}
