//! Command grammar for per-group decisions.
//!
//! One line of operator input becomes a typed [`GroupCommand`] before any
//! deletion logic runs. The grammar:
//!
//! ```text
//! command  = empty | skip | all | indices
//! skip     = "s" | "skip"            (case-insensitive)
//! all      = "a" | "all"             (case-insensitive)
//! indices  = integer { whitespace integer }
//! ```
//!
//! A single bad token or out-of-range index invalidates the entire command;
//! there is no partial acceptance, so an invalid line can never delete
//! anything.

use thiserror::Error;

/// A parsed per-group decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupCommand {
    /// Leave every member of the group in place.
    Skip,
    /// Delete every member except index 0, the first-discovered copy.
    AllButFirst,
    /// Delete exactly the members at these indices (validated, deduplicated,
    /// in the order first mentioned).
    Indices(Vec<usize>),
}

/// Why a command line was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// A token was neither a keyword nor a non-negative integer.
    #[error("invalid token '{0}': expected file indices, 'a' or 's'")]
    InvalidToken(String),

    /// An index does not name a member of this group.
    #[error("index {index} out of range: group has {group_len} files (0-{})", group_len - 1)]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Number of files in the group
        group_len: usize,
    },
}

/// Parse one line of input against a group of `group_len` members.
///
/// Word tokens are case-insensitive; leading and trailing whitespace is
/// ignored. Duplicate indices are collapsed so a file is never planned for
/// deletion twice.
///
/// # Errors
///
/// Any unparseable token or out-of-range index rejects the whole line.
pub fn parse_command(input: &str, group_len: usize) -> Result<GroupCommand, CommandError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Ok(GroupCommand::Skip);
    }

    match trimmed.to_lowercase().as_str() {
        "s" | "skip" => return Ok(GroupCommand::Skip),
        "a" | "all" => return Ok(GroupCommand::AllButFirst),
        _ => {}
    }

    let mut indices = Vec::new();
    for token in trimmed.split_whitespace() {
        let index: usize = token
            .parse()
            .map_err(|_| CommandError::InvalidToken(token.to_string()))?;

        if index >= group_len {
            return Err(CommandError::IndexOutOfRange { index, group_len });
        }

        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    Ok(GroupCommand::Indices(indices))
}
