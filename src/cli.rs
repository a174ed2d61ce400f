//! Command-line interface definitions.
//!
//! Built on the clap derive API: global flags for verbosity and color, plus
//! one subcommand per mode.
//!
//! # Example
//!
//! ```bash
//! # Interactive resolution, choosing the root from a menu
//! dupesweep interactive
//!
//! # Interactive resolution of a known directory
//! dupesweep interactive ~/Downloads --skip-hidden
//!
//! # Batch report (dry run, nothing deleted)
//! dupesweep batch ~/Downloads
//!
//! # Batch deletion, keeping the first copy of each group
//! dupesweep batch ~/Downloads --delete
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Interactive duplicate file remover using SHA-256 content hashing.
///
/// Dupesweep scans a directory tree, groups identical files by content
/// digest, and either walks you through each group interactively or applies
/// a keep-first batch policy.
#[derive(Debug, Parser)]
#[command(name = "dupesweep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve duplicate groups one at a time at a prompt
    Interactive(InteractiveArgs),
    /// Report duplicates, optionally deleting all but the first copy
    Batch(BatchArgs),
}

/// Scan options shared by both modes.
#[derive(Debug, Args, Default)]
pub struct ScanArgs {
    /// Skip hidden files and directories (starting with .)
    #[arg(long)]
    pub skip_hidden: bool,

    /// Paths to exclude from the scan (can be given multiple times)
    ///
    /// The running executable is always excluded.
    #[arg(long = "exclude", value_name = "PATH")]
    pub exclude: Vec<PathBuf>,

    /// Number of hashing threads (1 = fully sequential)
    #[arg(long, value_name = "N")]
    pub io_threads: Option<usize>,

    /// Minimum file size in bytes to consider
    #[arg(long, value_name = "BYTES")]
    pub min_size: Option<u64>,

    /// Byte-compare files against the kept copy before deleting
    #[arg(long)]
    pub paranoid: bool,
}

/// Arguments for the interactive subcommand.
#[derive(Debug, Args)]
pub struct InteractiveArgs {
    /// Directory to scan; prompts with a location menu when omitted
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Scan options
    #[command(flatten)]
    pub scan: ScanArgs,
}

/// Arguments for the batch subcommand.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// Directory to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Apply deletions instead of only reporting them
    #[arg(long)]
    pub delete: bool,

    /// Skip the confirmation prompt (for scripting)
    #[arg(short = 'y', long, requires = "delete")]
    pub yes: bool,

    /// Scan options
    #[command(flatten)]
    pub scan: ScanArgs,
}
