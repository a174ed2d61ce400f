//! Dupesweep - Interactive Duplicate File Remover
//!
//! A cross-platform CLI tool that finds duplicate files by SHA-256 content
//! hash and resolves them either interactively, one group at a time, or in a
//! non-interactive keep-first batch pass with a dry-run default.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod locations;
pub mod logging;
pub mod progress;
pub mod resolve;
pub mod scanner;
pub mod signal;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use cli::{BatchArgs, Cli, Commands, InteractiveArgs, ScanArgs};
use config::Config;
use duplicates::{DuplicateFinder, FinderConfig, ScanSummary};
use error::ExitCode;
use progress::ScanProgress;
use resolve::ResolveOptions;
use scanner::WalkerConfig;
use signal::ShutdownHandler;

/// Run the application and return the exit code to use.
///
/// # Errors
///
/// Returns an error for conditions `main` maps to non-zero exit codes:
/// an invalid root path ([`duplicates::FinderError`]) or any unexpected
/// failure.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let handler = signal::install_handler()?;
    let config = Config::load();

    match cli.command {
        Commands::Interactive(args) => run_interactive(args, &config, &handler, cli.quiet),
        Commands::Batch(args) => run_batch(args, &config, &handler, cli.quiet),
    }
}

/// Merge stored config defaults with CLI scan flags; flags win.
fn effective_options(scan: &ScanArgs, config: &Config) -> (WalkerConfig, usize, bool) {
    let mut walker_config = WalkerConfig {
        skip_hidden: scan.skip_hidden || config.skip_hidden,
        min_size: scan.min_size.or(config.min_size),
        ..Default::default()
    };

    // Never offer the running binary for deletion, wherever it lives.
    match std::env::current_exe() {
        Ok(exe) => walker_config = walker_config.with_excluded(&exe),
        Err(e) => log::warn!("Could not resolve own executable path: {e}"),
    }
    for path in &scan.exclude {
        walker_config = walker_config.with_excluded(path);
    }

    let io_threads = scan.io_threads.unwrap_or(config.io_threads);
    let paranoid = scan.paranoid || config.paranoid;

    (walker_config, io_threads, paranoid)
}

fn scan(
    root: &std::path::Path,
    walker_config: WalkerConfig,
    io_threads: usize,
    handler: &ShutdownHandler,
    quiet: bool,
) -> Result<(Vec<duplicates::DuplicateGroup>, ScanSummary)> {
    let finder_config = FinderConfig::default()
        .with_io_threads(io_threads)
        .with_walker_config(walker_config)
        .with_shutdown_flag(handler.get_flag())
        .with_progress_callback(Arc::new(ScanProgress::new(quiet)));

    let finder = DuplicateFinder::new(finder_config);
    let (groups, summary) = finder.find_duplicates(root)?;

    if !summary.scan_errors.is_empty() {
        log::warn!(
            "{} file(s) were skipped due to scan errors",
            summary.scan_errors.len()
        );
    }

    Ok((groups, summary))
}

fn run_interactive(
    args: InteractiveArgs,
    config: &Config,
    handler: &ShutdownHandler,
    quiet: bool,
) -> Result<ExitCode> {
    let root: PathBuf = match args.path {
        Some(path) => locations::validate_root(&path).map(|_| path)?,
        None => locations::choose_location()?,
    };

    if handler.is_shutdown_requested() {
        return Ok(ExitCode::Interrupted);
    }

    let (walker_config, io_threads, paranoid) = effective_options(&args.scan, config);
    let (groups, summary) = scan(&root, walker_config, io_threads, handler, quiet)?;

    let stdout = std::io::stdout();
    let mut output = stdout.lock();

    if summary.interrupted {
        writeln!(output, "Scan interrupted; showing partial results.")?;
    }

    if groups.is_empty() {
        writeln!(output, "No duplicate files found.")?;
        return Ok(ExitCode::Success);
    }

    writeln!(
        output,
        "Found {} duplicate group(s), {} reclaimable.",
        groups.len(),
        summary.reclaimable_display()
    )?;

    // The interrupt that ended the scan early has been acted on; clear it so
    // the operator can still resolve what was found.
    handler.reset();

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let options = ResolveOptions { paranoid };
    let flag = handler.get_flag();

    let outcomes = resolve::resolve_groups(&groups, &mut input, &mut output, &options, Some(&flag))
        .context("interactive session failed")?;

    let (deleted, failed) = outcomes.iter().fold((0, 0), |(d, f), outcome| match outcome {
        resolve::GroupOutcome::Done { deleted, failed } => (d + deleted, f + failed),
        _ => (d, f),
    });
    writeln!(
        output,
        "\nDone: {deleted} file(s) deleted, {failed} failed, {} group(s) visited.",
        outcomes.len()
    )?;

    Ok(ExitCode::Success)
}

fn run_batch(
    args: BatchArgs,
    config: &Config,
    handler: &ShutdownHandler,
    quiet: bool,
) -> Result<ExitCode> {
    locations::validate_root(&args.path)?;

    let (walker_config, io_threads, paranoid) = effective_options(&args.scan, config);
    let (groups, summary) = scan(&args.path, walker_config, io_threads, handler, quiet)?;

    let stdout = std::io::stdout();
    let mut output = stdout.lock();

    if summary.interrupted {
        writeln!(output, "Scan interrupted; showing partial results.")?;
    }

    resolve::print_report(&groups, &mut output)?;

    if groups.is_empty() || !args.delete {
        if !groups.is_empty() {
            writeln!(
                output,
                "\nDry run: nothing was deleted. Re-run with --delete to apply."
            )?;
        }
        return Ok(ExitCode::Success);
    }

    if !args.yes {
        let candidates = resolve::deletion_candidates(&groups).len();
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Permanently delete {candidates} file(s)?"))
            .default(false)
            .interact()
            .context("confirmation prompt failed")?;
        if !confirmed {
            writeln!(output, "Aborted; nothing was deleted.")?;
            return Ok(ExitCode::Success);
        }
    }

    handler.reset();
    let flag = handler.get_flag();
    resolve::apply_keep_first(&groups, &mut output, paranoid, Some(&flag))?;

    Ok(ExitCode::Success)
}
