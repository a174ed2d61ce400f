//! Dupesweep - Interactive Duplicate File Remover
//!
//! Entry point for the dupesweep CLI.

use clap::Parser;
use dupesweep::{
    cli::Cli,
    duplicates::FinderError,
    error::ExitCode,
    logging,
};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    match dupesweep::run_app(cli) {
        Ok(code) => std::process::exit(code.as_i32()),
        Err(err) => {
            // Invalid roots get their own code; everything else is general.
            let exit_code = if err.downcast_ref::<FinderError>().is_some() {
                ExitCode::InvalidPath
            } else {
                ExitCode::GeneralError
            };

            eprintln!("Error: {err:#}");
            std::process::exit(exit_code.as_i32());
        }
    }
}
