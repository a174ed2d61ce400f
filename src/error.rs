//! Exit codes for the dupesweep process.

/// Process exit codes.
///
/// - 0: Normal completion, whether or not duplicates were found
/// - 1: General error (unexpected failure)
/// - 2: Invalid root path (missing or not a directory)
/// - 130: Interrupted by the operator before any results were produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan and resolution completed normally.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The requested root path does not exist or is not a directory.
    InvalidPath = 2,
    /// Interrupted (Ctrl+C) with nothing useful to report.
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
