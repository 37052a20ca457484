//! Check command implementation.
//!
//! Parses each input file and reports grammar errors with their location
//! snapshots. Exits non-zero when any file fails.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::commands::common::parse_file;
use crate::error::{KdltError, Result};

/// Arguments for the check command.
#[derive(Debug, Clone)]
pub struct CheckArgs {
    /// Files to check.
    pub files: Vec<PathBuf>,
    /// Enable verbose output.
    pub verbose: bool,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> Result<()> {
    let mut failures = 0usize;
    for path in &args.files {
        match parse_file(path) {
            Ok(document) => {
                debug!("{}: {} node(s)", path.display(), document.len());
                if args.verbose {
                    info!("{}: ok", path.display());
                }
            }
            Err(err) => {
                eprintln!("{}: {}", path.display(), err);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(KdltError::Validation(format!(
            "{} of {} file(s) failed to parse",
            failures,
            args.files.len()
        )));
    }
    info!("{} file(s) ok", args.files.len());
    Ok(())
}
