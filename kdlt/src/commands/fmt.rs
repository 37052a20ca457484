//! Format command implementation.
//!
//! Parses each input file and reprints it canonically. The output goes to
//! stdout by default, back to the file with `--write`, and `--check` only
//! reports whether anything would change.

use std::path::PathBuf;

use kdl::PrintConfig;
use tracing::info;

use crate::commands::common::{parse_file, read_file};
use crate::error::{KdltError, Result};

/// Arguments for the fmt command.
#[derive(Debug, Clone)]
pub struct FmtArgs {
    /// Files to format.
    pub files: Vec<PathBuf>,
    /// Rewrite files in place instead of printing to stdout.
    pub write: bool,
    /// Only check whether files are already formatted.
    pub check: bool,
    /// Print configuration to format with.
    pub config: PrintConfig,
    /// Enable verbose output.
    pub verbose: bool,
}

/// Run the fmt command.
pub fn run_fmt(args: FmtArgs) -> Result<()> {
    let mut unformatted = 0usize;
    for path in &args.files {
        let original = read_file(path)?;
        let document = parse_file(path)?;
        let formatted = document.to_kdl_with(&args.config);

        if args.check {
            if original != formatted {
                eprintln!("{}: not formatted", path.display());
                unformatted += 1;
            } else if args.verbose {
                info!("{}: formatted", path.display());
            }
        } else if args.write {
            if original != formatted {
                std::fs::write(path, &formatted)?;
                info!("{}: rewritten", path.display());
            }
        } else {
            print!("{}", formatted);
        }
    }

    if unformatted > 0 {
        return Err(KdltError::Validation(format!(
            "{} of {} file(s) would be reformatted",
            unformatted,
            args.files.len()
        )));
    }
    Ok(())
}
