//! Configuration module for pdfjoin.
//!
//! This module holds the validated, normalized configuration that drives a
//! merge run. It handles:
//! - Validation of argument combinations
//! - Parsing of reorder requests
//! - Application of defaults

use anyhow::{Result, bail};

use crate::PdfJoinError;
use crate::sort::SortDirection;
use std::{path::PathBuf, str::FromStr};

/// Compression level for the output PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompressionLevel {
    /// No compression - streams are written as they were read.
    None,
    /// Flate-compress every stream that allows it.
    #[default]
    Standard,
}

impl FromStr for CompressionLevel {
    type Err = crate::PdfJoinError;
    /// Parse compression level from string.
    ///
    /// # Arguments
    ///
    /// * `s` - String representation: "none" or "standard"
    ///
    /// # Errors
    ///
    /// Returns an error if the string doesn't match a valid compression level.
    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            _ => Err(PdfJoinError::InvalidConfig {
                message: format!("Invalid compression level: {s}. Must be one of: none, standard"),
            }),
        }
    }
}

/// A single "move document FROM to position TO" request.
///
/// Positions are zero-based. The textual form accepted by [`FromStr`] is the
/// one-based `FROM:TO` users type on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Current position of the document.
    pub from: usize,
    /// Position the document should end up at.
    pub to: usize,
}

impl FromStr for MoveRequest {
    type Err = PdfJoinError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let invalid = || {
            PdfJoinError::invalid_config(format!(
                "Invalid move: {s}. Expected FROM:TO with 1-based positions, e.g. 3:1"
            ))
        };

        let (from, to) = s.split_once(':').ok_or_else(invalid)?;
        let from: usize = from.trim().parse().map_err(|_| invalid())?;
        let to: usize = to.trim().parse().map_err(|_| invalid())?;
        if from == 0 || to == 0 {
            return Err(invalid());
        }

        Ok(Self {
            from: from - 1,
            to: to - 1,
        })
    }
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting (default).
    #[default]
    Prompt,
    /// Always overwrite without prompting.
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// Complete configuration for a merge run.
///
/// This structure contains all settings needed to perform a merge,
/// derived and validated from CLI arguments.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input PDF file paths (in selection order).
    pub inputs: Vec<PathBuf>,

    /// Output file or directory. `None` writes the generated file name into
    /// the current directory.
    pub output: Option<PathBuf>,

    /// Sort the selection by name before applying moves.
    pub sort: Option<SortDirection>,

    /// Moves applied in order after sorting.
    pub moves: Vec<MoveRequest>,

    /// Compression level for output.
    pub compression: CompressionLevel,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Dry run mode - resolve the final order without merging.
    pub dry_run: bool,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// Print a JSON report instead of human-readable output.
    pub json: bool,

    /// Number of files read concurrently (None = auto-detect).
    pub jobs: Option<usize>,
}

impl Config {
    /// Returns a reference to inputs.
    pub fn inputs(&self) -> &[PathBuf] {
        self.inputs.as_ref()
    }

    /// Validate the configuration.
    ///
    /// Checks for logical inconsistencies and invalid combinations.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are specified
    /// - Verbose and quiet modes are both enabled
    /// - Jobs count is zero
    /// - A move names a position outside the selection
    /// - The output path is one of the inputs
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() {
            bail!("No input files specified");
        }

        if self.verbose && self.quiet {
            bail!("Cannot use both --verbose and --quiet");
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            bail!("Number of jobs must be at least 1");
        }

        let len = self.inputs.len();
        for request in &self.moves {
            if request.from >= len || request.to >= len {
                bail!(
                    "Move {}:{} is out of range for {len} input file(s)",
                    request.from + 1,
                    request.to + 1
                );
            }
        }

        if let Some(output) = &self.output {
            for input in &self.inputs {
                if input == output {
                    bail!(
                        "Output file cannot be the same as an input file: {}",
                        output.display()
                    );
                }
            }
        }

        Ok(())
    }

    /// Get the effective number of parallel jobs.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Check if output should be displayed.
    ///
    /// Returns false if in quiet mode and not doing a dry run.
    pub fn should_print(&self) -> bool {
        !self.quiet || self.dry_run
    }
}
