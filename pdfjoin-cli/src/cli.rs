//! CLI argument parsing for pdfjoin.
//!
//! This module defines the command-line interface structure using `clap`.
//! It handles argument parsing, validation, and help text generation.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pdfjoin::config::{CompressionLevel, Config, MoveRequest, OverwriteMode};
use pdfjoin::error::{PdfJoinError, Result};
use pdfjoin::sort::SortDirection;

/// Arrange PDF files and merge them into a single document.
///
/// pdfjoin takes the selected files in the order given, optionally sorts
/// them by name and applies moves, then concatenates every page of every
/// file into one PDF.
#[derive(Parser, Debug)]
#[command(name = "pdfjoin")]
#[command(version)]
#[command(about = "Arrange PDF files and merge them into a single document", long_about = None)]
#[command(author)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Input PDF files to merge (in order)
    ///
    /// Specify multiple files or use glob patterns. Matches of one pattern
    /// are taken in path order.
    ///
    /// Examples:
    ///   pdfjoin cover.pdf chapter*.pdf -o book.pdf
    #[arg(value_name = "FILE", required_unless_present = "input_list")]
    pub inputs: Vec<String>,

    /// Output file or directory
    ///
    /// If a directory (or omitted), the merged PDF is written there as
    /// <unix-millis>.pdf.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Sort inputs by name before merging
    ///
    /// Names whose first number differs are ordered by that number
    /// (img2 before img10); other names compare case-insensitively.
    #[arg(short, long, value_name = "DIR")]
    #[arg(value_parser = ["asc", "desc"])]
    pub sort: Option<String>,

    /// Move the document at position FROM to position TO (1-based)
    ///
    /// Repeatable; moves apply in order, after sorting.
    ///
    /// Example:
    ///   pdfjoin a.pdf b.pdf c.pdf --move 3:1   # c, a, b
    #[arg(short = 'm', long = "move", value_name = "FROM:TO")]
    pub moves: Vec<String>,

    /// Dry run - print the final merge order without merging
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Verbose output - show sizes and timings
    #[arg(short, long)]
    pub verbose: bool,

    /// Force overwrite of existing output file without confirmation
    ///
    /// By default, pdfjoin will prompt before overwriting an existing file.
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite existing output file
    ///
    /// If the output file already exists, exit with an error
    /// instead of prompting or overwriting.
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    /// Useful for scripts and automation.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print a JSON report on stdout instead of human-readable output
    #[arg(long)]
    pub json: bool,

    /// Compression level for output PDF
    ///
    /// - none: Streams are written as read
    /// - standard: Flate-compress streams (default)
    #[arg(short, long, value_name = "LEVEL", default_value = "standard")]
    #[arg(value_parser = ["none", "standard"])]
    pub compression: String,

    /// Read input file list from a file (one path per line)
    ///
    /// Use '-' to read from stdin. Paths from the list are appended after
    /// direct inputs. Lines starting with '#' are ignored.
    ///
    /// Example:
    ///   pdfjoin --input-list files.txt -o output.pdf
    #[arg(long, value_name = "FILE")]
    pub input_list: Option<PathBuf>,

    /// Number of files read concurrently
    ///
    /// Default is number of CPU cores. Merge order never depends on this.
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// `inputs` are the already expanded input paths (see
    /// [`Cli::get_all_inputs`]).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Compression level or sort direction is invalid
    /// - A move is malformed
    /// - Configuration validation fails
    pub fn to_config(&self, inputs: Vec<PathBuf>) -> Result<Config> {
        let compression = CompressionLevel::from_str(&self.compression)?;

        let sort = self
            .sort
            .as_deref()
            .map(SortDirection::from_str)
            .transpose()?;

        let moves = self
            .moves
            .iter()
            .map(|m| MoveRequest::from_str(m))
            .collect::<Result<Vec<_>>>()?;

        // Determine overwrite mode
        let overwrite_mode = if self.force {
            OverwriteMode::Force
        } else if self.no_clobber {
            OverwriteMode::NoClobber
        } else {
            OverwriteMode::Prompt
        };

        let config = Config {
            inputs,
            output: self.output.clone(),
            sort,
            moves,
            compression,
            overwrite_mode,
            dry_run: self.dry_run,
            verbose: self.verbose,
            quiet: self.quiet,
            json: self.json,
            jobs: self.jobs,
        };

        // Validate the configuration
        config.validate().map_err(|e| {
            PdfJoinError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }

    /// Validate CLI arguments before processing.
    ///
    /// Performs early validation that doesn't require file I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<()> {
        if self.inputs.is_empty() && self.input_list.is_none() {
            return Err(PdfJoinError::invalid_config("No input files specified"));
        }

        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(PdfJoinError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        CompressionLevel::from_str(&self.compression)?;
        if let Some(sort) = &self.sort {
            SortDirection::from_str(sort)?;
        }
        for m in &self.moves {
            MoveRequest::from_str(m)?;
        }

        Ok(())
    }

    /// Get all input paths including those from input-list file.
    ///
    /// Direct inputs are glob-expanded; paths from the list file are
    /// appended after them, unexpanded.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is invalid, the input list file cannot
    /// be read, or nothing is left to merge.
    pub async fn get_all_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut all_inputs = pdfjoin::utils::collect_paths_for_patterns(&self.inputs)?;

        if let Some(ref input_list_path) = self.input_list {
            let additional_inputs = read_input_list(input_list_path).await?;
            all_inputs.extend(additional_inputs);
        }

        if all_inputs.is_empty() {
            return Err(PdfJoinError::NoFilesToMerge);
        }

        Ok(all_inputs)
    }
}

/// Read input paths from a file, or stdin for `-`.
///
/// Reads one path per line. Lines starting with '#' are treated as
/// comments and ignored. Empty lines are skipped.
async fn read_input_list(path: &Path) -> Result<Vec<PathBuf>> {
    use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

    let source: Box<dyn AsyncRead + Unpin + Send> = if path.as_os_str() == "-" {
        Box::new(tokio::io::stdin())
    } else {
        Box::new(tokio::fs::File::open(path).await.map_err(|e| {
            PdfJoinError::FailedToReadInputList {
                path: path.to_path_buf(),
                source: e,
            }
        })?)
    };

    let mut lines = BufReader::new(source).lines();
    let mut paths = Vec::new();
    let mut line_number = 0;

    while let Some(line) =
        lines
            .next_line()
            .await
            .map_err(|e| PdfJoinError::FailedToReadInputList {
                path: path.to_path_buf(),
                source: e,
            })?
    {
        line_number += 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains('\0') {
            return Err(PdfJoinError::InvalidInputList {
                path: path.to_path_buf(),
                line_number,
                details: "Path contains a NUL byte".to_string(),
            });
        }

        paths.push(PathBuf::from(line));
    }

    Ok(paths)
}
