//! pdfjoin - Arrange PDF files and merge them into a single document.
//!
//! Command-line front end over a [`SessionController`]: select the inputs,
//! apply sorting and moves, merge, and write the result.

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::path::Path;
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use pdfjoin::config::{Config, OverwriteMode};
use pdfjoin::error::PdfJoinError;
use pdfjoin::io::{FileSelection, FileSink, OutputSink, WriteOptions};
use pdfjoin::merge::Merger;
use pdfjoin::output::{
    MergeReport, OutputFormatter, Spinner, display_merge_summary, display_order,
};
use pdfjoin::session::{MergeOutcome, SessionController};

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(&cli);

    // Run the application and handle errors
    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        process::exit(exit_code(&err));
    }
}

/// Install the stderr log subscriber. `RUST_LOG` overrides the default.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose {
        "pdfjoin=debug,warn"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Map an error to the process exit status.
fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<PdfJoinError>()
        .map_or(1, PdfJoinError::exit_code)
}

/// Main application logic.
async fn run(cli: Cli) -> Result<()> {
    // Validate CLI arguments
    cli.validate()?;

    // Get all inputs (including from input-list if specified)
    let inputs = cli.get_all_inputs().await?;
    let config = cli.to_config(inputs)?;

    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfjoin::NAME, pdfjoin::VERSION));
    }

    let session = SessionController::with_engine(Merger::with_compression(config.compression));
    let selection = FileSelection::new(config.inputs.clone()).with_jobs(config.effective_jobs());
    let count = session
        .select_from(&selection)
        .await
        .context("Failed to read input files")?;
    formatter.debug(&format!("Read {count} file(s)"));

    arrange(&session, &config)?;
    let order = session.snapshot();
    display_order(&formatter, &order);

    // Dry run mode - stop here
    if config.dry_run {
        if config.json {
            println!(
                "{}",
                MergeReport::new(session.state(), &order).dry_run().to_json()?
            );
        }
        formatter.success("Dry run completed successfully");
        formatter.info("  Run without --dry-run to create the merged PDF");
        return Ok(());
    }

    let overwrite = handle_output_overwrite(&config, &formatter)?;
    let sink = FileSink::with_options(
        config.output.clone(),
        WriteOptions {
            overwrite,
            ..Default::default()
        },
    );

    let spinner = if formatter.should_print() {
        Spinner::new("Merging documents...")
    } else {
        Spinner::disabled()
    };
    let progress = tokio::spawn(spinner.follow(session.subscribe()));

    let result = session.merge().await;
    if matches!(result, Ok(MergeOutcome::Rejected { .. })) {
        progress.abort();
    } else {
        progress.await.ok();
    }

    let output = match result.context("Merge failed")? {
        MergeOutcome::Completed(output) => output,
        MergeOutcome::Rejected { state } => bail!("Merge could not start: session is {state}"),
    };

    let merge_stats = output.statistics().clone();
    let write_stats = sink.deliver(output).await?;
    debug!(
        path = %write_stats.output_path.display(),
        bytes = write_stats.file_size,
        "output delivered"
    );

    if config.json {
        let report = MergeReport::new(session.state(), &order).with_results(&merge_stats, &write_stats);
        println!("{}", report.to_json()?);
    } else {
        display_merge_summary(&formatter, &merge_stats, &write_stats);
    }

    Ok(())
}

/// Apply the requested sort, then each move in order.
fn arrange(session: &SessionController, config: &Config) -> pdfjoin::Result<()> {
    if let Some(direction) = config.sort {
        session.sort(direction)?;
    }

    for request in &config.moves {
        session.move_document(request.from, request.to)?;
    }

    Ok(())
}

/// Handle output file overwrite scenarios.
///
/// Returns whether the sink may replace an existing file.
fn handle_output_overwrite(
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<bool, PdfJoinError> {
    let force = config.overwrite_mode == OverwriteMode::Force;

    // Generated names only apply to directory targets and never collide
    let sink = FileSink::new(config.output.clone());
    let Some(path) = sink.fixed_path() else {
        return Ok(force);
    };

    // Check if output exists
    if !path.exists() {
        return Ok(force);
    }

    match config.overwrite_mode {
        OverwriteMode::Force => Ok(true),
        OverwriteMode::NoClobber => Err(PdfJoinError::output_exists(path.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(PdfJoinError::output_exists(path.to_path_buf()));
            }
            confirm_overwrite(path, formatter)
        }
    }
}

fn confirm_overwrite(path: &Path, formatter: &OutputFormatter) -> Result<bool, PdfJoinError> {
    use std::io::{self, Write};

    formatter.warning(&format!("Output file already exists: {}", path.display()));

    print!("Overwrite? [y/N]: ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin()
        .read_line(&mut response)
        .map_err(|err| PdfJoinError::other(format!("Failed to read input: {err}")))?;

    let response = response.trim().to_lowercase();
    if response == "y" || response == "yes" {
        Ok(true)
    } else {
        Err(PdfJoinError::Cancelled)
    }
}
