//! Output formatting and display for pdfjoin.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages
//! - The merging spinner
//! - Summary reports, human-readable or JSON
//!
//! # Examples
//!
//! ```no_run
//! use pdfjoin::output::OutputFormatter;
//! use pdfjoin::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;
pub mod progress;
pub mod report;

pub use formatter::{MessageLevel, OutputFormatter};
pub use progress::Spinner;
pub use report::{DocumentEntry, MergeReport};

use crate::collection::OrderedCollection;
use crate::config::Config;
use crate::document::SourceDocument;
use crate::io::WriteStatistics;
use crate::merge::MergeStatistics;
use crate::utils::format_file_size;

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Display the merge order, one numbered line per document.
pub fn display_order(formatter: &OutputFormatter, documents: &OrderedCollection<SourceDocument>) {
    formatter.section(&format!("Merge order ({} document(s)):", documents.len()));
    for (position, document) in documents.iter().enumerate() {
        if formatter.is_verbose() {
            formatter.list_item(
                position + 1,
                &format!("{} ({})", document.name(), format_file_size(document.size())),
            );
        } else {
            formatter.list_item(position + 1, document.name());
        }
    }
}

/// Display merge and write statistics to the user.
pub fn display_merge_summary(
    formatter: &OutputFormatter,
    merge: &MergeStatistics,
    write: &WriteStatistics,
) {
    formatter.success(&format!(
        "Merged {} document(s) into {} page(s): {}",
        merge.documents_merged,
        merge.total_pages,
        write.output_path.display()
    ));
    formatter.detail("Input size", &merge.format_input_size());
    formatter.detail("Output size", &write.format_file_size());
    formatter.detail(
        "Merge time",
        &format!("{:.2}s", merge.merge_time.as_secs_f64()),
    );
    formatter.detail(
        "Write time",
        &format!("{:.2}s", write.write_time.as_secs_f64()),
    );
}
