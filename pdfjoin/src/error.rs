//! Error types for pdfjoin.
//!
//! This module defines every error the ordering and merge pipeline can
//! produce. Errors carry enough context (input index, file name, path) to
//! tell the user which document to remove or fix before retrying.
//!
//! # Error Categories
//!
//! - **Ordering Errors**: malformed reorder requests
//! - **Merge Errors**: an input that does not parse, or an output that cannot be serialized
//! - **Session Errors**: operations attempted while a merge is running
//! - **I/O Errors**: missing inputs, unwritable outputs

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfjoin operations.
pub type Result<T> = std::result::Result<T, PdfJoinError>;

/// Main error type for pdfjoin operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfJoinError {
    /// A reorder request was not a bijection on the current index set.
    #[error("Invalid reorder request: {reason}")]
    InvalidPermutation {
        /// What was wrong with the request.
        reason: String,
    },

    /// An input document could not be parsed.
    #[error("Failed to parse document #{} ({name})\n  Reason: {reason}", .index + 1)]
    ParseError {
        /// Zero-based position of the offending document in the merge order.
        index: usize,
        /// Name of the offending document.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// The merged document could not be assembled or serialized.
    #[error("Failed to serialize merged document: {reason}")]
    SerializationError {
        /// Details about the failure.
        reason: String,
    },

    /// No documents were provided for merging.
    #[error("No input files specified for merging")]
    NoFilesToMerge,

    /// The session is merging and cannot be changed.
    #[error("A merge is in progress; wait for it to finish before changing the order")]
    MergeInProgress,

    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to read an input file.
    #[error("Failed to read input file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInput {
        /// Path to the input file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to read input list file.
    #[error("Failed to read input list file: {}\n  Reason: {source}", .path.display())]
    FailedToReadInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Input list file contains invalid entries.
    #[error("Invalid entry in input list file: {} at line {line_number}\n  Details: {details}", .path.display())]
    InvalidInputList {
        /// Path to the input list file.
        path: PathBuf,
        /// Line number with the error.
        line_number: usize,
        /// Details about what's invalid.
        details: String,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        .path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to write the output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: io::Error,
    },

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl PdfJoinError {
    /// Create an InvalidPermutation error.
    pub fn invalid_permutation(reason: impl Into<String>) -> Self {
        Self::InvalidPermutation {
            reason: reason.into(),
        }
    }

    /// Create a ParseError for the document at `index`.
    pub fn parse_error(index: usize, name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ParseError {
            index,
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::SerializationError {
            reason: reason.into(),
        }
    }

    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Index of the offending input document, when the error names one.
    pub fn document_index(&self) -> Option<usize> {
        match self {
            Self::ParseError { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// Check if this error aborts a merge attempt.
    ///
    /// A failed merge leaves the session in `Failed`; the caller must fix
    /// the inputs and merge again.
    pub fn is_merge_failure(&self) -> bool {
        matches!(
            self,
            Self::ParseError { .. } | Self::SerializationError { .. } | Self::NoFilesToMerge
        )
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidPermutation { .. } => 1,
            Self::ParseError { .. } => 3,
            Self::SerializationError { .. } => 6,
            Self::NoFilesToMerge => 1,
            Self::MergeInProgress => 6,
            Self::FileNotFound { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToReadInput { .. } => 2,
            Self::FailedToReadInputList { .. } => 2,
            Self::InvalidInputList { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToWrite { .. } => 5,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Io { .. } => 5,
            Self::Other { .. } => 1,
        }
    }
}
