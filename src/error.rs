//! Unified error handling for the pagecast crate
//!
//! Failures fall into a few buckets that decide how the run reacts:
//!
//! - input problems (missing file, bad CSV, missing column) abort the run
//! - an empty plan aborts the run before the output file is created
//! - configuration problems abort the run at startup
//!
//! Response decode failures from the Graph API are *not* represented here.
//! They are recorded on the affected row by the publisher and the run
//! continues (see [`crate::publisher`]).

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Classification of errors for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Reading or parsing the input sheet
    Input,
    /// Writing the output sheet
    Output,
    /// HTTP client setup
    Network,
    /// Configuration and validation errors
    Config,
    /// Schedule construction errors
    Schedule,
}

impl ErrorCategory {
    /// Short label used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::Network => "network",
            Self::Config => "config",
            Self::Schedule => "schedule",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unified error type for the pagecast crate
#[derive(Error, Debug)]
pub enum Error {
    /// Input sheet could not be opened
    #[error("Failed to open input file {}: {source}", .path.display())]
    InputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Input sheet is missing a required column
    #[error("Input is missing required column '{column}'")]
    MissingColumn { column: String },

    /// Input sheet names the same column twice
    #[error("Input has duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// Nothing was scheduled, so there is no row to derive columns from
    #[error("Nothing to write: the publish plan is empty")]
    EmptyPlan,

    /// A row does not carry the same field set as the first row
    #[error("Row {row} has columns {found:?}, expected {expected:?}")]
    InconsistentColumns {
        row: usize,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// Clock value could not be parsed
    #[error("Invalid time '{value}': expected HH:MM")]
    InvalidTime { value: String },

    /// CSV read/write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create an invalid time error
    pub fn invalid_time(value: impl Into<String>) -> Self {
        Self::InvalidTime {
            value: value.into(),
        }
    }

    /// Get the error category for reporting
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputOpen { .. } | Self::MissingColumn { .. } | Self::DuplicateColumn { .. } => {
                ErrorCategory::Input
            }
            Self::EmptyPlan | Self::InconsistentColumns { .. } => ErrorCategory::Output,
            Self::Csv(e) => {
                if e.is_io_error() {
                    ErrorCategory::Output
                } else {
                    ErrorCategory::Input
                }
            }
            Self::Io(_) | Self::Json(_) => ErrorCategory::Output,
            Self::Http(_) => ErrorCategory::Network,
            Self::Config(_) => ErrorCategory::Config,
            Self::InvalidTime { .. } => ErrorCategory::Schedule,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
