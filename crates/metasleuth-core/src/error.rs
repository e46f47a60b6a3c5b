/// Error type for the MetaSleuth core.
///
/// Only run-level failures live here. A malformed input line is not an
/// error: it is reported as [`crate::parser::LineOutcome::Malformed`],
/// counted, and skipped.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MetaSleuthError>;

#[derive(Debug, Error)]
pub enum MetaSleuthError {
    /// The input file could not be opened.
    #[error("cannot open input file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the input stream failed part way through.
    #[error("read failed at line {line}: {source}")]
    Read {
        line: u64,
        #[source]
        source: std::io::Error,
    },

    /// The fls line pattern failed to compile.
    #[error("invalid fls line pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Outlier threshold must be finite and non-negative.
    #[error("invalid threshold {0}: must be a finite, non-negative number")]
    InvalidThreshold(f64),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Report(#[from] std::io::Error),

    /// CSV encoding of the report failed.
    #[error("failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),

    /// JSON encoding of the report failed.
    #[error("failed to write JSON report: {0}")]
    Json(#[from] serde_json::Error),
}
