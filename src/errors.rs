use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or writing the report.
///
/// A missing input file is not an error; loaders return an empty value for it.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed trade on line {line} of {path}: {source}")]
    TradeLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid file pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
