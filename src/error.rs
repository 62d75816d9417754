//! Error types shared by the loader, the assembler and the renderer.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BestStatsError>;

/// Everything that can abort a run. Nothing here is retried.
#[derive(Debug, Error)]
pub enum BestStatsError {
    /// An input file is absent or cannot be opened
    #[error("input file {path:?} is missing or unreadable: {source}")]
    MissingInputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader gave up on a record
    #[error("malformed CSV in {path:?}: {source}")]
    MalformedCsv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required identifier/region/year column is absent
    #[error("schema mismatch in `{table}`: column `{column}` not found")]
    SchemaMismatch { table: String, column: String },

    /// A region label with no color assigned
    #[error("no color defined for region `{0}`")]
    Configuration(String),

    #[error("assembled table is empty, nothing to animate")]
    EmptyDataset,

    /// The GIF encoder could not be created for the output path
    #[error("cannot encode animation to {path:?}: {reason}")]
    EncodingUnavailable { path: PathBuf, reason: String },

    #[error("cannot open display window: {0}")]
    DisplayUnavailable(String),

    /// A plotting backend failed while drawing a frame
    #[error("drawing failed: {0}")]
    Draw(String),

    /// Configuration file could not be read or parsed
    #[error("invalid configuration {path:?}: {reason}")]
    Config { path: PathBuf, reason: String },
}

impl BestStatsError {
    pub(crate) fn draw<E: std::fmt::Display>(err: E) -> Self {
        BestStatsError::Draw(err.to_string())
    }
}
