/// Error type shared by every exptable operation.
///
/// Only loading and writing output can fail. Per-row data problems (unknown
/// columns, ragged rows, cells that are not numbers) never surface here;
/// they are absorbed by the operation that meets them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The input file could not be opened.
    #[error("{} does not exist", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file was opened but reading it failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing a report failed.
    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
