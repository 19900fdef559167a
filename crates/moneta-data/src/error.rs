//! Error types for dataset loading.

use std::path::PathBuf;

/// Errors that can occur while loading the currency dataset.
///
/// Load errors are fatal to process startup: a service with a missing
/// or malformed table has nothing to serve.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// The dataset file could not be opened or read.
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A record line did not have exactly four fields.
    #[error("malformed record at {path}:{line}: expected 4 fields, got {fields}")]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        fields: usize,
    },
}
