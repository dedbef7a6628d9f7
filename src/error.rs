use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building or querying a [`DocIndex`](crate::index::DocIndex)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Two records share a location; construction is aborted
    #[error("duplicate location {location:?} at records {first} and {second}")]
    Validation {
        location: String,
        first: usize,
        second: usize,
    },

    #[error("no record with location {location:?}")]
    NotFound { location: String },
}

impl IndexError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, IndexError::NotFound { .. })
    }
}

/// Errors raised while reading a generated search index file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed search index: {0}")]
    Parse(#[from] serde_json::Error),
}
