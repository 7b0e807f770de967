//! Error type shared by the boundary and configuration paths.
//!
//! Individual geocode lookups never surface here: a failed lookup is a miss
//! for that entry only and the batch continues.

use thiserror::Error;

/// Failures that abort an operation rather than a single entry.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport failure or non-success status.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response or configuration body was not valid JSON for the expected shape.
    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The boundary service returned no usable geometry for the region.
    #[error("no administrative boundary found for '{region}'")]
    EmptyBoundary {
        /// The region query that produced no elements
        region: String,
    },

    /// Configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
