//! Error types returned by the search engine.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, SearchError>;

/// Everything that can go wrong while setting up or running a search
#[derive(Debug, Error)]
pub enum SearchError {
    /// A key weight outside of `(0, 1]`
    #[error("Key weight has to be > 0 and <= 1, got {weight} for key {key:?}")]
    InvalidKeyWeight {
        /// The offending key path
        key: String,
        /// The rejected weight
        weight: f64,
    },
    /// Any other option that can never produce a meaningful search
    #[error("Invalid search options: {0}")]
    InvalidOptions(String),
    /// The literal alternation used for over-long patterns could not be compiled
    #[error("Could not compile pattern alternation: {0}")]
    Pattern(#[from] regex::Error),
    /// The options builder was missing a field or failed validation
    #[error("Could not build search options: {0}")]
    Builder(String),
    /// Failed to read a record collection
    #[error("Error reading records: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse a record collection
    #[error("Error parsing records: {0}")]
    Json(#[from] serde_json::Error),
    /// Broken internal invariant, never expected in a correct build
    #[error("Internal error: {0}")]
    Internal(String),
}
