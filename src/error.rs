//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by tree construction, the cluster client, and report
/// orchestration.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Insertion was given an empty path. Paths are never normalized beyond
    /// splitting on `/`; an empty string is the only rejected form.
    #[error("invalid sample path: {0:?}")]
    InvalidPath(String),

    /// Insertion was given a zero weight. Every sample carries weight >= 1.
    #[error("invalid sample weight: {0}")]
    InvalidWeight(u64),

    /// Attempted to merge the root node into a parent it does not have.
    #[error("cannot merge the root node")]
    MergeRoot,

    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Login rejected or a request made without a session token.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// The cluster answered with a non-success status or a malformed payload.
    #[error("cluster request failed: {0}")]
    RequestFailed(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl From<config::ConfigError> for ReportError {
    fn from(err: config::ConfigError) -> Self {
        ReportError::ConfigError(err.to_string())
    }
}
