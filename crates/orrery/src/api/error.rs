//! Error types for catalog lookups and loading

use thiserror::Error;

/// Result type for orrery operations
pub type OrreryResult<T> = Result<T, OrreryError>;

/// Errors surfaced to callers.
///
/// Solver non-convergence and degenerate visibility geometry are recovered
/// locally and never appear here.
#[derive(Error, Debug)]
pub enum OrreryError {
    /// No body with this identity in the catalog
    #[error("Body not found: {0}")]
    BodyNotFound(String),

    /// Operation needs orbital elements but the body has none (central body)
    #[error("Body has no orbit: {0}")]
    NoOrbit(String),

    /// Catalog entry violates an element or catalog invariant
    #[error("Invalid catalog entry '{body}': {reason}")]
    InvalidElements { body: String, reason: String },

    /// Configuration value outside its valid range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
