//! Error types for the textchunk workspace.
//!
//! This module defines a unified error enum covering every failure category
//! in the system: chunking configuration, boundary math, similarity signals,
//! document loading, I/O, and serialization.

use thiserror::Error;

/// Unified error type for the textchunk workspace.
///
/// All fallible functions return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid chunking parameters, rejected before any strategy work
    #[error("Invalid chunk configuration: {0}")]
    InvalidConfig(String),

    /// Boundary math that would yield an empty or inverted span
    #[error("Degenerate chunk: {0}")]
    DegenerateChunk(String),

    /// External similarity signal missing, erroring, timing out, or out of range
    #[error("Similarity unavailable: {0}")]
    SimilarityUnavailable(String),

    /// Document loading failures, propagated from the loader collaborator
    #[error("Loader failure: {0}")]
    Loader(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Application/CLI configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
