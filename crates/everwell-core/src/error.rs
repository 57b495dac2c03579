//! Core error types for everwell-core.
//!
//! The engine's error policy is graceful degradation: store I/O failures
//! abort the operation and leave in-memory state untouched, malformed
//! persisted JSON loads as defaults, and sync failures are swallowed at
//! the dispatch site. Nothing here is meant for structured recovery
//! beyond "did the store call fail".

use thiserror::Error;

/// Core error type for everwell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Underlying storage I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure (corrupt document, unavailable store)
    #[error("Store backend error: {0}")]
    Backend(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Challenge day outside 1..=21
    #[error("Challenge day {0} out of range (1..=21)")]
    DayOutOfRange(u8),

    /// Unknown pillar identifier
    #[error("Unknown pillar: {0}")]
    UnknownPillar(String),

    /// Task id not present in the catalog for the pillar
    #[error("Unknown task '{task_id}' for pillar '{pillar}'")]
    UnknownTask { pillar: String, task_id: String },
}

/// Sync delivery errors. Never surfaced to callers of the engine; the
/// dispatcher logs and drops them.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Sync endpoint rejected payload: {0}")]
    Rejected(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
