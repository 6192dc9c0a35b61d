//! Error types. Storage and validation errors are recoverable and end up as
//! user notifications; `AppError` is only raised while starting up.

/// Failure of the key-value backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("quota exceeded writing {key}: needed {needed} bytes, {available} available")]
    QuotaExceeded { key: String, needed: usize, available: usize },
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Failure saving, loading, or importing a setup snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to serialize setup: {0}")]
    Serialize(serde_json::Error),
    #[error("failed to parse setup: {0}")]
    Parse(serde_json::Error),
    #[error("invalid setup: {0}")]
    Invalid(String),
    #[error("no saved setup")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure bringing the application up.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("court container not found: {0}")]
    MissingContainer(String),
    #[error("canvas unavailable: {0}")]
    Canvas(String),
}
