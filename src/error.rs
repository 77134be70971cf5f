use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by network construction, persistence, and the executor.
///
/// Matrix shape violations are contract errors and panic at the offending
/// operation instead of going through this enum; see `math::matrix`.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction parameter (non-positive dimension or learning rate).
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Activation name outside the supported set.
    #[error("unknown activation function: {0}")]
    UnknownActivation(String),

    /// Persisted network whose weight/bias shapes do not match its dimensions.
    #[error("invalid network snapshot: {0}")]
    Snapshot(String),

    /// Worker pool could not be built.
    #[error("executor error: {0}")]
    Executor(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart image encoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
