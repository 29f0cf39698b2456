//! Engine error type.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors the engine itself can fail with.
///
/// Note that a job failing is not an engine error: job outcomes are
/// reported through job status and the run's exit code. These variants
/// cover misconfiguration and OS-level resource failures only.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("command at index {0} is empty")]
    EmptyCommand(usize),
    #[error("job limit {0} is outside the accepted range")]
    InvalidJobLimit(usize),
    #[error("pipe allocation failed: {0}")]
    Pipe(#[source] nix::Error),
    #[error("job wait task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
