use thiserror::Error;

/// Errors originating from the core viewport/iteration engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid viewport: {reason}")]
    InvalidViewport { reason: String },

    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),
}
