//! Error types for the sigoracle core.

/// Core error type for startup and configuration.
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    /// None of the secret environment variables is set to a non-empty value.
    #[error("signing secret is not configured: set one of {0}")]
    MissingSecret(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for sigoracle core operations.
pub type OracleResult<T> = Result<T, OracleError>;
