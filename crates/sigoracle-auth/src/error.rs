//! Error types for SigV4 signing.

/// Errors that can occur while building a signing scope or signing a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    /// The credential scope is malformed: bad date or an empty field.
    #[error("invalid scope: {reason}")]
    InvalidScope {
        /// Human-readable description of what is wrong with the scope.
        reason: String,
    },

    /// The signing secret is empty.
    #[error("signing secret must not be empty")]
    EmptySecret,
}

impl SignError {
    /// Create an [`SignError::InvalidScope`] with the given reason.
    #[must_use]
    pub fn invalid_scope(reason: impl Into<String>) -> Self {
        Self::InvalidScope {
            reason: reason.into(),
        }
    }
}
