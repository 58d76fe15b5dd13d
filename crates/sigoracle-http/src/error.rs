//! HTTP-facing error types.
//!
//! Every client error the signing endpoint produces is a 400; routing errors
//! are 404/405 and server faults 500. All are rendered as `{"error": <message>}`.

use std::fmt;

use sigoracle_auth::SignError;

/// Error categories for the signing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum OracleErrorCode {
    /// A required query parameter is absent or empty.
    MissingParameter,
    /// A scope parameter is not valid UTF-8.
    InvalidParameter,
    /// The date failed to parse or a scope field is empty.
    InvalidScope,
    /// A parameter exceeds its configured size cap.
    ParameterTooLarge,
    /// No route matches the request path.
    NotFound,
    /// The path exists but not for this method.
    MethodNotAllowed,
    /// The signer is misconfigured; not caused by the request.
    Internal,
}

impl OracleErrorCode {
    /// Returns the error code as a string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingParameter => "MissingParameter",
            Self::InvalidParameter => "InvalidParameter",
            Self::InvalidScope => "InvalidScope",
            Self::ParameterTooLarge => "ParameterTooLarge",
            Self::NotFound => "NotFound",
            Self::MethodNotAllowed => "MethodNotAllowed",
            Self::Internal => "InternalError",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn default_status_code(&self) -> http::StatusCode {
        match self {
            Self::MissingParameter
            | Self::InvalidParameter
            | Self::InvalidScope
            | Self::ParameterTooLarge => http::StatusCode::BAD_REQUEST,
            Self::NotFound => http::StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => http::StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for OracleErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An error returned to the HTTP caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct OracleHttpError {
    /// The error category.
    pub code: OracleErrorCode,
    /// The message placed in the JSON body.
    pub message: String,
    /// The HTTP status code.
    pub status_code: http::StatusCode,
}

impl OracleHttpError {
    /// Create an error with an explicit message.
    #[must_use]
    pub fn with_message(code: OracleErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            status_code: code.default_status_code(),
        }
    }

    /// One or more required parameters are missing.
    #[must_use]
    pub fn missing_parameters(names: &[&str]) -> Self {
        Self::with_message(
            OracleErrorCode::MissingParameter,
            format!("missing required parameters: {}", names.join(", ")),
        )
    }

    /// A parameter exceeds its size cap.
    #[must_use]
    pub fn parameter_too_large(name: &str, limit: usize) -> Self {
        Self::with_message(
            OracleErrorCode::ParameterTooLarge,
            format!("parameter {name} exceeds the maximum size of {limit} bytes"),
        )
    }

    /// A parameter that must be text decoded to invalid UTF-8.
    #[must_use]
    pub fn invalid_utf8(name: &str) -> Self {
        Self::with_message(
            OracleErrorCode::InvalidParameter,
            format!("parameter {name} is not valid UTF-8"),
        )
    }

    /// No route matches.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::with_message(OracleErrorCode::NotFound, format!("no route for {path}"))
    }

    /// The method is not supported on this path.
    #[must_use]
    pub fn method_not_allowed(method: &http::Method) -> Self {
        Self::with_message(
            OracleErrorCode::MethodNotAllowed,
            format!("method {method} is not allowed"),
        )
    }
}

impl From<SignError> for OracleHttpError {
    fn from(err: SignError) -> Self {
        match err {
            SignError::InvalidScope { reason } => {
                Self::with_message(OracleErrorCode::InvalidScope, reason)
            }
            // The secret is validated at startup, so this is a server fault.
            SignError::EmptySecret => {
                Self::with_message(OracleErrorCode::Internal, "signer is not configured")
            }
        }
    }
}
