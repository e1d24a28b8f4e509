//! Custom error types for relnotes.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for relnotes operations.
#[derive(Error, Debug)]
pub enum RelnotesError {
    // Cli args errors
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    // Input validation errors, reported together before any work begins
    #[error("Input validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unknown template: {name}. Available templates: {available}")]
    UnknownTemplate { name: String, available: String },

    #[error("Failed after {attempts} attempts. Last error: {last_error}")]
    RetryExhausted { attempts: usize, last_error: String },

    #[error("No release found for tag: {0}")]
    ReleaseNotFound(String),
}

/// Failures reported by a remote forge, classified by HTTP semantics so the
/// retry policy can decide whether another attempt makes sense.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForgeError {
    #[error("401 unauthorized: {0}")]
    Unauthorized(String),

    #[error("403 forbidden: {0}")]
    Forbidden(String),

    #[error("404 not found: {0}")]
    NotFound(String),

    #[error("API rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("GitHub API error: {0}")]
    Request(String),
}

impl ForgeError {
    /// Whether a later attempt of the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Server { .. } | Self::Network(_)
        )
    }

    /// Classify an HTTP status and message returned by the forge API.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();

        match status.as_u16() {
            401 => Self::Unauthorized(message),
            403 if message.to_lowercase().contains("rate limit") => {
                Self::RateLimited(message)
            }
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            429 => Self::RateLimited(message),
            code if status.is_server_error() => Self::Server {
                status: code,
                message,
            },
            _ => Self::Request(format!("{status}: {message}")),
        }
    }
}

// Implement From for octocrab errors (GitHub API)
impl From<octocrab::Error> for ForgeError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => {
                Self::from_status(source.status_code, source.message.clone())
            }
            _ => {
                let message = err.to_string();
                let lower = message.to_lowercase();
                if lower.contains("hyper")
                    || lower.contains("connect")
                    || lower.contains("timed out")
                    || lower.contains("timeout")
                {
                    Self::Network(message)
                } else {
                    Self::Request(message)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_auth_failures_as_permanent() {
        let err = ForgeError::from_status(StatusCode::UNAUTHORIZED, "Bad creds");
        assert_eq!(err, ForgeError::Unauthorized("Bad creds".into()));
        assert!(!err.is_retryable());

        let err = ForgeError::from_status(
            StatusCode::FORBIDDEN,
            "Resource not accessible by integration",
        );
        assert!(matches!(err, ForgeError::Forbidden(_)));
        assert!(!err.is_retryable());

        let err = ForgeError::from_status(StatusCode::NOT_FOUND, "Not Found");
        assert!(!err.is_retryable());
    }

    #[test]
    fn classifies_rate_limits_and_server_errors_as_retryable() {
        let err = ForgeError::from_status(
            StatusCode::FORBIDDEN,
            "API rate limit exceeded for installation",
        );
        assert!(matches!(err, ForgeError::RateLimited(_)));
        assert!(err.is_retryable());

        let err =
            ForgeError::from_status(StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(err.is_retryable());

        let err = ForgeError::from_status(StatusCode::BAD_GATEWAY, "oops");
        assert_eq!(
            err,
            ForgeError::Server {
                status: 502,
                message: "oops".into()
            }
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn other_client_errors_are_not_retryable() {
        let err =
            ForgeError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "invalid");
        assert!(matches!(err, ForgeError::Request(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn validation_error_lists_every_message() {
        let err = RelnotesError::Validation(vec![
            "first problem".into(),
            "second problem".into(),
        ]);
        assert_eq!(
            err.to_string(),
            "Input validation failed: first problem; second problem"
        );
    }
}
