// Client-side error types
use serde_json::{json, Value};
use thiserror::Error;

use crate::types::HttpMethod;
use crate::validation::ValidationError;

/// Failure of a single API request. Display strings name the method and path.
#[derive(Debug, Clone, Error)]
pub enum RequestError {
    #[error("Error making {method} request to {path}: {reason}")]
    Transport {
        method: HttpMethod,
        path: String,
        reason: String,
    },

    #[error("Error making {method} request to {path}: {reason}")]
    InvalidBody {
        method: HttpMethod,
        path: String,
        reason: String,
    },

    #[error("Error making {method} request to {path}: Error: {message}")]
    Status {
        method: HttpMethod,
        path: String,
        status: u16,
        message: String,
    },

    #[error("Error making {method} request to {path}: request cancelled")]
    Cancelled { method: HttpMethod, path: String },

    #[error("Unexpected response from {method} {path}: {reason}")]
    Decode {
        method: HttpMethod,
        path: String,
        reason: String,
    },
}

impl RequestError {
    /// HTTP status when the server answered with a non-2xx code
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            RequestError::Transport { path, .. }
            | RequestError::InvalidBody { path, .. }
            | RequestError::Status { path, .. }
            | RequestError::Cancelled { path, .. }
            | RequestError::Decode { path, .. } => path,
        }
    }

    /// Uniform `{ "error": message }` body handed to callers of `ApiClient::call`
    pub fn to_json(&self) -> Value {
        json!({ "error": self.to_string() })
    }
}

/// Session persistence errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session record is not valid JSON: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Session update must be a JSON object, got {0}")]
    InvalidPatch(String),
}

/// At least one request of a fan-out failed; nothing from the batch is applied
#[derive(Debug, Clone, Error)]
#[error("{failed} of {total} requests failed: {first}")]
pub struct BatchError {
    pub failed: usize,
    pub total: usize,
    pub first: RequestError,
}

/// Error returned by the typed platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl PlatformError {
    pub fn is_validation(&self) -> bool {
        matches!(self, PlatformError::Validation(_))
    }

    /// Machine-readable code for JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            PlatformError::Validation(_) => "VALIDATION_ERROR",
            PlatformError::Request(RequestError::Status { .. }) => "HTTP_ERROR",
            PlatformError::Request(RequestError::Cancelled { .. }) => "CANCELLED",
            PlatformError::Request(_) => "REQUEST_FAILED",
            PlatformError::Batch(_) => "BATCH_FAILED",
            PlatformError::Session(_) => "SESSION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_message_names_method_and_path() {
        let err = RequestError::Status {
            method: HttpMethod::Get,
            path: "/x".into(),
            status: 404,
            message: "Not found".into(),
        };
        assert_eq!(err.to_string(), "Error making GET request to /x: Error: Not found");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_json()["error"], "Error making GET request to /x: Error: Not found");
    }

    #[test]
    fn batch_error_reports_counts() {
        let first = RequestError::Transport {
            method: HttpMethod::Delete,
            path: "/admin/user/delete".into(),
            reason: "connection refused".into(),
        };
        let err = BatchError { failed: 1, total: 3, first };
        assert!(err.to_string().starts_with("1 of 3 requests failed"));
    }
}
