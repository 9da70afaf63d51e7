/*
[INPUT]:  Error sources (validation, HTTP transport, task-store responses)
[OUTPUT]: Structured error taxonomy with user-facing messages
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use crate::types::TaskId;
use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for task-store operations
#[derive(Error, Debug)]
pub enum TaskStoreError {
    /// Client-side input rejected before any network call
    #[error("validation failed: {0}")]
    Validation(String),

    /// Credential missing or rejected by the store
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Network/transport failure reaching the store
    #[error("task store unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// Delete target absent server-side
    #[error("task {task_id} not found")]
    NotFound { task_id: TaskId },

    /// Response could not be parsed into the expected shape,
    /// or the store answered with an unexpected status
    #[error("invalid response from task store: {0}")]
    Invalid(String),
}

impl TaskStoreError {
    /// True when no network call was issued for this failure
    pub fn is_validation(&self) -> bool {
        matches!(self, TaskStoreError::Validation(_))
    }

    /// True when the credential should be re-acquired before retrying
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TaskStoreError::Unauthorized(_))
    }

    /// Map a non-2xx status plus its error payload onto the taxonomy
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                TaskStoreError::Unauthorized(message)
            }
            _ => TaskStoreError::Invalid(format!("status {status}: {message}")),
        }
    }
}

impl From<serde_json::Error> for TaskStoreError {
    fn from(err: serde_json::Error) -> Self {
        TaskStoreError::Invalid(err.to_string())
    }
}

impl From<url::ParseError> for TaskStoreError {
    fn from(err: url::ParseError) -> Self {
        TaskStoreError::Invalid(format!("invalid URL: {err}"))
    }
}

/// Result type alias for task-store operations
pub type Result<T> = std::result::Result<T, TaskStoreError>;
