use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("Task not found for id: {0}")]
    NotFound(i64),

    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Convert TaskError to AppError for standardized error responses
impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::NotFound(id) => {
                AppError::NotFound(format!("Task not found for id: {}", id))
            }
            TaskError::InvalidStatus(value) => {
                AppError::BadRequest(format!("Invalid task status: {}", value))
            }
            TaskError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
