use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccountError {
    /// Field or role-resolution rules failed; carries the ordered error
    /// list accumulated across all checks.
    #[error("validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("user with id {0} has not found")]
    NotFound(i32),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let (status, errors) = match self {
            AccountError::Validation(errors) => (StatusCode::BAD_REQUEST, errors),
            AccountError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                vec![format!("user with id {} has not found", id)],
            ),
            AccountError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    vec!["an internal error occurred".to_string()],
                )
            }
        };

        (
            status,
            Json(json!({
                "success": false,
                "status": status.as_u16(),
                "errors": errors,
            })),
        )
            .into_response()
    }
}
