use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docshelf::ShelfError;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Rejected request: unbound collection or unusable file name.
    #[error("{0}")]
    BadRequest(String),

    /// Filesystem failure while listing or serving.
    #[error("{error}")]
    Internal { error: String, details: String },

    #[error("Not found")]
    NotFound,
}

/// JSON body of a 500 response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ServerError {
    pub fn internal(error: impl Into<String>, details: impl Into<String>) -> Self {
        ServerError::Internal {
            error: error.into(),
            details: details.into(),
        }
    }

    /// Map a core failure, using `context` as the client-facing message for
    /// I/O errors.
    pub fn from_shelf(err: ShelfError, context: impl Into<String>) -> Self {
        match err {
            ShelfError::CollectionUnconfigured(_) => {
                ServerError::BadRequest("Invalid folder.".to_string())
            }
            ShelfError::InvalidFileName(name) => {
                ServerError::BadRequest(format!("Invalid file name: {name}"))
            }
            ShelfError::OutsideCollection { path, .. } => ServerError::BadRequest(format!(
                "Invalid file name: {} is outside the collection",
                path.display()
            )),
            io_err @ ShelfError::Io { .. } => {
                ServerError::internal(context, io_err.io_message().unwrap_or_default())
            }
        }
    }

    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ServerError::BadRequest(message) => (status, message).into_response(),
            ServerError::Internal { error, details } => {
                (status, Json(ErrorResponse { error, details })).into_response()
            }
            ServerError::NotFound => (
                status,
                Json(ErrorResponse {
                    error: "Not found".to_string(),
                    details: "No route matches the requested path.".to_string(),
                }),
            )
                .into_response(),
        }
    }
}

impl From<ShelfError> for ServerError {
    fn from(err: ShelfError) -> Self {
        let context = err.to_string();
        ServerError::from_shelf(err, context)
    }
}
