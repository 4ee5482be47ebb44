use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    /// The message is returned to the client; the source is only logged.
    #[error("{message}: {source}")]
    Database {
        message: String,
        #[source]
        source: sqlx::Error,
    },
}

impl ApiError {
    /// Build a `map_err` adapter that wraps a store failure with a client-facing message.
    pub fn database(message: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let message = message.into();
        move |source| Self::Database { message, source }
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            Self::Validation(message) | Self::NotFound(message) => message,
            Self::Database { message, source } => {
                tracing::error!(error = %source, "{message}");
                message
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
