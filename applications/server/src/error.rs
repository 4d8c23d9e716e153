/// Server error types
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use lathe_codec::CodecError;
use lathe_mastering::MasteringError;
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Mastering error: {0}")]
    Mastering(#[from] MasteringError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Codec(ref e) => {
                // Bad upload, not a server fault
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ServerError::Mastering(MasteringError::LoudnessMeasurement(ref msg)) => {
                // The upload decoded fine but cannot be mastered (e.g. silence)
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Loudness measurement failed: {}", msg),
                )
            }
            ServerError::Mastering(ref e) => (StatusCode::BAD_REQUEST, e.to_string()),
            ServerError::Config(ref msg) => {
                tracing::error!("Config error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Configuration error".to_string(),
                )
            }
            ServerError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
