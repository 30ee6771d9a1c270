use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::figma_block::BlockParseError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// None of these are fatal: every variant becomes a JSON error body and the
/// caller may simply retry the action.
#[derive(Debug, Error)]
pub enum AppError {
    /// Empty API key, empty article, or an incomplete CTA selection.
    /// Raised before any network call.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// Network, authentication or quota failure from the completion call.
    #[error("Completion request failed: {0}")]
    Transport(#[from] LlmError),

    /// The completion text held no parseable JSON object.
    /// `preview` is a truncated copy of the raw text for manual recovery.
    #[error("Malformed response: {message}")]
    MalformedResponse { message: String, preview: String },

    #[error("Invalid block: {0}")]
    BlockParse(#[from] BlockParseError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, preview) = match &self {
            AppError::MissingInput(msg) => {
                (StatusCode::BAD_REQUEST, "MISSING_INPUT", msg.clone(), None)
            }
            AppError::Transport(e) => {
                tracing::error!("Completion error: {e}");
                // Reported verbatim: the message is what the user acts on (bad key, quota).
                (StatusCode::BAD_GATEWAY, "TRANSPORT_ERROR", e.to_string(), None)
            }
            AppError::MalformedResponse { message, preview } => {
                tracing::warn!("Malformed completion: {message}");
                (
                    StatusCode::BAD_GATEWAY,
                    "MALFORMED_RESPONSE",
                    message.clone(),
                    Some(preview.clone()),
                )
            }
            AppError::BlockParse(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "INVALID_BLOCK",
                e.to_string(),
                None,
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(preview) = preview {
            error["preview"] = json!(preview);
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
