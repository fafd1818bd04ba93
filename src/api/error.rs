//! API error kinds with distinct status mapping.
//!
//! Three kinds: input validation (400), upstream call failure (502), and
//! model-reply parse failure (500). The body is always the flat
//! `{"error": message}` object existing clients parse; a missing upload is
//! the fixed literal `No image`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::extract::preprocess::PreprocessError;
use crate::model::types::ModelError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request carried no `image` multipart field.
    #[error("No image")]
    MissingImage,

    /// Upload failed validation or decoding.
    #[error("{0}")]
    InvalidImage(String),

    /// The model call itself failed.
    #[error("{0}")]
    Upstream(String),

    /// The model reply was not the JSON the prompt demanded.
    #[error("Malformed model reply: {0}")]
    MalformedReply(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingImage | ApiError::InvalidImage(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(detail) => {
                tracing::error!(detail = %detail, "Model call failed");
                StatusCode::BAD_GATEWAY
            }
            ApiError::MalformedReply(detail) => {
                tracing::error!(detail = %detail, "Unparseable model reply");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Upstream(err.to_string())
    }
}

impl From<PreprocessError> for ApiError {
    fn from(err: PreprocessError) -> Self {
        ApiError::InvalidImage(err.to_string())
    }
}
