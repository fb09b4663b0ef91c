//! Caller-facing error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Handler error: an HTTP status plus an `{"erro": ...}` JSON body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    erro: String,
}

impl ApiError {
    /// 400 - request rejected before any write
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 404 - no record with the given identifier
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { erro: self.message })).into_response()
    }
}

impl From<cadastro_core::Error> for ApiError {
    fn from(err: cadastro_core::Error) -> Self {
        match err {
            cadastro_core::Error::Validation(message) => Self::validation(message),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: other.to_string(),
            },
        }
    }
}
