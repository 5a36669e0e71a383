//! HTTP rendering of boundary errors
use archgrade_core::EngineError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            EngineError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            EngineError::MalformedInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
            EngineError::Profile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(code = self.0.code(), %status, "Request failed: {}", self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
