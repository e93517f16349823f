use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use service::ServiceError;

/// HTTP-facing wrapper translating service failures into status + `{"error"}` bodies.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        let msg = self.0.to_string();
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}
