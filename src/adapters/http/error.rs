use crate::utils::error::CourseError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// Error returned by the HTTP handlers. Bodies keep the shapes REST clients of
/// this API already parse: `{"detail": ..}`, `{"non_field_errors": [..]}` and
/// `{"<field>": [..]}`.
#[derive(Debug)]
pub enum ApiError {
    Course(CourseError),
    MalformedBody(String),
    NotFound,
}

impl From<CourseError> for ApiError {
    fn from(err: CourseError) -> Self {
        Self::Course(err)
    }
}

impl ApiError {
    fn status_and_body(&self) -> (StatusCode, Value) {
        match self {
            Self::MalformedBody(message) => (StatusCode::BAD_REQUEST, json!({ "detail": message })),
            Self::NotFound => not_found(),
            Self::Course(err) => match err {
                CourseError::EnrollmentLimitExceeded { .. } => (
                    StatusCode::BAD_REQUEST,
                    json!({ "non_field_errors": [err.to_string()] }),
                ),
                CourseError::FieldValidationError { field, message } => {
                    let mut body = serde_json::Map::new();
                    body.insert(field.clone(), json!([message]));
                    (StatusCode::BAD_REQUEST, Value::Object(body))
                }
                CourseError::NotFound { .. } => not_found(),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "A server error occurred." }),
                ),
            },
        }
    }
}

fn not_found() -> (StatusCode, Value) {
    (StatusCode::NOT_FOUND, json!({ "detail": "Not found." }))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        match &self {
            Self::Course(err) if !err.is_client_error() => {
                tracing::error!(
                    "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                    err,
                    err.category(),
                    err.severity()
                );
            }
            Self::Course(err) => tracing::debug!("Request rejected: {}", err),
            Self::MalformedBody(message) => tracing::debug!("Malformed request body: {}", message),
            Self::NotFound => {}
        }
        (status, Json(body)).into_response()
    }
}
