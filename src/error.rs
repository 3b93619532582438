use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant renders as a JSON `{"error": ...}` body with a status code
/// matching the failure.
#[derive(Debug)]
pub enum ApiError {
    /// Record id in the path is not an integer
    InvalidRecordId(String),
    /// No record with this id
    RecordNotFound(i64),
    /// Date is not in YYYY-MM-DD form
    InvalidDate(String),
    /// Amount is neither a number nor a numeric string
    InvalidAmount(String),
    /// category_id does not reference an existing category
    UnknownCategory(i64),
    /// Required field absent from the request body
    MissingField(&'static str),
    /// Database operation error
    DatabaseError(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::InvalidRecordId(id) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid record id: expected an integer, got '{}'", id),
            ),
            ApiError::RecordNotFound(id) => (
                StatusCode::NOT_FOUND,
                format!("Record not found: {}", id),
            ),
            ApiError::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid date format: expected YYYY-MM-DD, got '{}'", date),
            ),
            ApiError::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid amount: expected a number, got {}", amount),
            ),
            ApiError::UnknownCategory(id) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown category: {}", id),
            ),
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {}", field),
            ),
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", err),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}
