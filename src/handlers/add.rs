use crate::error::{ApiError, ErrorResponse};
use crate::models::{AddRecordRequest, MessageResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// POST /api/add_record handler - Store a new record
#[utoipa::path(
    post,
    path = routes::ADD_RECORD,
    request_body = AddRecordRequest,
    responses(
        (status = 200, description = "Record added", body = MessageResponse),
        (status = 400, description = "Missing field, invalid date or amount, or unknown category", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "records"
)]
pub async fn add_record_handler(
    State(state): State<AppState>,
    Json(request): Json<AddRecordRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let record = request.into_new_record()?;

    if let Some(category_id) = record.category_id {
        if !state.db.category_exists(category_id).await? {
            return Err(ApiError::UnknownCategory(category_id));
        }
    }

    let id = state.db.add_record(record).await?;

    tracing::info!("Added record with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Record added".to_string(),
            record_id: Some(id),
        }),
    ))
}
