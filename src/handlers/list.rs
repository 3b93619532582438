use crate::error::{ApiError, ErrorResponse};
use crate::models::RecordResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/get_records handler - List all records
///
/// Records come back in insertion order, each carrying the name of its
/// category (empty when it has none).
#[utoipa::path(
    get,
    path = routes::GET_RECORDS,
    responses(
        (status = 200, description = "All records", body = Vec<RecordResponse>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "records"
)]
pub async fn list_records_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<RecordResponse>>), ApiError> {
    let records: Vec<RecordResponse> = state
        .db
        .list_records()
        .await?
        .into_iter()
        .map(RecordResponse::from)
        .collect();

    tracing::info!("Listed {} records", records.len());
    Ok((StatusCode::OK, Json(records)))
}
