use crate::db::CategoryRef;
use crate::error::{ApiError, ErrorResponse};
use crate::handlers::delete::parse_record_id;
use crate::models::{MessageResponse, UpdateRecordRequest};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// PUT /api/update_record/:id handler - Partially update a record
///
/// Only fields present in the body are changed. A category can be given by
/// id, or by name; a name nobody has used yet creates a new category.
#[utoipa::path(
    put,
    path = routes::UPDATE_RECORD,
    params(
        ("id" = i64, Path, description = "Record id")
    ),
    request_body = UpdateRecordRequest,
    responses(
        (status = 200, description = "Record updated", body = MessageResponse),
        (status = 400, description = "Invalid id, date, amount or category", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "records"
)]
pub async fn update_record_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(request): Json<UpdateRecordRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_record_id(&id_str)?;
    let update = request.into_update()?;

    if let Some(CategoryRef::Id(category_id)) = update.category {
        if !state.db.category_exists(category_id).await? {
            return Err(ApiError::UnknownCategory(category_id));
        }
    }

    tracing::debug!("Updating record {} with {:?}", id, update);

    if !state.db.update_record(id, update).await? {
        tracing::info!("Record not found for update: {}", id);
        return Err(ApiError::RecordNotFound(id));
    }

    tracing::info!("Updated record with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Record updated".to_string(),
            record_id: Some(id),
        }),
    ))
}
