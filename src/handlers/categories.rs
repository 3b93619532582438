use crate::error::{ApiError, ErrorResponse};
use crate::models::CategoryResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /api/get_categories handler - List all categories
#[utoipa::path(
    get,
    path = routes::GET_CATEGORIES,
    responses(
        (status = 200, description = "All categories", body = Vec<CategoryResponse>),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "categories"
)]
pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<CategoryResponse>>), ApiError> {
    let categories: Vec<CategoryResponse> = state
        .db
        .list_categories()
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();

    tracing::debug!("Listed {} categories", categories.len());
    Ok((StatusCode::OK, Json(categories)))
}
