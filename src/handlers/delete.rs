use crate::error::{ApiError, ErrorResponse};
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /api/delete_record/:id handler - Remove a record
#[utoipa::path(
    delete,
    path = routes::DELETE_RECORD,
    params(
        ("id" = i64, Path, description = "Record id")
    ),
    responses(
        (status = 200, description = "Record deleted", body = MessageResponse),
        (status = 400, description = "Invalid record id", body = ErrorResponse),
        (status = 404, description = "Record not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "records"
)]
pub async fn delete_record_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_record_id(&id_str)?;

    if !state.db.delete_record(id).await? {
        tracing::info!("Record not found for delete: {}", id);
        return Err(ApiError::RecordNotFound(id));
    }

    tracing::info!("Deleted record with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Record deleted".to_string(),
            record_id: None,
        }),
    ))
}

pub(crate) fn parse_record_id(id_str: &str) -> Result<i64, ApiError> {
    id_str
        .parse::<i64>()
        .map_err(|_| ApiError::InvalidRecordId(id_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::db::NewRecord;
    use axum::{body::Body, http::Request, routing::delete, Router};
    use chrono::NaiveDate;
    use tower::ServiceExt;

    async fn setup_test_app() -> (Router, AppState) {
        let state = AppState::for_tests(test_config("sqlite::memory:")).await;
        let app = Router::new()
            .route(routes::DELETE_RECORD, delete(delete_record_handler))
            .with_state(state.clone());
        (app, state)
    }

    async fn send_delete(app: Router, id: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/delete_record/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_delete_record_success() {
        let (app, state) = setup_test_app().await;
        let id = state
            .db
            .add_record(NewRecord {
                date: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
                amount: 8.0,
                category_id: None,
                remarks: None,
            })
            .await
            .unwrap();

        let response = send_delete(app.clone(), &id.to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.db.list_records().await.unwrap().is_empty());

        // Deleting again reports the record as missing.
        let response = send_delete(app, &id.to_string()).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_record_not_found() {
        let (app, _) = setup_test_app().await;

        let response = send_delete(app, "12345").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.error.contains("Record not found: 12345"));
    }

    #[tokio::test]
    async fn test_delete_record_invalid_id() {
        let (app, _) = setup_test_app().await;

        let response = send_delete(app, "abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(error_response.error.contains("Invalid record id"));
    }
}
