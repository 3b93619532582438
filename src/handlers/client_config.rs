use crate::client_config::{request_origin, resolve_api_base_url};
use crate::models::ClientConfigResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};

/// GET /api/client_config handler - Settings for the browser client
///
/// Tells the client which base URL to use for API calls: the configured
/// override if any, otherwise the origin the page was loaded from.
#[utoipa::path(
    get,
    path = routes::CLIENT_CONFIG,
    responses(
        (status = 200, description = "Client settings", body = ClientConfigResponse)
    ),
    tag = "client"
)]
pub async fn client_config_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ClientConfigResponse>) {
    let origin = request_origin(&headers, &state.config.fallback_origin());
    let api_base_url = resolve_api_base_url(state.config.client_api_url.as_deref(), &origin);

    (StatusCode::OK, Json(ClientConfigResponse { api_base_url }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use axum::{body::Body, http::Request, routing::get, Router};
    use tower::ServiceExt;

    async fn fetch(client_api_url: Option<&str>, host: &str) -> ClientConfigResponse {
        let mut config = test_config("sqlite::memory:");
        config.client_api_url = client_api_url.map(str::to_string);
        let state = AppState::for_tests(config).await;

        let app = Router::new()
            .route(routes::CLIENT_CONFIG, get(client_config_handler))
            .with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/api/client_config")
                    .header("host", host)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_client_config_uses_override() {
        let config = fetch(Some("https://api.books.example"), "localhost:5002").await;
        assert_eq!(config.api_base_url, "https://api.books.example");
    }

    #[tokio::test]
    async fn test_client_config_defaults_to_page_origin() {
        let config = fetch(None, "localhost:5002").await;
        assert_eq!(config.api_base_url, "http://localhost:5002");
    }

    #[tokio::test]
    async fn test_client_config_empty_override_ignored() {
        let config = fetch(Some(""), "books.local:8080").await;
        assert_eq!(config.api_base_url, "http://books.local:8080");
    }
}
