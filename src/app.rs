//! Application router builder.
//!
//! [`build_app_router`] is shared by `main` and the router-level tests so
//! both run the same middleware stack.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::config::Config;
use crate::handlers;
use crate::routes;
use crate::state::AppState;

/// Build the full application [`Router`] with all middleware layers.
///
/// API routes are matched first; every other path falls through to the
/// browser client.
pub fn build_app_router(state: AppState) -> Result<Router> {
    let cors = build_cors_layer(&state.config)?;

    let router = Router::new()
        .route(routes::HEALTH, get(handlers::health_handler))
        .route(routes::ADD_RECORD, post(handlers::add_record_handler))
        .route(routes::GET_RECORDS, get(handlers::list_records_handler))
        .route(routes::DELETE_RECORD, delete(handlers::delete_record_handler))
        .route(routes::UPDATE_RECORD, put(handlers::update_record_handler))
        .route(routes::GET_CATEGORIES, get(handlers::list_categories_handler))
        .route(routes::CLIENT_CONFIG, get(handlers::client_config_handler))
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .fallback(handlers::serve_client)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state);

    Ok(router)
}

/// Bind the listening socket. `host` may be a hostname or an IP address.
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Port {} on {} is already in use or unavailable", port, host))
}

/// Build the CORS layer.
///
/// Debug mode, or an `ALLOWED_ORIGINS` containing `*`, accepts any origin by
/// echoing it back; otherwise only the listed origins are allowed.
pub fn build_cors_layer(config: &Config) -> Result<CorsLayer> {
    let allow_any = config.debug || config.allowed_origins.iter().any(|o| o == "*");

    let allow_origin = if allow_any {
        AllowOrigin::mirror_request()
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600)))
}
