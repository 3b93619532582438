use crate::pages::find_page;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use std::path::Path;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Fallback handler serving the compiled browser client
///
/// Client page routes get `index.html` so the browser router can take over
/// on a hard reload. Anything else is looked up in the static directory.
pub async fn serve_client(State(state): State<AppState>, request: Request) -> Response {
    let static_dir = Path::new(&state.config.static_dir);

    let result = match find_page(request.uri().path()) {
        Some(route) => {
            tracing::debug!("Serving {:?} page ({}) for {}", route.page, route.name, request.uri().path());
            ServeFile::new(static_dir.join("index.html"))
                .oneshot(request)
                .await
        }
        None => ServeDir::new(static_dir).oneshot(request).await,
    };

    match result {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
