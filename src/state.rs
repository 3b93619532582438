use crate::config::Config;
use crate::db::Database;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<Config>,
}

#[cfg(test)]
impl AppState {
    /// State backed by a fresh in-memory database
    pub(crate) async fn for_tests(config: Config) -> Self {
        let db = Database::from_config(&config)
            .await
            .expect("Failed to open in-memory database");
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
