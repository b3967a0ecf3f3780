use std::sync::Arc;

use invoice_db::Database;

use crate::config::ApiConfig;

/// Shared application state available to all axum handlers via `State<AppState>`.
///
/// Cheap to clone: the database handle wraps a pooled `SqlitePool` and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database handle with repository accessors.
    pub db: Database,
    /// Server configuration (middleware settings, environment).
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Database, config: ApiConfig) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}
