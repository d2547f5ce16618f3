use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    state::AppState,
};

pub const MEMORY_DATABASE_URL: &str = "sqlite::memory:";

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.database = DatabaseConfig {
        url: MEMORY_DATABASE_URL.to_string(),
        max_connections: 1,
        min_idle: 1,
    };
    cfg
}

/// Fresh in-memory sqlite database with the schema synced.
pub async fn sqlite_memory_db() -> DatabaseConnection {
    connection::connect(&test_config().database)
        .await
        .expect("connect to in-memory sqlite")
}

pub fn state_with_db(db: DatabaseConnection) -> Arc<AppState> {
    AppState::new(test_config(), db)
}

pub async fn test_state() -> Arc<AppState> {
    state_with_db(sqlite_memory_db().await)
}

pub async fn test_app() -> Router {
    app(test_state().await)
}
