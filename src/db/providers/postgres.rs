use std::time::Duration;

use sea_orm::ConnectOptions;

use super::registry::{DbProvider, DbProviderId};
use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

pub struct PostgresDbProvider;

impl DbProvider for PostgresDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Postgres
    }

    fn supports_url(&self, url: &str) -> bool {
        let normalized = url.trim().to_ascii_lowercase();
        normalized.starts_with("postgres://") || normalized.starts_with("postgresql://")
    }

    fn connect_options(&self, cfg: &DatabaseConfig) -> ConnectOptions {
        let mut options = ConnectOptions::new(cfg.url.clone());
        options
            .max_connections(cfg.max_connections)
            .min_connections(cfg.min_idle)
            .connect_timeout(CONNECT_TIMEOUT)
            .sqlx_logging(false);
        options
    }
}
