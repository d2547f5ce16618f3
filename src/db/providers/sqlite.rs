use std::time::Duration;

use sea_orm::ConnectOptions;

use super::registry::{DbProvider, DbProviderId};
use crate::config::DatabaseConfig;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

pub struct SqliteDbProvider;

impl DbProvider for SqliteDbProvider {
    fn id(&self) -> DbProviderId {
        DbProviderId::Sqlite
    }

    fn supports_url(&self, url: &str) -> bool {
        url.trim().to_ascii_lowercase().starts_with("sqlite:")
    }

    fn connect_options(&self, cfg: &DatabaseConfig) -> ConnectOptions {
        // Every connection to an in-memory database opens a fresh, empty one.
        let (max_connections, min_idle) = if is_memory_url(&cfg.url) {
            (1, 1)
        } else {
            (cfg.max_connections, cfg.min_idle)
        };

        let mut options = ConnectOptions::new(cfg.url.clone());
        options
            .max_connections(max_connections)
            .min_connections(min_idle)
            .connect_timeout(CONNECT_TIMEOUT)
            .sqlx_logging(false)
            // applied to each pooled connection as it opens
            .map_sqlx_sqlite_opts(|opts| opts.busy_timeout(BUSY_TIMEOUT));
        options
    }
}

fn is_memory_url(url: &str) -> bool {
    let normalized = url.trim().to_ascii_lowercase();
    normalized.contains(":memory:") || normalized.contains("mode=memory")
}
