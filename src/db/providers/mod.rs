mod postgres;
mod registry;
mod sqlite;

use std::sync::Arc;

pub use registry::{DbProvider, DbProviderId, DbProviders};

use self::{postgres::PostgresDbProvider, sqlite::SqliteDbProvider};

pub fn default_registry() -> anyhow::Result<DbProviders> {
    DbProviders::new()
        .with_provider(Arc::new(PostgresDbProvider))?
        .with_provider(Arc::new(SqliteDbProvider))
}

#[cfg(test)]
mod tests {
    use super::{DbProviderId, default_registry};

    #[test]
    fn default_registry_resolves_supported_schemes() {
        let providers = default_registry().expect("default providers should register");

        for (url, expected) in [
            ("postgres://todo@localhost/todos", DbProviderId::Postgres),
            ("postgresql://localhost/todos", DbProviderId::Postgres),
            ("sqlite::memory:", DbProviderId::Sqlite),
            ("sqlite://todo_rpc.db?mode=rwc", DbProviderId::Sqlite),
        ] {
            let provider = providers.provider_for_url(url).expect("url should resolve");
            assert_eq!(provider.id(), expected, "{url}");
        }

        assert!(providers.provider_for_url("mysql://localhost/todos").is_err());
    }
}
