use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::default_registry;
use crate::config::DatabaseConfig;

pub const ENTITY_REGISTRY_PREFIX: &str = "todo_rpc::db::entities::*";

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let db = default_registry()?.connect(cfg).await?;
    sync_schema(&db).await?;
    Ok(db)
}

pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry(ENTITY_REGISTRY_PREFIX)
        .sync(db)
        .await?;
    Ok(())
}
