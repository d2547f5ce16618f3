use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    IntoActiveModel, PrimaryKeyTrait, QueryOrder,
};

use super::base_traits::{HasTimestampColumns, TimestampedActiveModel, TimestampedModel};
use super::error::{DaoLayerError, DaoResult};
use crate::clock;

type DaoModel<D> = <<D as DaoBase>::Entity as EntityTrait>::Model;

/// Point operations over a single table keyed by a store-assigned `i32` id.
#[async_trait::async_trait]
pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model: FromQueryResult
        + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel>
        + TimestampedModel
        + Send
        + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + TimestampedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<i32> + Send + Sync,
    Self::Entity: HasTimestampColumns,
{
    type Entity: EntityTrait + Send + Sync;
    const ENTITY_NAME: &'static str;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<DaoModel<Self>> {
        let now = clock::now();
        let mut active = data.into_active_model();
        active.set_created_at(now);
        active.set_updated_at(now);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: i32) -> DaoResult<DaoModel<Self>> {
        let model = Self::Entity::find_by_id(id)
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        model.ok_or(DaoLayerError::NotFound {
            entity: Self::ENTITY_NAME,
            id,
        })
    }

    /// Every row, newest first. Rows created in the same instant fall back to
    /// descending id so the order is stable.
    async fn find_all(&self) -> DaoResult<Vec<DaoModel<Self>>> {
        Self::Entity::find()
            .order_by_desc(Self::Entity::created_at_column())
            .order_by_desc(Self::Entity::id_column())
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn update<F>(&self, id: i32, apply: F) -> DaoResult<DaoModel<Self>>
    where
        F: for<'a> FnOnce(&'a mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    {
        let model = self.find_by_id(id).await?;
        let updated_at = clock::after(model.updated_at());

        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(updated_at);

        // The row can be deleted between the read above and this write.
        active.update(self.db()).await.map_err(|err| match err {
            DbErr::RecordNotUpdated => DaoLayerError::NotFound {
                entity: Self::ENTITY_NAME,
                id,
            },
            other => DaoLayerError::Db(other),
        })
    }

    /// Returns the number of rows removed; a missing id is not an error.
    async fn delete(&self, id: i32) -> DaoResult<u64> {
        let result = Self::Entity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        Ok(result.rows_affected)
    }
}
