use sea_orm::{DatabaseConnection, Set};

use super::{DaoBase, DaoResult};
use crate::db::entities::{prelude::Todo, todo};

#[derive(Clone)]
pub struct TodoDao {
    db: DatabaseConnection,
}

impl DaoBase for TodoDao {
    type Entity = Todo;
    const ENTITY_NAME: &'static str = "Todo";

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl TodoDao {
    pub async fn create_todo(&self, text: &str) -> DaoResult<todo::Model> {
        let model = todo::ActiveModel {
            text: Set(text.to_string()),
            completed: Set(false),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn list_todos(&self) -> DaoResult<Vec<todo::Model>> {
        self.find_all().await
    }

    pub async fn update_text(&self, id: i32, text: &str) -> DaoResult<todo::Model> {
        let text = text.to_string();
        self.update(id, move |active| {
            active.text = Set(text);
        })
        .await
    }

    pub async fn set_completed(&self, id: i32, completed: bool) -> DaoResult<todo::Model> {
        self.update(id, move |active| {
            active.completed = Set(completed);
        })
        .await
    }

    pub async fn delete_todo(&self, id: i32) -> DaoResult<u64> {
        self.delete(id).await
    }
}
