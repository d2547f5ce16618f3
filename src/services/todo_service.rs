use crate::{
    db::dao::{DaoLayerError, TodoDao},
    error::AppError,
    schema::{
        CreateTodoInput, DeleteResult, DeleteTodoInput, Todo, ToggleTodoCompletionInput,
        UpdateTodoTextInput,
    },
};

#[derive(Clone, Copy, Debug)]
enum TodoOp {
    Create,
    List,
    UpdateText,
    ToggleCompletion,
    Delete,
}

impl TodoOp {
    fn failure_message(self) -> &'static str {
        match self {
            TodoOp::Create => "Failed to create todo",
            TodoOp::List => "Failed to list todos",
            TodoOp::UpdateText => "Failed to update todo text",
            TodoOp::ToggleCompletion => "Failed to toggle todo completion",
            TodoOp::Delete => "Failed to delete todo",
        }
    }
}

/// The five todo handlers. Each call is one store operation; nothing is kept
/// between calls.
#[derive(Clone)]
pub struct TodoService {
    todo_dao: TodoDao,
}

impl TodoService {
    pub fn new(todo_dao: TodoDao) -> Self {
        Self { todo_dao }
    }

    pub async fn create(&self, input: CreateTodoInput) -> Result<Todo, AppError> {
        let model = self
            .todo_dao
            .create_todo(input.text.as_str())
            .await
            .map_err(|err| map_error(TodoOp::Create, err))?;
        tracing::debug!(id = model.id, "todo created");
        Ok(model.into())
    }

    pub async fn list(&self) -> Result<Vec<Todo>, AppError> {
        let models = self
            .todo_dao
            .list_todos()
            .await
            .map_err(|err| map_error(TodoOp::List, err))?;
        Ok(models.into_iter().map(Todo::from).collect())
    }

    pub async fn update_text(&self, input: UpdateTodoTextInput) -> Result<Todo, AppError> {
        let model = self
            .todo_dao
            .update_text(input.id, input.text.as_str())
            .await
            .map_err(|err| map_error(TodoOp::UpdateText, err))?;
        Ok(model.into())
    }

    pub async fn toggle_completion(
        &self,
        input: ToggleTodoCompletionInput,
    ) -> Result<Todo, AppError> {
        let model = self
            .todo_dao
            .set_completed(input.id, input.completed)
            .await
            .map_err(|err| map_error(TodoOp::ToggleCompletion, err))?;
        Ok(model.into())
    }

    /// Succeeds whether or not the id existed.
    pub async fn delete(&self, input: DeleteTodoInput) -> Result<DeleteResult, AppError> {
        let removed = self
            .todo_dao
            .delete_todo(input.id)
            .await
            .map_err(|err| map_error(TodoOp::Delete, err))?;
        tracing::debug!(id = input.id, removed, "todo delete");
        Ok(DeleteResult { success: true })
    }
}

fn map_error(op: TodoOp, err: DaoLayerError) -> AppError {
    AppError::from_dao(op.failure_message(), err)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    use super::TodoService;
    use crate::{
        db::dao::{DaoBase, TodoDao},
        error::AppError,
        schema::{
            CreateTodoInput, DeleteTodoInput, TodoText, ToggleTodoCompletionInput,
            UpdateTodoTextInput,
        },
        test_helpers::sqlite_memory_db,
    };

    async fn service() -> TodoService {
        let db = sqlite_memory_db().await;
        TodoService::new(TodoDao::new(&db))
    }

    fn text(raw: &str) -> TodoText {
        TodoText::parse(raw).expect("test text should be valid")
    }

    async fn create(service: &TodoService, raw: &str) -> crate::schema::Todo {
        service
            .create(CreateTodoInput { text: text(raw) })
            .await
            .expect("create should succeed")
    }

    #[tokio::test]
    async fn create_then_list_returns_the_new_record() {
        let service = service().await;

        let created = create(&service, "Buy milk").await;
        assert_eq!(created.text, "Buy milk");
        assert!(!created.completed);
        assert_eq!(created.created_at, created.updated_at);

        let todos = service.list().await.expect("list should succeed");
        assert_eq!(todos, vec![created]);
    }

    #[tokio::test]
    async fn list_is_empty_without_records() {
        let service = service().await;
        let todos = service.list().await.expect("list should succeed");
        assert!(todos.is_empty());
    }

    #[tokio::test]
    async fn list_returns_newest_first() {
        let service = service().await;
        let first = create(&service, "First todo").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = create(&service, "Second todo").await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        let third = create(&service, "Third todo").await;

        let ids: Vec<i32> = service
            .list()
            .await
            .expect("list should succeed")
            .into_iter()
            .map(|todo| todo.id)
            .collect();
        assert_eq!(ids, vec![third.id, second.id, first.id]);
    }

    #[tokio::test]
    async fn update_text_bumps_updated_at_only() {
        let service = service().await;
        let created = create(&service, "Original todo text").await;

        let updated = service
            .update_text(UpdateTodoTextInput {
                id: created.id,
                text: text("Updated todo text"),
            })
            .await
            .expect("update should succeed");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.text, "Updated todo text");
        assert_eq!(updated.completed, created.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let stored = service.list().await.expect("list should succeed");
        assert_eq!(stored, vec![updated]);
    }

    #[tokio::test]
    async fn toggle_completion_keeps_text_and_created_at() {
        let service = service().await;
        let created = create(&service, "Walk the dog").await;

        let toggled = service
            .toggle_completion(ToggleTodoCompletionInput {
                id: created.id,
                completed: true,
            })
            .await
            .expect("toggle should succeed");
        assert!(toggled.completed);
        assert_eq!(toggled.text, created.text);
        assert_eq!(toggled.created_at, created.created_at);
        assert!(toggled.updated_at > created.updated_at);

        let untoggled = service
            .toggle_completion(ToggleTodoCompletionInput {
                id: created.id,
                completed: false,
            })
            .await
            .expect("toggle should succeed");
        assert!(!untoggled.completed);
        assert!(untoggled.updated_at > toggled.updated_at);
    }

    #[tokio::test]
    async fn mutations_on_missing_id_report_not_found() {
        let service = service().await;

        let err = service
            .update_text(UpdateTodoTextInput {
                id: 999,
                text: text("nothing here"),
            })
            .await
            .expect_err("update should fail");
        assert!(matches!(&err, AppError::NotFound(message) if message.contains("999")));

        let err = service
            .toggle_completion(ToggleTodoCompletionInput {
                id: 999,
                completed: true,
            })
            .await
            .expect_err("toggle should fail");
        assert!(matches!(&err, AppError::NotFound(message) if message.contains("999")));
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let service = service().await;
        let kept = create(&service, "Keep me").await;

        let result = service
            .delete(DeleteTodoInput { id: 999 })
            .await
            .expect("delete should succeed");
        assert!(result.success);
        assert_eq!(service.list().await.expect("list should succeed"), vec![kept]);
    }

    #[tokio::test]
    async fn delete_removes_only_the_target() {
        let service = service().await;
        let a = create(&service, "A").await;
        let b = create(&service, "B").await;
        let c = create(&service, "C").await;

        let result = service
            .delete(DeleteTodoInput { id: b.id })
            .await
            .expect("delete should succeed");
        assert!(result.success);

        let remaining = service.list().await.expect("list should succeed");
        assert_eq!(remaining, vec![c, a]);

        let again = service
            .delete(DeleteTodoInput { id: b.id })
            .await
            .expect("second delete should succeed");
        assert!(again.success);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let service = service().await;
        let first = create(&service, "first").await;
        service
            .delete(DeleteTodoInput { id: first.id })
            .await
            .expect("delete should succeed");

        let second = create(&service, "second").await;
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn concurrent_delete_during_update_is_not_found() {
        let row = crate::db::entities::todo::Model {
            id: 5,
            text: "a".to_string(),
            completed: false,
            created_at: crate::clock::now(),
            updated_at: crate::clock::now(),
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row], Vec::new()])
            .into_connection();
        let service = TodoService::new(TodoDao::new(&db));

        let err = service
            .update_text(UpdateTodoTextInput {
                id: 5,
                text: text("b"),
            })
            .await
            .expect_err("update should fail");
        assert!(matches!(&err, AppError::NotFound(_)));
        assert_eq!(err.message(), "Todo with id 5 not found");
    }

    #[tokio::test]
    async fn store_failures_become_generic_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection refused".to_string())])
            .into_connection();
        let service = TodoService::new(TodoDao::new(&db));

        let err = service
            .create(CreateTodoInput { text: text("Buy milk") })
            .await
            .expect_err("create should fail");
        assert!(matches!(&err, AppError::Store { .. }));
        assert_eq!(err.message(), "Failed to create todo");
    }
}
