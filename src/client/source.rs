use async_trait::async_trait;

use super::ClientResult;
use crate::schema::{
    CreateTodoInput, DeleteResult, DeleteTodoInput, Todo, ToggleTodoCompletionInput,
    UpdateTodoTextInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    Remote,
    /// Local records only; nothing reaches a server.
    Demo,
}

/// The five todo operations as seen by a client, independent of where the
/// records live.
#[async_trait]
pub trait TodoSource: Send + Sync {
    fn mode(&self) -> SourceMode;

    async fn list(&self) -> ClientResult<Vec<Todo>>;

    async fn create(&self, input: CreateTodoInput) -> ClientResult<Todo>;

    async fn update_text(&self, input: UpdateTodoTextInput) -> ClientResult<Todo>;

    async fn toggle_completion(&self, input: ToggleTodoCompletionInput) -> ClientResult<Todo>;

    async fn delete(&self, input: DeleteTodoInput) -> ClientResult<DeleteResult>;
}
