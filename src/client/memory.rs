use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::TimeDelta;

use super::{ClientError, ClientResult, SourceMode, TodoSource};
use crate::{
    clock,
    schema::{
        CreateTodoInput, DeleteResult, DeleteTodoInput, Todo, ToggleTodoCompletionInput,
        UpdateTodoTextInput,
    },
};

/// Process-local todo records with the same contract as the server: ids are
/// never reused, mutations bump `updated_at`, delete always succeeds.
pub struct MemorySource {
    state: Mutex<MemoryState>,
}

struct MemoryState {
    todos: Vec<Todo>,
    next_id: i32,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::with_todos(Vec::new())
    }

    pub fn with_todos(todos: Vec<Todo>) -> Self {
        let next_id = todos.iter().map(|todo| todo.id).max().unwrap_or(0) + 1;
        Self {
            state: Mutex::new(MemoryState { todos, next_id }),
        }
    }

    /// Seed records shown when the backend cannot be reached.
    pub fn demo() -> Self {
        let now = clock::now();
        let day = TimeDelta::days(1);
        Self::with_todos(vec![
            Todo {
                id: 1,
                text: "Welcome to the Todo App! 🎉".to_string(),
                completed: false,
                created_at: now,
                updated_at: now,
            },
            Todo {
                id: 2,
                text: "Try adding, editing, and completing todos".to_string(),
                completed: false,
                created_at: now - day,
                updated_at: now - day,
            },
            Todo {
                id: 3,
                text: "This is a completed todo example".to_string(),
                completed: true,
                created_at: now - day * 2,
                updated_at: now - day,
            },
        ])
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    fn modify(&mut self, id: i32, apply: impl FnOnce(&mut Todo)) -> ClientResult<Todo> {
        let todo = self
            .todos
            .iter_mut()
            .find(|todo| todo.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Todo with id {id} not found")))?;
        apply(todo);
        todo.updated_at = clock::after(todo.updated_at);
        Ok(todo.clone())
    }
}

#[async_trait]
impl TodoSource for MemorySource {
    fn mode(&self) -> SourceMode {
        SourceMode::Demo
    }

    async fn list(&self) -> ClientResult<Vec<Todo>> {
        let mut todos = self.lock().todos.clone();
        todos.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(todos)
    }

    async fn create(&self, input: CreateTodoInput) -> ClientResult<Todo> {
        let mut state = self.lock();
        let now = clock::now();
        let todo = Todo {
            id: state.next_id,
            text: input.text.into(),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        state.next_id += 1;
        state.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_text(&self, input: UpdateTodoTextInput) -> ClientResult<Todo> {
        let text: String = input.text.into();
        self.lock().modify(input.id, move |todo| todo.text = text)
    }

    async fn toggle_completion(&self, input: ToggleTodoCompletionInput) -> ClientResult<Todo> {
        self.lock()
            .modify(input.id, |todo| todo.completed = input.completed)
    }

    async fn delete(&self, input: DeleteTodoInput) -> ClientResult<DeleteResult> {
        self.lock().todos.retain(|todo| todo.id != input.id);
        Ok(DeleteResult { success: true })
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySource;
    use crate::{
        client::{ClientError, TodoSource},
        schema::{
            CreateTodoInput, DeleteTodoInput, TodoText, ToggleTodoCompletionInput,
            UpdateTodoTextInput,
        },
    };

    fn create_input(raw: &str) -> CreateTodoInput {
        CreateTodoInput {
            text: TodoText::parse(raw).expect("test text should be valid"),
        }
    }

    #[tokio::test]
    async fn demo_lists_newest_first() {
        let source = MemorySource::demo();
        let ids: Vec<i32> = source
            .list()
            .await
            .expect("list should succeed")
            .into_iter()
            .map(|todo| todo.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn create_continues_after_seeded_ids() {
        let source = MemorySource::demo();
        let created = source
            .create(create_input("Fourth"))
            .await
            .expect("create should succeed");
        assert_eq!(created.id, 4);
        assert_eq!(created.created_at, created.updated_at);

        let listed = source.list().await.expect("list should succeed");
        assert_eq!(listed.first().map(|todo| todo.id), Some(4));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let source = MemorySource::new();
        let first = source
            .create(create_input("first"))
            .await
            .expect("create should succeed");
        source
            .delete(DeleteTodoInput { id: first.id })
            .await
            .expect("delete should succeed");

        let second = source
            .create(create_input("second"))
            .await
            .expect("create should succeed");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn mutations_bump_updated_at_and_keep_other_fields() {
        let source = MemorySource::new();
        let created = source
            .create(create_input("Buy milk"))
            .await
            .expect("create should succeed");

        let toggled = source
            .toggle_completion(ToggleTodoCompletionInput {
                id: created.id,
                completed: true,
            })
            .await
            .expect("toggle should succeed");
        assert!(toggled.completed);
        assert_eq!(toggled.text, "Buy milk");
        assert!(toggled.updated_at > created.updated_at);

        let renamed = source
            .update_text(UpdateTodoTextInput {
                id: created.id,
                text: TodoText::parse("Buy oat milk").expect("text should be valid"),
            })
            .await
            .expect("update should succeed");
        assert!(renamed.completed);
        assert_eq!(renamed.created_at, created.created_at);
        assert!(renamed.updated_at > toggled.updated_at);
    }

    #[tokio::test]
    async fn missing_id_is_not_found_but_delete_succeeds() {
        let source = MemorySource::new();

        let err = source
            .toggle_completion(ToggleTodoCompletionInput {
                id: 999,
                completed: true,
            })
            .await
            .expect_err("toggle should fail");
        assert!(matches!(err, ClientError::NotFound(message) if message.contains("999")));

        let result = source
            .delete(DeleteTodoInput { id: 999 })
            .await
            .expect("delete should succeed");
        assert!(result.success);
    }
}
