use std::{fmt, future::Future, sync::Arc};

use super::{ClientError, ClientResult, MemorySource, SourceMode, TodoSource};
use crate::schema::{
    CreateTodoInput, DeleteTodoInput, Todo, TodoText, ToggleTodoCompletionInput,
    UpdateTodoTextInput,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Loaded,
    Creating,
    Editing { id: i32, draft: String },
    Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Local copy of the record set plus the phase of the current interaction.
///
/// Records returned by the source replace their local counterpart by id; new
/// records are prepended so the list stays newest first. When the source
/// fails for reasons other than validation or a missing id, the view swaps to
/// a [`MemorySource`] holding the records it already has and keeps working in
/// demo mode.
pub struct TodoView {
    source: Arc<dyn TodoSource>,
    todos: Vec<Todo>,
    phase: Phase,
    notice: Option<String>,
}

impl TodoView {
    pub fn new(source: Arc<dyn TodoSource>) -> Self {
        Self {
            source,
            todos: Vec::new(),
            phase: Phase::Loading,
            notice: None,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn mode(&self) -> SourceMode {
        self.source.mode()
    }

    /// Set once the view has fallen back to demo mode.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn pending(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| !todo.completed).collect()
    }

    pub fn completed(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|todo| todo.completed).collect()
    }

    pub fn stats(&self) -> ViewStats {
        let completed = self.todos.iter().filter(|todo| todo.completed).count();
        ViewStats {
            total: self.todos.len(),
            pending: self.todos.len() - completed,
            completed,
        }
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        self.phase = Phase::Loading;
        let listed = self.source.list().await;
        match listed {
            Ok(todos) => {
                self.todos = todos;
                self.phase = Phase::Loaded;
                Ok(())
            }
            Err(err) if err.is_expected() => Err(self.fail(err)),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load todos, switching to demo mode");
                let demo = MemorySource::demo();
                self.todos = demo.list().await?;
                self.source = Arc::new(demo);
                self.notice = Some("Backend unavailable. Using local demo mode.".to_string());
                self.phase = Phase::Loaded;
                Ok(())
            }
        }
    }

    /// Invalid text is rejected locally and leaves the phase unchanged.
    pub async fn create(&mut self, raw: &str) -> ClientResult<Todo> {
        let text = TodoText::parse(raw)?;
        let previous = std::mem::replace(&mut self.phase, Phase::Creating);

        let input = CreateTodoInput { text };
        let result = self
            .attempt("create", move |source| {
                let input = input.clone();
                async move { source.create(input).await }
            })
            .await;

        match result {
            Ok(todo) => {
                self.todos.insert(0, todo.clone());
                self.phase = match previous {
                    editing @ Phase::Editing { .. } => editing,
                    _ => Phase::Loaded,
                };
                Ok(todo)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn start_edit(&mut self, id: i32) -> ClientResult<()> {
        let todo = self.find(id)?;
        self.phase = Phase::Editing {
            id,
            draft: todo.text.clone(),
        };
        Ok(())
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Phase::Editing { draft, .. } = &mut self.phase {
            *draft = text.into();
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.phase, Phase::Editing { .. }) {
            self.phase = Phase::Loaded;
        }
    }

    /// Sends the current draft. An invalid draft keeps the view in editing.
    pub async fn save_edit(&mut self) -> ClientResult<Todo> {
        let Phase::Editing { id, draft } = &self.phase else {
            return Err(ClientError::Validation("No todo is being edited".to_string()));
        };
        let input = UpdateTodoTextInput {
            id: *id,
            text: TodoText::parse(draft)?,
        };

        let result = self
            .attempt("update", move |source| {
                let input = input.clone();
                async move { source.update_text(input).await }
            })
            .await;
        self.settle(result, true)
    }

    pub async fn toggle(&mut self, id: i32) -> ClientResult<Todo> {
        let input = ToggleTodoCompletionInput {
            id,
            completed: !self.find(id)?.completed,
        };

        let result = self
            .attempt("toggle", move |source| {
                let input = input.clone();
                async move { source.toggle_completion(input).await }
            })
            .await;
        self.settle(result, false)
    }

    pub async fn delete(&mut self, id: i32) -> ClientResult<()> {
        let result = self
            .attempt("delete", move |source| async move {
                source.delete(DeleteTodoInput { id }).await
            })
            .await;

        match result {
            Ok(_) => {
                self.todos.retain(|todo| todo.id != id);
                if matches!(self.phase, Phase::Editing { id: editing, .. } if editing == id) {
                    self.phase = Phase::Loaded;
                }
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    pub fn dismiss_error(&mut self) {
        if matches!(self.phase, Phase::Error { .. }) {
            self.phase = Phase::Loaded;
        }
    }

    fn find(&self, id: i32) -> ClientResult<&Todo> {
        self.todos
            .iter()
            .find(|todo| todo.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("Todo with id {id} not found")))
    }

    /// Reconciles a returned record. An open edit survives unless this call
    /// was the one saving it.
    fn settle(&mut self, result: ClientResult<Todo>, saves_edit: bool) -> ClientResult<Todo> {
        match result {
            Ok(todo) => {
                if let Some(slot) = self.todos.iter_mut().find(|local| local.id == todo.id) {
                    *slot = todo.clone();
                }
                if saves_edit || !matches!(self.phase, Phase::Editing { .. }) {
                    self.phase = Phase::Loaded;
                }
                Ok(todo)
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        self.phase = Phase::Error {
            message: err.to_string(),
        };
        err
    }

    /// Runs `op` against the current source. A remote failure the user cannot
    /// act on switches to demo mode and replays `op` locally.
    async fn attempt<T, F, Fut>(&mut self, action: &str, op: F) -> ClientResult<T>
    where
        F: Fn(Arc<dyn TodoSource>) -> Fut,
        Fut: Future<Output = ClientResult<T>>,
    {
        let first = op(Arc::clone(&self.source)).await;
        match first {
            Err(err) if !err.is_expected() && self.source.mode() == SourceMode::Remote => {
                tracing::warn!(error = %err, action, "todo request failed, switching to demo mode");
                self.source = Arc::new(MemorySource::with_todos(self.todos.clone()));
                self.notice = Some(format!("Failed to {action} todo. Using local demo mode."));
                op(Arc::clone(&self.source)).await
            }
            result => result,
        }
    }
}

impl fmt::Display for TodoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats();
        writeln!(
            f,
            "Todos ({} pending, {} completed)",
            stats.pending, stats.completed
        )?;
        if let Some(notice) = &self.notice {
            writeln!(f, "[demo] {notice}")?;
        }
        match &self.phase {
            Phase::Loading => return writeln!(f, "Loading..."),
            Phase::Error { message } => writeln!(f, "! {message}")?,
            _ => {}
        }
        if self.todos.is_empty() {
            return writeln!(f, "No todos yet.");
        }

        for (title, todos) in [("Pending", self.pending()), ("Completed", self.completed())] {
            if todos.is_empty() {
                continue;
            }
            writeln!(f, "{title}")?;
            for todo in todos {
                let mark = if todo.completed { 'x' } else { ' ' };
                match &self.phase {
                    Phase::Editing { id, draft } if *id == todo.id => {
                        writeln!(f, "  [{mark}] #{} > {draft}", todo.id)?
                    }
                    _ => writeln!(f, "  [{mark}] #{} {}", todo.id, todo.text)?,
                }
            }
        }
        Ok(())
    }
}
