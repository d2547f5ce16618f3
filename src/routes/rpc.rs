use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    clock,
    procedure::Procedure,
    response::{ApiResult, JsonApiResponse},
    routes::RpcInput,
    schema::{
        CreateTodoInput, DeleteResult, DeleteTodoInput, HealthStatus, Todo,
        ToggleTodoCompletionInput, UpdateTodoTextInput,
    },
    services::{ServiceContext, TodoService},
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(Procedure::Healthcheck.path(), get(healthcheck))
        .route(Procedure::List.path(), get(list_todos))
        .route(Procedure::Create.path(), post(create_todo))
        .route(Procedure::UpdateText.path(), post(update_todo_text))
        .route(Procedure::ToggleCompletion.path(), post(toggle_todo_completion))
        .route(Procedure::Delete.path(), post(delete_todo))
        .with_state(state)
}

async fn healthcheck() -> ApiResult<HealthStatus> {
    JsonApiResponse::ok(HealthStatus {
        status: "ok".to_string(),
        timestamp: clock::now(),
    })
}

async fn list_todos(State(state): State<Arc<AppState>>) -> ApiResult<Vec<Todo>> {
    let todos = todo_service_from_state(state.as_ref()).list().await?;
    JsonApiResponse::ok(todos)
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    RpcInput(input): RpcInput<CreateTodoInput>,
) -> ApiResult<Todo> {
    let todo = todo_service_from_state(state.as_ref()).create(input).await?;
    JsonApiResponse::ok(todo)
}

async fn update_todo_text(
    State(state): State<Arc<AppState>>,
    RpcInput(input): RpcInput<UpdateTodoTextInput>,
) -> ApiResult<Todo> {
    let todo = todo_service_from_state(state.as_ref())
        .update_text(input)
        .await?;
    JsonApiResponse::ok(todo)
}

async fn toggle_todo_completion(
    State(state): State<Arc<AppState>>,
    RpcInput(input): RpcInput<ToggleTodoCompletionInput>,
) -> ApiResult<Todo> {
    let todo = todo_service_from_state(state.as_ref())
        .toggle_completion(input)
        .await?;
    JsonApiResponse::ok(todo)
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    RpcInput(input): RpcInput<DeleteTodoInput>,
) -> ApiResult<DeleteResult> {
    let result = todo_service_from_state(state.as_ref()).delete(input).await?;
    JsonApiResponse::ok(result)
}

fn todo_service_from_state(state: &AppState) -> TodoService {
    ServiceContext::from_state(state).todo()
}
