use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};

use super::{ClientError, ClientResult, SourceMode, TodoSource};
use crate::{
    procedure::Procedure,
    response::JsonApiResponse,
    routes::API_PREFIX,
    schema::{
        CreateTodoInput, DeleteResult, DeleteTodoInput, HealthStatus, Todo,
        ToggleTodoCompletionInput, UpdateTodoTextInput,
    },
};

/// Calls the procedures of a running server over HTTP.
#[derive(Clone)]
pub struct RemoteSource {
    http: Client,
    base_url: String,
}

impl RemoteSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn url(&self, procedure: Procedure) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, procedure.path())
    }

    pub async fn healthcheck(&self) -> ClientResult<HealthStatus> {
        self.query(Procedure::Healthcheck).await
    }

    async fn query<T: DeserializeOwned>(&self, procedure: Procedure) -> ClientResult<T> {
        let response = self.http.get(self.url(procedure)).send().await?;
        decode(response).await
    }

    async fn mutate<I, T>(&self, procedure: Procedure, input: &I) -> ClientResult<T>
    where
        I: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(self.url(procedure))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let envelope: JsonApiResponse<serde_json::Value> = response.json().await?;

    if status.is_success() {
        return Ok(serde_json::from_value(envelope.data)?);
    }

    Err(match status {
        StatusCode::BAD_REQUEST => ClientError::Validation(envelope.message),
        StatusCode::NOT_FOUND => ClientError::NotFound(envelope.message),
        _ => ClientError::Server {
            status: status.as_u16(),
            message: envelope.message,
        },
    })
}

#[async_trait]
impl TodoSource for RemoteSource {
    fn mode(&self) -> SourceMode {
        SourceMode::Remote
    }

    async fn list(&self) -> ClientResult<Vec<Todo>> {
        self.query(Procedure::List).await
    }

    async fn create(&self, input: CreateTodoInput) -> ClientResult<Todo> {
        self.mutate(Procedure::Create, &input).await
    }

    async fn update_text(&self, input: UpdateTodoTextInput) -> ClientResult<Todo> {
        self.mutate(Procedure::UpdateText, &input).await
    }

    async fn toggle_completion(&self, input: ToggleTodoCompletionInput) -> ClientResult<Todo> {
        self.mutate(Procedure::ToggleCompletion, &input).await
    }

    async fn delete(&self, input: DeleteTodoInput) -> ClientResult<DeleteResult> {
        self.mutate(Procedure::Delete, &input).await
    }
}
