use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
use serde_json::{Value, json};
use tower::ServiceExt;

use todo_rpc::{
    routes::app,
    test_helpers::{state_with_db, test_app},
};

async fn call(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

async fn query(app: &Router, procedure: &str) -> (StatusCode, Value) {
    call(
        app,
        Request::builder()
            .uri(format!("/api/v1/rpc/{procedure}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn mutate_raw(app: &Router, procedure: &str, body: impl Into<Body>) -> (StatusCode, Value) {
    call(
        app,
        Request::builder()
            .method("POST")
            .uri(format!("/api/v1/rpc/{procedure}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap(),
    )
    .await
}

async fn mutate(app: &Router, procedure: &str, input: Value) -> (StatusCode, Value) {
    mutate_raw(app, procedure, input.to_string()).await
}

/// App whose store fails every query it receives.
fn app_without_store() -> Router {
    let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
    app(state_with_db(db))
}

#[tokio::test]
async fn healthcheck_reports_ok() {
    let app = test_app().await;
    let (status, body) = query(&app, "healthcheck").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    assert_eq!(body["data"]["status"], "ok");
    assert!(body["data"]["timestamp"].is_string());
}

#[tokio::test]
async fn todo_lifecycle() {
    let app = test_app().await;

    let (status, body) = query(&app, "list").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    let (status, body) = mutate(&app, "create", json!({ "text": "Buy milk" })).await;
    assert_eq!(status, StatusCode::OK);
    let created = body["data"].clone();
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["text"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert_eq!(created["created_at"], created["updated_at"]);

    let (_, body) = query(&app, "list").await;
    assert_eq!(body["data"], json!([created]));

    let (status, body) = mutate(
        &app,
        "toggleCompletion",
        json!({ "id": id, "completed": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["completed"], true);
    assert_eq!(body["data"]["text"], "Buy milk");
    assert_eq!(body["data"]["created_at"], created["created_at"]);

    let (status, body) = mutate(
        &app,
        "updateText",
        json!({ "id": id, "text": "Buy oat milk" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], "Buy oat milk");
    assert_eq!(body["data"]["completed"], true);

    let (status, body) = mutate(&app, "delete", json!({ "id": id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "success": true }));

    let (_, body) = query(&app, "list").await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn create_stores_trimmed_text() {
    let app = test_app().await;
    let (status, body) = mutate(&app, "create", json!({ "text": "  Walk the dog \n" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["text"], "Walk the dog");
}

#[tokio::test]
async fn list_is_newest_first() {
    let app = test_app().await;
    let mut ids = Vec::new();
    for text in ["first", "second", "third"] {
        let (_, body) = mutate(&app, "create", json!({ "text": text })).await;
        ids.push(body["data"]["id"].as_i64().unwrap());
    }

    let (_, body) = query(&app, "list").await;
    let listed: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|todo| todo["id"].as_i64().unwrap())
        .collect();
    ids.reverse();
    assert_eq!(listed, ids);
}

#[tokio::test]
async fn invalid_text_is_rejected_before_the_store() {
    let app = app_without_store();

    let cases = [
        ("create", json!({ "text": "" }), "Todo text cannot be empty"),
        ("create", json!({ "text": "   " }), "Todo text cannot be empty"),
        (
            "create",
            json!({ "text": "x".repeat(501) }),
            "Todo text too long",
        ),
        (
            "updateText",
            json!({ "id": 1, "text": "\t" }),
            "Todo text cannot be empty",
        ),
    ];

    for (procedure, input, expected) in cases {
        let (status, body) = mutate(&app, procedure, input).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{procedure}");
        assert_eq!(body["status"], 400);
        assert!(
            body["message"].as_str().unwrap().contains(expected),
            "{procedure}: {}",
            body["message"]
        );
        assert_eq!(body["data"], Value::Null);
    }
}

#[tokio::test]
async fn malformed_inputs_are_rejected_before_the_store() {
    let app = app_without_store();

    let cases = [
        ("create", json!({})),
        ("create", json!({ "text": 42 })),
        ("updateText", json!({ "text": "no id" })),
        ("updateText", json!({ "id": "1", "text": "string id" })),
        ("toggleCompletion", json!({ "id": 1 })),
        ("toggleCompletion", json!({ "id": 1, "completed": "yes" })),
        ("delete", json!({})),
        ("delete", json!({ "id": 1.5 })),
        ("delete", json!({ "id": 3_000_000_000_i64 })),
    ];

    for (procedure, input) in cases {
        let (status, body) = mutate(&app, procedure, input.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{procedure} {input}");
        assert_eq!(body["status"], 400);
    }

    let (status, body) = mutate_raw(&app, "create", "{\"text\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn missing_id_is_not_found() {
    let app = test_app().await;

    let (status, body) = mutate(
        &app,
        "updateText",
        json!({ "id": 999, "text": "nothing here" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo with id 999 not found");

    let (status, body) = mutate(
        &app,
        "toggleCompletion",
        json!({ "id": 999, "completed": true }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Todo with id 999 not found");
}

#[tokio::test]
async fn delete_is_idempotent_and_targets_one_record() {
    let app = test_app().await;
    let (_, a) = mutate(&app, "create", json!({ "text": "A" })).await;
    let (_, b) = mutate(&app, "create", json!({ "text": "B" })).await;

    let (status, body) = mutate(&app, "delete", json!({ "id": 999 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "success": true }));

    let (_, body) = mutate(&app, "delete", json!({ "id": a["data"]["id"] })).await;
    assert_eq!(body["data"]["success"], true);
    let (_, body) = mutate(&app, "delete", json!({ "id": a["data"]["id"] })).await;
    assert_eq!(body["data"]["success"], true);

    let (_, body) = query(&app, "list").await;
    assert_eq!(body["data"], json!([b["data"]]));
}

#[tokio::test]
async fn store_failure_is_a_generic_500() {
    let db = MockDatabase::new(DatabaseBackend::Sqlite)
        .append_query_errors([DbErr::Custom("disk I/O error".to_string())])
        .into_connection();
    let app = app(state_with_db(db));

    let (status, body) = query(&app, "list").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "Failed to list todos");
    assert!(!body.to_string().contains("disk I/O"));
}

#[tokio::test]
async fn unknown_routes_and_methods_use_the_envelope() {
    let app = test_app().await;

    let (status, body) = query(&app, "archive").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Unknown procedure");
    assert_eq!(body["data"], Value::Null);

    let (status, body) = query(&app, "create").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["status"], 405);
    assert_eq!(
        body["message"],
        "Queries are served over GET, mutations over POST"
    );
}
