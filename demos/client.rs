use std::sync::Arc;

use anyhow::{Context, Result};

use todo_rpc::{
    client::{RemoteSource, TodoView},
    config::LoggingConfig,
    logging::init_tracing,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&LoggingConfig::default());

    // Defaults assume the server is running locally on :2022
    let base = std::env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:2022".to_string());
    let remote = RemoteSource::new(base.as_str());

    match remote.healthcheck().await {
        Ok(health) => println!("==> {base} is {} at {}", health.status, health.timestamp),
        Err(err) => println!("==> {base} unreachable: {err}"),
    }

    let mut view = TodoView::new(Arc::new(remote));
    view.load().await.context("loading todos failed")?;
    println!("\n{view}");

    // 1) create
    let todo = view
        .create("Try the todo procedures from Rust")
        .await
        .context("create failed")?;
    println!("\n==> created #{}\n{view}", todo.id);

    // 2) toggle
    view.toggle(todo.id).await.context("toggle failed")?;
    println!("\n==> toggled #{}\n{view}", todo.id);

    // 3) edit
    view.start_edit(todo.id)?;
    view.set_draft("Tried the todo procedures from Rust");
    view.save_edit().await.context("update failed")?;
    println!("\n==> edited #{}\n{view}", todo.id);

    // 4) delete
    view.delete(todo.id).await.context("delete failed")?;
    println!("\n==> deleted #{}\n{view}", todo.id);

    Ok(())
}
