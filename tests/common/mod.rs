use std::sync::Arc;

use anyhow::{Context, Result};
use uuid::Uuid;

use liftlog_api::auth::{generate_jwt, Claims};
use liftlog_api::routes::{app, AppState};
use liftlog_api::store::MemoryStore;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

/// Start the service in-process on an ephemeral port, backed by a fresh
/// in-memory store. Each test gets its own isolated instance.
pub async fn spawn_app() -> Result<TestApp> {
    let state = AppState {
        store: Arc::new(MemoryStore::new()),
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.expect("test server");
    });

    Ok(TestApp {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
    })
}

/// Mint a bearer token for a caller identity, the way the identity
/// provider would. Uses the development JWT secret from config.
pub fn bearer_for(user_id: Uuid, name: &str) -> String {
    let claims = Claims::new(name.to_string(), user_id);
    generate_jwt(claims).expect("token generation")
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
