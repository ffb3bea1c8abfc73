use std::sync::Arc;

use liftlog_api::config::{self, AppConfig, StoreDriver};
use liftlog_api::routes::{app, AppState};
use liftlog_api::store::{MemoryStore, PgStore, Store};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting Liftlog API in {:?} mode", config.environment);

    let store = build_store(config).await;
    let app = app(AppState { store });

    // Allow tests or deployments to override port via env
    let port = std::env::var("LIFTLOG_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Liftlog API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

async fn build_store(config: &AppConfig) -> Arc<dyn Store> {
    match config.store.driver {
        StoreDriver::Postgres => {
            let url = config
                .store
                .database_url
                .as_deref()
                .unwrap_or_else(|| panic!("DATABASE_URL is required for the postgres store"));
            let store = PgStore::connect(url, config.store.max_connections)
                .await
                .unwrap_or_else(|e| panic!("failed to connect to store: {}", e));
            Arc::new(store)
        }
        StoreDriver::Memory => {
            tracing::warn!("using in-memory store; data will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    }
}
