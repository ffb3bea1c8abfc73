use std::sync::Arc;

use axum::{middleware, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{exercise, exercise_type, session};
use crate::middleware::jwt_auth_middleware;
use crate::store::Store;

/// Shared handler state: the resource store behind its trait object.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Authenticated resources
        .merge(exercise_routes())
        .merge(session_routes())
        .merge(exercise_type_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/exercise-user", get(exercise::list).post(exercise::create))
        .route(
            "/exercise-user/:id",
            get(exercise::get)
                .put(exercise::update)
                .delete(exercise::delete),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/session", get(session::list).post(session::create))
        .route(
            "/session/:id",
            get(session::get).put(session::update).delete(session::delete),
        )
        .route("/session/:id/exercise-user/:record_id", post(session::attach))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn exercise_type_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/exercise-type",
            get(exercise_type::list).post(exercise_type::create),
        )
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Liftlog API",
            "version": version,
            "message": "All good in here",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "exercise_user": "/exercise-user[/:id] (authenticated)",
                "session": "/session[/:id] (authenticated)",
                "exercise_type": "/exercise-type (authenticated)",
            }
        }
    }))
}

async fn health(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
