use axum::{Json, Router};

use crate::state::AppState;
use crate::ws::handler as ws_handler;

/// GET /api/online — current online-connection count.
/// The counter is read without synchronization, so the value may trail an
/// in-flight connect or close by a moment.
async fn online_count(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "online": state.sessions.online_count(),
    }))
}

/// Build the full axum Router.
pub fn build_router(state: AppState) -> Router {
    // WebSocket endpoint: the path segment is the user key
    let ws_routes = Router::new().route(
        "/ws/{user}",
        axum::routing::get(ws_handler::ws_upgrade),
    );

    // Health check
    let health = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .route("/api/online", axum::routing::get(online_count))
        .merge(ws_routes)
        .merge(health)
        .with_state(state)
}

/// Basic health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
