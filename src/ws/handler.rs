use axum::{
    extract::{
        ws::{WebSocket, WebSocketUpgrade},
        ConnectInfo, Path, State,
    },
    response::Response,
};
use std::net::SocketAddr;

use crate::state::AppState;
use crate::ws::actor;

/// GET /ws/{user}
/// WebSocket upgrade endpoint. The path segment is the user key; the
/// registry keeps one live connection per key, so a second upgrade for the
/// same key displaces the first.
pub async fn ws_upgrade(
    State(state): State<AppState>,
    Path(user): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> Response {
    tracing::info!(user = %user, addr = %addr, "WebSocket upgrade");
    ws.on_upgrade(move |socket| handle_connected(socket, state, user, addr))
}

/// Handle an upgraded WebSocket connection by spawning the actor.
async fn handle_connected(socket: WebSocket, state: AppState, user: String, addr: SocketAddr) {
    actor::run_connection(socket, state, user, Some(addr)).await;
}
