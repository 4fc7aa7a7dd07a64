use axum::extract::ws::{CloseFrame, Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::connection::{Connection, ConnectionHandle, TransportError};
use crate::state::AppState;
use crate::ws::ConnectionSender;

/// Connection capability backed by the actor's outbound channel.
/// The lifecycle controller holds this through the registry and pushes
/// frames without touching the socket directly.
pub struct WsConnection {
    tx: ConnectionSender,
    remote: Option<SocketAddr>,
    closed: AtomicBool,
}

impl WsConnection {
    fn new(tx: ConnectionSender, remote: Option<SocketAddr>) -> Arc<Self> {
        Arc::new(Self {
            tx,
            remote,
            closed: AtomicBool::new(false),
        })
    }
}

impl Connection for WsConnection {
    fn is_open(&self) -> bool {
        !self.closed.load(Ordering::Acquire) && !self.tx.is_closed()
    }

    fn send_text(&self, text: &str) -> Result<(), TransportError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(TransportError::Closed);
        }
        self.tx
            .send(Message::Text(text.to_string().into()))
            .map_err(|_| TransportError::Closed)
    }

    fn close(&self) -> Result<(), TransportError> {
        // First close wins; later calls are no-ops.
        if self.closed.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        self.tx
            .send(Message::Close(Some(CloseFrame {
                code: 1000,
                reason: "closed by server".into(),
            })))
            .map_err(|_| TransportError::Closed)
    }

    fn remote_address(&self) -> Option<SocketAddr> {
        self.remote
    }
}

/// Run the actor-per-connection pattern for an upgraded WebSocket.
///
/// Splits the WebSocket into reader and writer halves:
/// - Writer task: owns the sink, forwards frames from an mpsc channel
/// - Reader loop: feeds lifecycle callbacks on the session controller
///
/// The mpsc channel is what lets a displacement notice from another
/// connection's callback reach this client.
pub async fn run_connection(
    socket: WebSocket,
    state: AppState,
    user: String,
    remote: Option<SocketAddr>,
) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<Message>();

    let conn: ConnectionHandle = WsConnection::new(tx.clone(), remote);

    // Spawn writer task: forwards mpsc frames to the WebSocket sink
    let writer_handle = tokio::spawn(writer_task(ws_sender, rx));

    // Register with the lifecycle controller; displaces any prior
    // connection for this user key.
    state.sessions.on_connect(&user, conn.clone());

    tracing::info!(user = %user, "WebSocket actor started");

    // Reader loop: translate incoming frames into lifecycle callbacks
    loop {
        match ws_receiver.next().await {
            Some(Ok(msg)) => match msg {
                Message::Text(text) => {
                    state.sessions.on_message(text.as_str(), &conn);
                }
                Message::Binary(_) => {
                    // Text protocol; binary frames are not part of it
                    tracing::debug!(user = %user, "ignoring binary frame");
                }
                Message::Ping(data) => {
                    let _ = tx.send(Message::Pong(data));
                }
                Message::Pong(_) => {}
                Message::Close(frame) => {
                    tracing::info!(user = %user, reason = ?frame, "client initiated close");
                    break;
                }
            },
            Some(Err(e)) => {
                // Advisory; the close below is what tears the session down
                state.sessions.on_error(&conn, &e);
                break;
            }
            None => {
                tracing::info!(user = %user, "WebSocket stream ended");
                break;
            }
        }
    }

    // Close is authoritative: deregister (a no-op if a newer connection
    // already owns the slot) before the writer goes away.
    state.sessions.on_close(&user, &conn);

    writer_handle.abort();

    tracing::info!(user = %user, "WebSocket actor stopped");
}

/// Writer task: receives frames from the mpsc channel and forwards them to
/// the WebSocket sink.
async fn writer_task(
    mut ws_sender: futures_util::stream::SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<Message>,
) {
    while let Some(msg) = rx.recv().await {
        if ws_sender.send(msg).await.is_err() {
            // WebSocket send failed — connection is broken
            break;
        }
    }
}
