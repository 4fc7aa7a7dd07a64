//! Outbound connection capability consumed by the core.
//!
//! The transport layer (ws module in this binary, scripted doubles in tests)
//! provides the implementation; the registry and lifecycle controller only
//! ever see this trait.

use std::net::SocketAddr;
use std::sync::Arc;

use thiserror::Error;

/// Fault raised by transport-level send/close operations.
/// Callers on the push path treat these as best-effort failures: logged,
/// never propagated to the lifecycle transition in progress.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection is closed")]
    Closed,
    #[error("websocket fault: {0}")]
    Fault(String),
}

/// One live transport connection.
pub trait Connection: Send + Sync {
    /// Whether the connection can still accept outbound frames.
    fn is_open(&self) -> bool;

    /// Push one text message to the peer.
    fn send_text(&self, text: &str) -> Result<(), TransportError>;

    /// Initiate connection shutdown. Idempotent.
    fn close(&self) -> Result<(), TransportError>;

    /// Remote peer address, if the transport knows it.
    fn remote_address(&self) -> Option<SocketAddr>;
}

/// Shared handle to a live connection. A handle is owned by whichever
/// registry slot currently references it; once displaced it is closed and
/// dropped.
pub type ConnectionHandle = Arc<dyn Connection>;

/// Identity comparison for handles. Two handles are the same connection
/// only if they point at the same allocation; a reconnect under the same
/// user key produces a distinct handle.
pub fn same_connection(a: &ConnectionHandle, b: &ConnectionHandle) -> bool {
    Arc::ptr_eq(a, b)
}
