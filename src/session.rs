//! Session lifecycle: open, message echo, close, error.
//!
//! The transport layer invokes these callbacks from its own tasks; callbacks
//! for different user keys run fully in parallel. All state lives on the
//! controller instance (no statics), so tests can run independent instances.

use std::sync::atomic::{AtomicI64, Ordering};

use crate::connection::ConnectionHandle;
use crate::gateway::MessageGateway;
use crate::registry::ConnectionRegistry;

/// Notice sent to a fresh connection for a key with no prior session.
pub const CONNECTED_NOTICE: &str = "connected";
/// Notice sent to a fresh connection that displaced a prior session.
pub const RECONNECTED_NOTICE: &str = "reconnected";
/// Notice sent to the displaced connection before it is closed.
pub const DISPLACED_NOTICE: &str = "displaced by a new connection";
/// Notice sent to a connection on clean close.
pub const DISCONNECTED_NOTICE: &str = "disconnected";

pub struct SessionController {
    registry: ConnectionRegistry,
    gateway: MessageGateway,
    online: AtomicI64,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            gateway: MessageGateway::new(),
            online: AtomicI64::new(0),
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn gateway(&self) -> &MessageGateway {
        &self.gateway
    }

    /// Current online count. Read without synchronization for display, so a
    /// reader racing a connect/close may observe a transiently stale value.
    pub fn online_count(&self) -> i64 {
        self.online.load(Ordering::Relaxed)
    }

    /// Connect transition. Registers `conn` under `user` and, when a prior
    /// connection held the slot, notifies and closes it. The displaced
    /// connection's own close callback becomes a registry no-op because the
    /// slot already holds the new handle.
    pub fn on_connect(&self, user: &str, conn: ConnectionHandle) {
        // Counted once per accepted connect, displacement or not.
        self.online.fetch_add(1, Ordering::SeqCst);

        let previous = self.registry.put_and_get_previous(user, conn.clone());
        match previous {
            None => {
                self.gateway.send(&conn, CONNECTED_NOTICE);
                tracing::info!(
                    user = %user,
                    addr = ?self.gateway.remote_address(Some(&conn)),
                    "connection opened"
                );
            }
            Some(displaced) => {
                self.gateway.send(&conn, RECONNECTED_NOTICE);
                self.gateway.send(&displaced, DISPLACED_NOTICE);
                if let Err(e) = displaced.close() {
                    tracing::warn!(user = %user, error = %e, "failed to close displaced connection");
                }
                tracing::info!(user = %user, "connection replaced, prior session displaced");
            }
        }
    }

    /// Message transition: echo the text back to the sender, tagged with the
    /// online count at time of send. Content is opaque.
    pub fn on_message(&self, text: &str, conn: &ConnectionHandle) {
        let reply = format!("server received: {}; online: {}", text, self.online_count());
        self.gateway.send(conn, &reply);
    }

    /// Close transition. Removes the registry entry only when `conn` still
    /// owns it; a stale close arriving after displacement leaves the newer
    /// entry (and the count) untouched.
    pub fn on_close(&self, user: &str, conn: &ConnectionHandle) {
        let removed = self.registry.remove_if_same(user, conn);
        // Best-effort farewell; the handle is usually already closing.
        self.gateway.send(conn, DISCONNECTED_NOTICE);
        if removed {
            self.online.fetch_sub(1, Ordering::SeqCst);
            tracing::info!(user = %user, "connection closed");
        } else {
            tracing::debug!(user = %user, "stale close, slot owned by a newer connection");
        }
    }

    /// Error transition: advisory only. The transport still delivers a close
    /// event afterwards, and that close is what tears the session down.
    pub fn on_error(&self, conn: &ConnectionHandle, cause: &dyn std::error::Error) {
        tracing::warn!(
            addr = ?self.gateway.remote_address(Some(conn)),
            error = %cause,
            "transport-reported error"
        );
    }
}
