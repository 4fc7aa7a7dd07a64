//! Outbound write path.
//!
//! Every send and remote-address lookup goes through one process-wide lock:
//! a transport handle is not safe for concurrent writers, and an in-flight
//! echo can race a displacement notice to the same handle. Connection volume
//! here is low, so one coarse lock over per-handle locks.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::connection::ConnectionHandle;

#[derive(Clone, Default)]
pub struct MessageGateway {
    lock: Arc<Mutex<()>>,
}

impl MessageGateway {
    pub fn new() -> Self {
        Self {
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Best-effort text send. Skips closed handles; transport faults are
    /// logged and swallowed, never surfaced to the caller.
    pub fn send(&self, handle: &ConnectionHandle, text: &str) {
        let _guard = self.lock.lock().expect("send lock poisoned");
        if !handle.is_open() {
            tracing::debug!("skipping send to closed connection");
            return;
        }
        if let Err(e) = handle.send_text(text) {
            tracing::info!(error = %e, "send failed");
        }
    }

    /// Remote address of `handle`, or None for a missing handle.
    /// Held under the same lock as `send` so address lookups never interleave
    /// with an in-progress write.
    pub fn remote_address(&self, handle: Option<&ConnectionHandle>) -> Option<SocketAddr> {
        let handle = handle?;
        let _guard = self.lock.lock().expect("send lock poisoned");
        handle.remote_address()
    }
}
