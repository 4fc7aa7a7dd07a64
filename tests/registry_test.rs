//! Unit-level tests for the connection registry: atomic replacement and
//! identity-gated removal.

use std::net::SocketAddr;
use std::sync::Arc;

use unisock::connection::{same_connection, Connection, ConnectionHandle, TransportError};
use unisock::registry::ConnectionRegistry;

/// Minimal connection stub; the registry only cares about handle identity.
struct StubConnection;

impl Connection for StubConnection {
    fn is_open(&self) -> bool {
        true
    }
    fn send_text(&self, _text: &str) -> Result<(), TransportError> {
        Ok(())
    }
    fn close(&self) -> Result<(), TransportError> {
        Ok(())
    }
    fn remote_address(&self) -> Option<SocketAddr> {
        None
    }
}

fn stub() -> ConnectionHandle {
    Arc::new(StubConnection)
}

#[test]
fn test_put_returns_previous_handle() {
    let registry = ConnectionRegistry::new();
    let first = stub();
    let second = stub();

    assert!(registry.put_and_get_previous("u1", first.clone()).is_none());

    let previous = registry
        .put_and_get_previous("u1", second.clone())
        .expect("second put should return the displaced handle");
    assert!(same_connection(&previous, &first));

    // At most one entry per key, ever
    assert_eq!(registry.len(), 1);
    let stored = registry.get("u1").expect("u1 should be present");
    assert!(same_connection(&stored, &second));
}

#[test]
fn test_remove_if_same_requires_identity() {
    let registry = ConnectionRegistry::new();
    let owner = stub();
    let stranger = stub();

    registry.put_and_get_previous("u1", owner.clone());

    // A handle that never owned the slot cannot remove it
    assert!(!registry.remove_if_same("u1", &stranger));
    assert!(registry.contains("u1"));

    // The owning handle can
    assert!(registry.remove_if_same("u1", &owner));
    assert!(registry.is_empty());

    // Removal of an absent key is a no-op
    assert!(!registry.remove_if_same("u1", &owner));
}

#[test]
fn test_keys_are_independent() {
    let registry = ConnectionRegistry::new();
    let a = stub();
    let b = stub();

    registry.put_and_get_previous("alice", a.clone());
    registry.put_and_get_previous("bob", b.clone());
    assert_eq!(registry.len(), 2);

    assert!(registry.remove_if_same("alice", &a));
    assert!(registry.contains("bob"));
    assert_eq!(registry.len(), 1);
}
