//! Connection registry: tracks the single active connection per user key.
//!
//! Unlike a fan-out registry that keeps a list of sessions per user, this
//! map holds exactly one handle per key. Inserting for an already-connected
//! key returns the previous handle so the caller can evict it.

use std::sync::Arc;

use dashmap::DashMap;

use crate::connection::{same_connection, ConnectionHandle};

/// Concurrent user-key -> connection map. Cheap to clone; clones share the
/// underlying map.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    inner: Arc<DashMap<String, ConnectionHandle>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
        }
    }

    /// Atomically store `handle` under `key` and return the handle it
    /// displaced, if any. This is the single point of truth for "was this
    /// user already connected": concurrent calls for the same key serialize
    /// on the map shard, so exactly one caller observes the other's handle.
    pub fn put_and_get_previous(
        &self,
        key: &str,
        handle: ConnectionHandle,
    ) -> Option<ConnectionHandle> {
        self.inner.insert(key.to_string(), handle)
    }

    /// Remove the entry for `key` only if it still holds `handle`.
    /// A close callback racing a reconnect finds the slot owned by the newer
    /// connection and leaves it alone; returns whether removal occurred.
    pub fn remove_if_same(&self, key: &str, handle: &ConnectionHandle) -> bool {
        self.inner
            .remove_if(key, |_, stored| same_connection(stored, handle))
            .is_some()
    }

    /// Current handle for `key`, if the user is connected.
    pub fn get(&self, key: &str) -> Option<ConnectionHandle> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
