//! Bounded registry of active exploration sessions.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ExploreError, Result};

/// Default number of explorations allowed to run at once.
pub const DEFAULT_SESSION_CAPACITY: usize = 5;

/// Metadata about one registered session.
#[derive(Debug, Clone)]
pub struct SessionInfo {
    /// The root directory the session is exploring.
    pub root: PathBuf,
    /// When the session acquired its slot.
    pub started: Instant,
}

/// Tracks active explorations and bounds how many run at once.
///
/// Registration waits for a slot when the registry is full, giving
/// natural backpressure instead of unbounded filesystem fan-out. The
/// returned [`SessionGuard`] frees the slot on drop, so a panicking or
/// early-returning traversal never leaks one. Share a registry between
/// explorers via `Arc` to bound them jointly.
#[derive(Debug)]
pub struct SessionRegistry {
    capacity: usize,
    permits: Arc<Semaphore>,
    active: Mutex<HashMap<Uuid, SessionInfo>>,
}

impl SessionRegistry {
    /// Create a registry admitting at most `capacity` sessions at once.
    ///
    /// A capacity of zero admits nothing; callers validate upstream.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            permits: Arc::new(Semaphore::new(capacity)),
            active: Mutex::new(HashMap::new()),
        }
    }

    /// A registry with the default capacity.
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_SESSION_CAPACITY)
    }

    /// Register a session, waiting until a slot is free.
    ///
    /// # Errors
    ///
    /// Returns an error if the registry's semaphore has been closed,
    /// which does not happen in normal operation.
    pub async fn register(
        self: &Arc<Self>,
        id: Uuid,
        root: impl Into<PathBuf>,
    ) -> Result<SessionGuard> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| ExploreError::session("session registry is closed"))?;

        let info = SessionInfo {
            root: root.into(),
            started: Instant::now(),
        };
        self.lock_active().insert(id, info);
        debug!(
            "Session {} registered ({}/{} active)",
            id,
            self.active_count(),
            self.capacity
        );

        Ok(SessionGuard {
            registry: Arc::clone(self),
            id,
            _permit: permit,
        })
    }

    /// The maximum number of concurrent sessions.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many sessions currently hold a slot.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.lock_active().len()
    }

    /// A snapshot of the currently registered sessions.
    #[must_use]
    pub fn active_sessions(&self) -> Vec<(Uuid, SessionInfo)> {
        self.lock_active()
            .iter()
            .map(|(id, info)| (*id, info.clone()))
            .collect()
    }

    fn lock_active(&self) -> MutexGuard<'_, HashMap<Uuid, SessionInfo>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds one registry slot; dropping it unregisters the session.
#[derive(Debug)]
pub struct SessionGuard {
    registry: Arc<SessionRegistry>,
    id: Uuid,
    _permit: OwnedSemaphorePermit,
}

impl SessionGuard {
    /// The id of the session this guard belongs to.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.lock_active().remove(&self.id);
        debug!("Session {} unregistered", self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn test_capacity_bounds_registration() {
        let registry = Arc::new(SessionRegistry::new(2));

        let first = registry.register(Uuid::new_v4(), "/a").await.unwrap();
        let _second = registry.register(Uuid::new_v4(), "/b").await.unwrap();
        assert_eq!(registry.active_count(), 2);

        // The third caller has to wait for a slot.
        let blocked = timeout(
            Duration::from_millis(50),
            registry.register(Uuid::new_v4(), "/c"),
        )
        .await;
        assert!(blocked.is_err());

        drop(first);
        let third = timeout(
            Duration::from_millis(500),
            registry.register(Uuid::new_v4(), "/c"),
        )
        .await
        .expect("slot should free up")
        .unwrap();
        assert_eq!(registry.active_count(), 2);
        drop(third);
    }

    #[tokio::test]
    async fn test_guard_drop_unregisters() {
        let registry = Arc::new(SessionRegistry::with_default_capacity());
        assert_eq!(registry.capacity(), DEFAULT_SESSION_CAPACITY);

        let id = Uuid::new_v4();
        let guard = registry.register(id, "/root").await.unwrap();
        assert_eq!(registry.active_count(), 1);
        assert_eq!(guard.id(), id);

        let sessions = registry.active_sessions();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].1.root, PathBuf::from("/root"));

        drop(guard);
        assert_eq!(registry.active_count(), 0);
    }
}
