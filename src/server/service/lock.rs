//! Per-member mutation locks.
//!
//! Every read-modify-write of one member's progress or session runs under that member's lock,
//! so events for the same member are applied one at a time and in arrival order. Members never
//! wait on each other.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockKey = (u64, u64);

/// Registry of per-(guild, user) async mutexes.
///
/// Cloning shares the registry.
#[derive(Clone, Default)]
pub struct UserLocks {
    locks: Arc<Mutex<HashMap<LockKey, Arc<AsyncMutex<()>>>>>,
}

impl UserLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for and acquires the lock of one member.
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn lock(&self, guild_id: u64, user_id: u64) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            locks.entry((guild_id, user_id)).or_default().clone()
        };

        mutex.lock_owned().await
    }

    /// Drops the mutexes nobody holds or waits for.
    ///
    /// # Returns
    /// - Number of entries removed
    pub fn prune(&self) -> usize {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        let before = locks.len();
        locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
        before - locks.len()
    }
}
