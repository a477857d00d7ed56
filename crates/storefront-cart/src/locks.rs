//! # Per-User Cart Locks
//!
//! Serializes mutating cart operations of the same user inside this process.
//!
//! ## How It Works
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DashMap<owner_id, Arc<tokio::Mutex<()>>>                               │
//! │                                                                         │
//! │  add_item(alice) ──► acquire("alice") ──► holds    ─┐                  │
//! │  add_item(alice) ──► acquire("alice") ──► waits ... │ same mutex       │
//! │  add_item(bob)   ──► acquire("bob")   ──► holds     │ different mutex  │
//! │                                                     │                  │
//! │  guard dropped ──► entry removed once nobody else holds or waits       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only requests of the same user wait on each other. Writers in other
//! processes are caught by the store's version check instead.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct CartLocks {
    inner: DashMap<String, Arc<Mutex<()>>>,
}

impl CartLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `owner_id`'s cart.
    pub async fn acquire(&self, owner_id: &str) -> CartGuard<'_> {
        let mutex = self
            .inner
            .entry(owner_id.to_string())
            .or_default()
            .value()
            .clone();
        let guard = mutex.lock_owned().await;

        CartGuard {
            locks: self,
            owner_id: owner_id.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of owners with a live lock entry.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Exclusive access to one owner's cart. Released on drop.
#[derive(Debug)]
pub struct CartGuard<'a> {
    locks: &'a CartLocks,
    owner_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for CartGuard<'_> {
    fn drop(&mut self) {
        // The owned guard holds its own Arc; release it before counting.
        self.guard.take();
        self.locks
            .inner
            .remove_if(&self.owner_id, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}
