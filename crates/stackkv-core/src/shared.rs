//! Thread-safe handle over a [`Store`]
//!
//! Frames, caches and counts are mutated as a unit, so a half-applied
//! commit or rollback must never be observable. Every operation here takes
//! one exclusive lock for its whole duration; there is no finer-grained
//! locking and no reader/writer split.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::engine::Store;
use crate::error::StoreResult;
use crate::snapshot::Snapshot;

/// Cloneable, lock-guarded handle to a single shared [`Store`].
///
/// All clones see the same store and the same transaction stack.
#[derive(Clone, Default)]
pub struct SharedStore {
    inner: Arc<Mutex<Store>>,
}

impl SharedStore {
    /// Create a shared handle over an empty store.
    pub fn new() -> Self {
        Self::from_store(Store::new())
    }

    /// Create a shared handle over an empty store sized by `config`.
    pub fn with_config(config: Config) -> Self {
        Self::from_store(Store::with_config(config))
    }

    /// Wrap an existing store.
    pub fn from_store(store: Store) -> Self {
        Self { inner: Arc::new(Mutex::new(store)) }
    }

    /// Run `f` with exclusive access, so several operations apply atomically.
    pub fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn begin(&self) {
        self.inner.lock().begin();
    }

    pub fn set(&self, key: &str, value: &str) {
        self.inner.lock().set(key, value);
    }

    pub fn unset(&self, key: &str) {
        self.inner.lock().unset(key);
    }

    /// Current value of `key`. Returns an owned copy since the lock is
    /// released before returning.
    pub fn get(&self, key: &str) -> Option<String> {
        self.inner.lock().get(key).map(str::to_owned)
    }

    pub fn num_equal_to(&self, value: &str) -> usize {
        self.inner.lock().num_equal_to(value)
    }

    pub fn commit(&self) -> StoreResult<()> {
        self.inner.lock().commit()
    }

    pub fn rollback(&self) -> StoreResult<()> {
        self.inner.lock().rollback()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn inspect(&self) -> Snapshot {
        self.inner.lock().inspect()
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.inner.lock().depth()
    }
}

impl std::fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedStore").field(&*self.inner.lock()).finish()
    }
}
