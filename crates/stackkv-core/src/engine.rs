//! Core transactional engine — the heart of StackKV.
//!
//! `Store` layers a stack of transaction frames over a committed map and
//! keeps two denormalized caches in step with every mutation:
//!
//! **Current-value cache**: what `get` returns, without walking the stack
//! **Value counts**: how many keys hold each value, for O(1) `num_equal_to`
//! **Frame index**: per key, which open frames wrote it, so rollback can
//! find the previous value in O(1) instead of scanning older frames
//!
//! Invariant after every public call: for each key, `current[key]` is the
//! value in the innermost frame that wrote it (absent if that write was an
//! unset), or the committed value if no open frame wrote it; and
//! `counts[v]` equals the number of keys with `current[key] == v`.

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::index::{FrameIndex, ValueCounts};
use crate::slot::Slot;
use crate::snapshot::Snapshot;

/// Writes recorded while one transaction was innermost.
pub type Frame = HashMap<String, Slot>;

/// In-memory key-value store with nested transactions.
///
/// Single-owner: all mutations take `&mut self`. Wrap in
/// [`SharedStore`](crate::shared::SharedStore) to share between threads.
pub struct Store {
    /// Values that survive with no transaction open
    committed: HashMap<String, String>,
    /// Open transactions, oldest first
    frames: Vec<Frame>,
    /// Key -> depths of frames holding a pending write
    frame_index: FrameIndex,
    /// Key -> effective value (absent when unset or never set)
    current: HashMap<String, String>,
    /// Value -> number of keys whose effective value it is
    counts: ValueCounts,
    /// Engine configuration
    config: Config,
}

impl Store {
    /// Create an empty store with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an empty store sized by `config`.
    ///
    /// `config` must pass [`Config::validate`]; debug builds assert it.
    pub fn with_config(config: Config) -> Self {
        debug_assert!(
            config.validate().is_ok(),
            "invalid store config: {:?}",
            config.validate()
        );
        Self {
            committed: HashMap::with_capacity(config.key_capacity),
            frames: Vec::with_capacity(config.frame_capacity),
            frame_index: FrameIndex::with_capacity(config.key_capacity),
            current: HashMap::with_capacity(config.key_capacity),
            counts: ValueCounts::with_capacity(config.value_capacity),
            config,
        }
    }

    /// Open a new (innermost) transaction.
    pub fn begin(&mut self) {
        self.frames.push(Frame::new());
        debug!(depth = self.frames.len(), "transaction opened");
    }

    /// Set `key` to `value` in the innermost transaction, or directly in
    /// the committed store if none is open.
    pub fn set(&mut self, key: &str, value: &str) {
        self.write(key, Slot::Value(value.to_string()));
    }

    /// Unset `key` in the innermost transaction, or delete it from the
    /// committed store if none is open.
    pub fn unset(&mut self, key: &str) {
        self.write(key, Slot::Unset);
    }

    /// Apply a single write. `set` and `unset` are thin wrappers over this.
    pub fn write(&mut self, key: &str, slot: Slot) {
        trace!(key, slot = %slot, depth = self.frames.len(), "write");
        let effective = slot.as_value().map(str::to_owned);

        let depth = self.frames.len();
        match self.frames.last_mut() {
            Some(frame) => {
                frame.insert(key.to_string(), slot);
                self.frame_index.record(key, depth - 1);
            }
            None => match slot {
                Slot::Value(value) => {
                    self.committed.insert(key.to_string(), value);
                }
                Slot::Unset => {
                    self.committed.remove(key);
                }
            },
        }

        self.update_current(key, effective);
    }

    /// Current effective value of `key`, if any.
    ///
    /// Served from the current-value cache; never walks the stack.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.current.get(key).map(String::as_str)
    }

    /// Number of keys whose current value is exactly `value`.
    pub fn num_equal_to(&self, value: &str) -> usize {
        self.counts.count(value)
    }

    /// Commit every open transaction at once.
    ///
    /// The current-value cache already holds the newest write for every
    /// pending key, so it is copied into the committed store and the stack
    /// is dropped. The cache and counts are unchanged.
    pub fn commit(&mut self) -> StoreResult<()> {
        if self.frames.is_empty() {
            debug!("commit with no open transaction");
            return Err(StoreError::NoTransaction);
        }

        let depth = self.frames.len();
        let pending = self.frame_index.len();
        for key in self.frame_index.keys() {
            match self.current.get(key) {
                Some(value) => {
                    self.committed.insert(key.to_string(), value.clone());
                }
                None => {
                    self.committed.remove(key);
                }
            }
        }

        self.frames.clear();
        self.frame_index.clear();
        debug!(depth, pending, "transactions committed");
        Ok(())
    }

    /// Discard the innermost transaction, reverting every key it wrote to
    /// its value one level down.
    pub fn rollback(&mut self) -> StoreResult<()> {
        let frame = match self.frames.pop() {
            Some(frame) => frame,
            None => {
                debug!("rollback with no open transaction");
                return Err(StoreError::NoTransaction);
            }
        };

        let touched = frame.len();
        for (key, _) in frame {
            let reverted = match self.frame_index.pop(&key) {
                Some(depth) => self
                    .frames
                    .get(depth)
                    .and_then(|older| older.get(&key))
                    .and_then(Slot::as_value)
                    .map(str::to_owned),
                None => self.committed.get(&key).cloned(),
            };
            self.update_current(&key, reverted);
        }

        debug!(depth = self.frames.len(), touched, "transaction rolled back");
        Ok(())
    }

    /// Drop all state: committed data, open transactions and indices.
    pub fn clear(&mut self) {
        self.committed.clear();
        self.frames.clear();
        self.frame_index.clear();
        self.current.clear();
        self.counts.clear();
        debug!("store cleared");
    }

    /// Owned, ordered copy of every internal structure.
    pub fn inspect(&self) -> Snapshot {
        Snapshot {
            committed: self
                .committed
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            frames: self
                .frames
                .iter()
                .map(|frame| frame.iter().map(|(k, s)| (k.clone(), s.clone())).collect())
                .collect(),
            frame_index: self
                .frame_index
                .iter()
                .map(|(k, depths)| (k.to_string(), depths.to_vec()))
                .collect(),
            current: self
                .current
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            value_counts: self
                .counts
                .iter()
                .map(|(v, c)| (v.to_string(), c))
                .collect(),
        }
    }

    /// Number of open transactions.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if at least one transaction is open.
    pub fn in_transaction(&self) -> bool {
        !self.frames.is_empty()
    }

    /// Number of keys with a defined current value.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns true if no key has a defined current value.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Number of keys in the committed store.
    pub fn committed_len(&self) -> usize {
        self.committed.len()
    }

    /// Committed value of `key`, ignoring open transactions.
    pub fn committed_value(&self, key: &str) -> Option<&str> {
        self.committed.get(key).map(String::as_str)
    }

    /// Keys with a write pending in some open transaction.
    pub fn pending_keys(&self) -> usize {
        self.frame_index.len()
    }

    /// Engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Move `key`'s cached value to `new`, adjusting the value counts.
    fn update_current(&mut self, key: &str, new: Option<String>) {
        let old = match new {
            Some(value) => {
                if self.current.get(key) == Some(&value) {
                    return;
                }
                self.counts.increment(&value);
                self.current.insert(key.to_string(), value)
            }
            None => self.current.remove(key),
        };
        if let Some(old) = old {
            self.counts.decrement(&old);
        }
    }
}

impl Default for Store {
    fn default() -> Self { Self::new() }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("depth", &self.frames.len())
            .field("keys", &self.current.len())
            .field("committed", &self.committed.len())
            .field("pending", &self.frame_index.len())
            .finish()
    }
}
