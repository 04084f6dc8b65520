//! StackKV Core — In-Memory Key-Value Engine with Nested Transactions
//!
//! Keys and values are opaque strings. Transactions nest: `begin` opens a
//! new innermost frame, `rollback` discards only that frame, and `commit`
//! folds every open frame into the committed store at once.
//!
//! # Architecture
//!
//! - **Frames**: one map of pending writes per open transaction
//! - **Current-value cache**: `get` is a single hash lookup at any depth
//! - **Value counts**: `num_equal_to` is a single hash lookup
//! - **Frame index**: rollback reverts each touched key in O(1)
//!
//! The engine is single-threaded; [`SharedStore`] wraps it in one
//! exclusive lock for multi-client use. The line protocol lives in the
//! separate `stackkv-cli` crate.

pub mod config;
pub mod engine;
pub mod error;
pub mod index;
pub mod shared;
pub mod slot;
pub mod snapshot;

// Re-export key types for convenience
pub use config::Config;
pub use engine::{Frame, Store};
pub use error::{StoreError, StoreResult};
pub use index::{FrameIndex, ValueCounts};
pub use shared::SharedStore;
pub use slot::Slot;
pub use snapshot::Snapshot;
