//! Error types for StackKV operations
//!
//! The engine has a single caller-visible failure: closing a transaction
//! when none is open. `IndexMismatch` is only produced by
//! [`Snapshot::verify`](crate::snapshot::Snapshot::verify) when a derived
//! index disagrees with the frames it is derived from.

use thiserror::Error;

/// StackKV error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// COMMIT or ROLLBACK issued with an empty transaction stack.
    /// No state was changed.
    #[error("no open transaction")]
    NoTransaction,

    /// A derived index does not match the committed store + frames
    #[error("{index} index mismatch: {detail}")]
    IndexMismatch {
        /// Which index failed verification
        index: &'static str,
        /// The first offending key or value
        detail: String,
    },
}

/// Result type alias for StackKV operations
pub type StoreResult<T> = Result<T, StoreError>;
