//! Command dispatcher
//!
//! Maps each [`Command`] onto the engine and turns the outcome into a
//! [`Reply`]. Display tokens (`NULL`, `NO TRANSACTION`) are applied only in
//! [`Session::render`]; the engine never sees them.

use stackkv_core::{Store, StoreError, StoreResult};
use tracing::warn;

use crate::command::Command;
use crate::config::ProtocolConfig;

/// Outcome of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Command succeeded with nothing to print
    Silent,
    /// GET result
    Value(Option<String>),
    /// NUMEQUALTO result
    Count(usize),
    /// COMMIT/ROLLBACK with no open transaction
    NoTransaction,
    /// Engine reported an error other than a missing transaction
    Failed(String),
    /// END: stop reading input
    End,
}

/// A protocol session: one store plus presentation settings.
#[derive(Debug)]
pub struct Session {
    store: Store,
    config: ProtocolConfig,
}

impl Session {
    pub fn new(store: Store, config: ProtocolConfig) -> Self {
        Self { store, config }
    }

    /// Execute one command against the store.
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Set { key, value } => {
                self.store.set(&key, &value);
                Reply::Silent
            }
            Command::Get { key } => Reply::Value(self.store.get(&key).map(str::to_owned)),
            Command::Unset { key } => {
                self.store.unset(&key);
                Reply::Silent
            }
            Command::NumEqualTo { value } => Reply::Count(self.store.num_equal_to(&value)),
            Command::Begin => {
                self.store.begin();
                Reply::Silent
            }
            Command::Rollback => transaction_reply(self.store.rollback()),
            Command::Commit => transaction_reply(self.store.commit()),
            Command::End => Reply::End,
        }
    }

    /// Text to print for `reply`, if any.
    pub fn render(&self, reply: &Reply) -> Option<String> {
        match reply {
            Reply::Silent | Reply::End => None,
            Reply::Value(Some(value)) => Some(value.clone()),
            Reply::Value(None) => Some(self.config.null_token.clone()),
            Reply::Count(count) => Some(count.to_string()),
            Reply::NoTransaction => Some(self.config.no_transaction_token.clone()),
            Reply::Failed(reason) => Some(format!("ERROR: {}", reason)),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Store::new(), ProtocolConfig::default())
    }
}

fn transaction_reply(result: StoreResult<()>) -> Reply {
    match result {
        Ok(()) => Reply::Silent,
        Err(StoreError::NoTransaction) => Reply::NoTransaction,
        Err(e @ StoreError::IndexMismatch { .. }) => {
            warn!(error = %e, "transaction failed");
            Reply::Failed(e.to_string())
        }
    }
}
