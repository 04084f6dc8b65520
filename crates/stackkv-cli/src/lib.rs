//! StackKV line protocol
//!
//! Parses `SET`/`GET`/`UNSET`/`NUMEQUALTO`/`BEGIN`/`ROLLBACK`/`COMMIT`/`END`
//! lines, dispatches them to a [`stackkv_core::Store`] and renders replies
//! (`NULL` for a missing value, `NO TRANSACTION` for a COMMIT or ROLLBACK
//! with nothing open).

pub mod command;
pub mod config;
pub mod error;
pub mod repl;
pub mod session;

pub use command::Command;
pub use config::ProtocolConfig;
pub use error::ParseError;
pub use repl::{run, RunSummary};
pub use session::{Reply, Session};
