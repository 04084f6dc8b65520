//! Errors raised while turning an input line into a command

use thiserror::Error;

/// Line could not be parsed into a [`Command`](crate::command::Command)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Line had no tokens where a command was required
    #[error("empty command")]
    Empty,

    /// Line is not valid UTF-8
    #[error("invalid UTF-8")]
    InvalidUtf8,

    /// First token is not a known command name
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Command received the wrong number of arguments
    #[error("{command} expects {expected} argument(s), got {found}")]
    WrongArity {
        /// Canonical command name
        command: &'static str,
        /// Arguments required
        expected: usize,
        /// Arguments supplied
        found: usize,
    },
}
