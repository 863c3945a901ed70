//! Error types shared by the command builder and the transport.

use std::io;
use thiserror::Error;

/// A local command that could not be turned into a protocol line.
///
/// Both variants are recovered locally: the message is shown to the user and
/// nothing is written to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Missing or malformed arguments. Carries the command's usage string.
    #[error("Usage: {0}")]
    Usage(String),
    /// Well-formed, but not valid in the current context.
    #[error("{0}")]
    NotAllowed(String),
}

/// A failure of the server connection. Always fatal.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}
