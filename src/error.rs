//! Error types for the session controller.

use std::time::Duration;

use thiserror::Error;

use crate::session::Phase;

/// Errors from the datagram transport.
///
/// Socket-level failures are fatal: they propagate out of whichever session
/// operation triggered them and are never swallowed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Underlying socket operation failed.
    #[error("socket i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Protocol-level handshake failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The player-params blob carried no parsable `(player_types N)` count.
    #[error("player params carry no parsable player_types count")]
    MalformedParams,

    /// The server answered the init command with an `(error ...)` reply.
    #[error("server rejected init: {0}")]
    InitRejected(String),
}

/// Top-level session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Transport error.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Protocol error.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Operation invoked outside its required lifecycle phase.
    #[error("{op} is invalid in phase {phase:?}")]
    InvalidState {
        /// Operation that was attempted.
        op: &'static str,
        /// Phase the session was in.
        phase: Phase,
    },

    /// Bounded cycle wait expired before a matching message arrived.
    #[error("timed out after {timeout:?} waiting for ({marker} ...)")]
    TimedOut {
        /// Cycle marker that was awaited.
        marker: &'static str,
        /// The deadline that passed.
        timeout: Duration,
    },
}
