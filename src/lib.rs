//! # rcss-control
//!
//! Session controller for RoboCup-style UDP soccer simulation servers.
//!
//! The server speaks a textual, S-expression-framed protocol over UDP and
//! replies from a changing ephemeral port. This crate implements the client
//! side of the connection lifecycle for two roles:
//!
//! - **Participant** (role "p"): joins a team, synchronizes on `sense_body`
//!   ticks.
//! - **Observer** (role "t", the trainer): global vision, synchronizes on
//!   `see_global` ticks, issues administrative commands such as play-mode
//!   changes and recovery.
//!
//! In scope are the handshake, sticky reply-port tracking, cycle
//! synchronization, mode change, recovery and disconnect. Movement commands
//! and full sensory parsing are not part of this crate; a driving loop built
//! on top supplies those.
//!
//! ## Modules
//!
//! - [`session`]: the [`Session`] state machine (connect, cycle, commands)
//! - [`transport`]: unconnected UDP socket wrapper with source-port reporting
//! - [`role`]: participant/observer capability table and datagram framing
//! - [`message`]: field extraction over parenthesized protocol text
//! - [`error`]: error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use rcss_control::{Role, Session, SessionBuilder};
//!
//! # async fn run() -> Result<(), rcss_control::SessionError> {
//! let config = SessionBuilder::new(Role::Observer).host("127.0.0.1").build();
//! let mut session = Session::open(config).await?;
//! session.connect().await?;
//!
//! let mut time = session.cycle().await?;
//! session.change_mode("play_on").await?;
//! while time < 6000 {
//!     time = session.cycle().await?;
//! }
//! session.disconnect().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod message;
pub mod role;
pub mod session;
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ProtocolError, SessionError, TransportError};
    pub use crate::role::{Framing, Role, PROTOCOL_VERSION};
    pub use crate::session::{Phase, Session, SessionBuilder, SessionConfig};
    pub use crate::transport::{RcssSocket, RECV_BUFFER_SIZE};
}

// Re-export commonly used items at crate root
pub use error::{ProtocolError, SessionError, TransportError};
pub use role::{Framing, Role};
pub use session::{Phase, Session, SessionBuilder, SessionConfig};
pub use transport::RcssSocket;
