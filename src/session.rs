//! Session controller: handshake, cycle synchronization, mode control.
//!
//! A [`Session`] owns one [`RcssSocket`] and drives the role-specific
//! protocol state machine over it:
//!
//! - [`connect`](Session::connect) performs the fixed handshake sequence
//!   (init, server params, player params, N player types, sync command),
//! - [`cycle`](Session::cycle) blocks until the server's next tick message,
//! - [`change_mode`](Session::change_mode) / [`recover`](Session::recover)
//!   issue administrative commands,
//! - [`disconnect`](Session::disconnect) sends `(bye)` and closes the socket.
//!
//! The server replies from a changing ephemeral port. The session tracks
//! the source port of every received datagram and targets it with the next
//! send (the "sticky reply port"); only the very first init datagram goes
//! to the well-known port.
//!
//! All operations are sequential on the caller's task: there is no
//! background task, no pipelining, and no reply reordering. `cycle` has no
//! deadline by design; use [`cycle_within`](Session::cycle_within) when an
//! unresponsive server must not block forever.

use std::time::Duration;

use tracing::{debug, trace};

use crate::error::{ProtocolError, SessionError};
use crate::message;
use crate::role::{Framing, Role};
use crate::transport::RcssSocket;

/// Session lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Socket bound, no traffic yet.
    Disconnected,
    /// Handshake in progress.
    Handshaking,
    /// Handshake complete; cycle and command operations available.
    Ready,
    /// `(bye)` sent and socket dropped; the session is unusable.
    Closed,
}

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Role this session plays.
    pub role: Role,
    /// Server hostname or IP.
    pub host: String,
    /// Initial connect port. The effective send target switches to the
    /// server's reply source port after the first received datagram.
    pub port: u16,
    /// Team name; used by the participant init command only.
    pub team: String,
    /// Outgoing datagram framing.
    pub framing: Framing,
}

impl SessionConfig {
    /// Configuration for `role` against `localhost`, with the role's
    /// well-known port and default framing.
    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            host: "localhost".to_string(),
            port: role.well_known_port(),
            team: "phoenix".to_string(),
            framing: role.default_framing(),
        }
    }
}

/// Builder for [`SessionConfig`].
#[derive(Debug)]
pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    /// Start from the defaults for `role`.
    pub fn new(role: Role) -> Self {
        Self {
            config: SessionConfig::for_role(role),
        }
    }

    /// Set the server hostname or IP.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Override the initial connect port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the team name (participant init only).
    pub fn team(mut self, team: impl Into<String>) -> Self {
        self.config.team = team.into();
        self
    }

    /// Override the role's default outgoing framing.
    pub fn framing(mut self, framing: Framing) -> Self {
        self.config.framing = framing;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

/// A client session against a soccer-server style simulation server.
///
/// # Example
///
/// ```no_run
/// use rcss_control::{Role, Session, SessionBuilder};
///
/// # async fn run() -> Result<(), rcss_control::SessionError> {
/// let config = SessionBuilder::new(Role::Observer).host("127.0.0.1").build();
/// let mut session = Session::open(config).await?;
/// session.connect().await?;
///
/// let mut time = session.cycle().await?;
/// session.change_mode("play_on").await?;
/// while time < 6000 {
///     time = session.cycle().await?;
/// }
/// session.disconnect().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    /// Taken and dropped exactly once at disconnect.
    socket: Option<RcssSocket>,
    phase: Phase,
    /// Sticky reply port: source port of the most recently received datagram.
    port: u16,
    server_params: Option<String>,
    player_params: Option<String>,
    player_types: Vec<String>,
}

impl Session {
    /// Bind a fresh socket for `config`. No traffic is exchanged yet.
    pub async fn open(config: SessionConfig) -> Result<Self, SessionError> {
        let socket = RcssSocket::bind().await?;
        let port = config.port;
        Ok(Self {
            config,
            socket: Some(socket),
            phase: Phase::Disconnected,
            port,
            server_params: None,
            player_params: None,
            player_types: Vec::new(),
        })
    }

    /// Perform the connection handshake.
    ///
    /// Sends the role's init command to the well-known port, then consumes
    /// the fixed reply sequence: handshake acknowledgment, server params,
    /// player params (which embeds the `(player_types N)` count), exactly
    /// `N` player-type definitions, and finally the acknowledgment of the
    /// role's sync command.
    ///
    /// Fails with [`ProtocolError::InitRejected`] when the server answers
    /// the init with an `(error ...)` reply, and with
    /// [`ProtocolError::MalformedParams`] when the player-type count cannot
    /// be parsed (in which case no type definitions are read). If the
    /// server announces more types than it sends, this blocks indefinitely;
    /// the count is the only framing signal.
    pub async fn connect(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Disconnected {
            return Err(self.invalid_state("connect"));
        }
        self.phase = Phase::Handshaking;
        self.port = self.config.port;

        let init = self.config.role.init_command(&self.config.team);
        self.send(&init).await?;

        let ack = self.recv().await?;
        if let Some(reason) = message::error_reason(&ack) {
            return Err(ProtocolError::InitRejected(reason.to_string()).into());
        }
        debug!(reply = %ack, "init acknowledged");

        let server_params = self.recv().await?;
        debug!(len = server_params.len(), "server params received");
        self.server_params = Some(server_params);

        let player_params = self.recv().await?;
        let count =
            message::player_type_count(&player_params).ok_or(ProtocolError::MalformedParams)?;
        debug!(len = player_params.len(), count, "player params received");
        self.player_params = Some(player_params);

        for _ in 0..count {
            let definition = self.recv().await?;
            self.player_types.push(definition);
        }
        debug!(count = self.player_types.len(), "player types received");

        self.send(self.config.role.sync_command()).await?;
        let ack = self.recv().await?;
        debug!(reply = %ack, "sync command acknowledged");

        self.phase = Phase::Ready;
        Ok(())
    }

    /// Block until the next cycle message and return its tick number.
    ///
    /// Waits for the role's marker (`sense_body` for participants,
    /// `see_global` for observers). Any other message arriving in between
    /// is dropped silently; that loss is deliberate, this client does not
    /// consume other sensor traffic. There is no deadline: an unresponsive
    /// server blocks the caller forever. See
    /// [`cycle_within`](Self::cycle_within) for a bounded wait.
    pub async fn cycle(&mut self) -> Result<u64, SessionError> {
        self.require_ready("cycle")?;
        let marker = self.config.role.cycle_marker();
        self.next_tick(marker).await
    }

    /// Bounded variant of [`cycle`](Self::cycle).
    ///
    /// Fails with [`SessionError::TimedOut`] when `timeout` passes without
    /// a matching message. Messages dropped before the deadline stay
    /// dropped.
    pub async fn cycle_within(&mut self, timeout: Duration) -> Result<u64, SessionError> {
        self.require_ready("cycle_within")?;
        let marker = self.config.role.cycle_marker();
        match tokio::time::timeout(timeout, self.next_tick(marker)).await {
            Ok(result) => result,
            Err(_) => Err(SessionError::TimedOut { marker, timeout }),
        }
    }

    async fn next_tick(&mut self, marker: &'static str) -> Result<u64, SessionError> {
        loop {
            let msg = self.recv().await?;
            match message::leading_int(&msg, marker) {
                Some(tick) => {
                    trace!(tick, "cycle observed");
                    return Ok(tick);
                }
                None => trace!(dropped = %msg, "non-matching message during cycle wait"),
            }
        }
    }

    /// Change the current play mode.
    ///
    /// `mode` is forwarded as a literal token with no client-side
    /// validation; rejecting an unknown mode is the server's concern. The
    /// server's reply is consumed and logged, not interpreted.
    pub async fn change_mode(&mut self, mode: &str) -> Result<(), SessionError> {
        self.require_ready("change_mode")?;
        self.send(&format!("(change_mode {mode})")).await?;
        let reply = self.recv().await?;
        debug!(reply = %reply, "change_mode acknowledged");
        Ok(())
    }

    /// Reset stamina, effort and recovery of all players on the server.
    pub async fn recover(&mut self) -> Result<(), SessionError> {
        self.require_ready("recover")?;
        self.send("(recover)").await?;
        let reply = self.recv().await?;
        debug!(reply = %reply, "recover acknowledged");
        Ok(())
    }

    /// Disconnect from the server.
    ///
    /// Sends `(bye)` best-effort (the server does not acknowledge it) and
    /// drops the socket. The session is not reusable afterwards: any
    /// further operation fails with [`SessionError::InvalidState`].
    pub async fn disconnect(&mut self) -> Result<(), SessionError> {
        self.require_ready("disconnect")?;
        self.send("(bye)").await?;
        self.socket = None;
        self.phase = Phase::Closed;
        debug!("disconnected");
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Role this session plays.
    pub fn role(&self) -> Role {
        self.config.role
    }

    /// Current send target port (sticky reply port).
    pub fn peer_port(&self) -> u16 {
        self.port
    }

    /// Server params blob from the handshake, once connected.
    pub fn server_params(&self) -> Option<&str> {
        self.server_params.as_deref()
    }

    /// Player params blob from the handshake, once connected.
    pub fn player_params(&self) -> Option<&str> {
        self.player_params.as_deref()
    }

    /// Player-type definitions from the handshake, in arrival order.
    ///
    /// Once `connect` has succeeded, the length equals the count embedded
    /// in the player params.
    pub fn player_types(&self) -> &[String] {
        &self.player_types
    }

    fn invalid_state(&self, op: &'static str) -> SessionError {
        SessionError::InvalidState {
            op,
            phase: self.phase,
        }
    }

    fn require_ready(&self, op: &'static str) -> Result<(), SessionError> {
        if self.phase == Phase::Ready {
            Ok(())
        } else {
            Err(self.invalid_state(op))
        }
    }

    async fn send(&mut self, message: &str) -> Result<(), SessionError> {
        let socket = self
            .socket
            .as_ref()
            .ok_or_else(|| self.invalid_state("send"))?;
        let payload = self.config.framing.frame(message);
        socket.send_to(&payload, &self.config.host, self.port).await?;
        trace!(command = %message, port = self.port, "sent");
        Ok(())
    }

    /// Receive one datagram and make its source port the new send target.
    async fn recv(&mut self) -> Result<String, SessionError> {
        let phase = self.phase;
        let socket = self
            .socket
            .as_mut()
            .ok_or(SessionError::InvalidState { op: "recv", phase })?;
        let (payload, source_port) = socket.recv().await?;
        let text = String::from_utf8_lossy(payload)
            .trim_end_matches('\0')
            .to_string();
        self.port = source_port;
        Ok(text)
    }
}
