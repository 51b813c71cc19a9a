//! Role capabilities and outgoing datagram framing.
//!
//! The participant and observer variants differ only in a handful of
//! protocol details: the well-known connect port, the init and
//! post-handshake sync commands, the marker of the periodic cycle message,
//! and whether outgoing datagrams carry a trailing NUL. `Role` captures
//! those as a closed dispatch table consumed by the session controller.

/// Protocol version announced in the init command.
pub const PROTOCOL_VERSION: &str = "15.0";

/// Well-known connect port for participants.
pub const PARTICIPANT_PORT: u16 = 6000;

/// Well-known connect port for observers/trainers.
pub const OBSERVER_PORT: u16 = 6001;

/// The role a session plays against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sensor-driven agent (role "p"): receives body sensors each cycle.
    Participant,
    /// Trainer with global vision (role "t"): issues administrative commands.
    Observer,
}

impl Role {
    /// The well-known port the server listens on for this role.
    pub const fn well_known_port(self) -> u16 {
        match self {
            Role::Participant => PARTICIPANT_PORT,
            Role::Observer => OBSERVER_PORT,
        }
    }

    /// The init command opening the handshake.
    ///
    /// Only the participant variant carries the team name.
    pub fn init_command(self, team: &str) -> String {
        match self {
            Role::Participant => format!("(init {team} (version {PROTOCOL_VERSION}))"),
            Role::Observer => format!("(init (version {PROTOCOL_VERSION}))"),
        }
    }

    /// The synchronization command sent once the handshake replies are in.
    pub const fn sync_command(self) -> &'static str {
        match self {
            Role::Participant => "(synch_see)",
            Role::Observer => "(eye on)",
        }
    }

    /// Head token of the periodic message that carries the cycle counter.
    pub const fn cycle_marker(self) -> &'static str {
        match self {
            Role::Participant => "sense_body",
            Role::Observer => "see_global",
        }
    }

    /// Default outgoing framing for this role.
    ///
    /// The observed client variants disagree on the trailing NUL, so the
    /// choice stays configurable per session; these are just the defaults.
    pub const fn default_framing(self) -> Framing {
        match self {
            Role::Participant => Framing::NullTerminated,
            Role::Observer => Framing::Bare,
        }
    }
}

/// Terminator applied to outgoing datagrams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Append a single NUL byte to every outgoing message.
    NullTerminated,
    /// Send the message bytes exactly as given.
    Bare,
}

impl Framing {
    /// Produce the datagram payload for `message`.
    pub fn frame(self, message: &str) -> Vec<u8> {
        match self {
            Framing::Bare => message.as_bytes().to_vec(),
            Framing::NullTerminated => {
                let mut payload = Vec::with_capacity(message.len() + 1);
                payload.extend_from_slice(message.as_bytes());
                payload.push(0);
                payload
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_known_ports() {
        assert_eq!(Role::Participant.well_known_port(), 6000);
        assert_eq!(Role::Observer.well_known_port(), 6001);
    }

    #[test]
    fn test_init_commands() {
        assert_eq!(
            Role::Participant.init_command("phoenix"),
            "(init phoenix (version 15.0))"
        );
        assert_eq!(Role::Observer.init_command("ignored"), "(init (version 15.0))");
    }

    #[test]
    fn test_sync_commands_and_markers() {
        assert_eq!(Role::Participant.sync_command(), "(synch_see)");
        assert_eq!(Role::Observer.sync_command(), "(eye on)");
        assert_eq!(Role::Participant.cycle_marker(), "sense_body");
        assert_eq!(Role::Observer.cycle_marker(), "see_global");
    }

    #[test]
    fn test_framing() {
        assert_eq!(Framing::Bare.frame("(bye)"), b"(bye)".to_vec());
        assert_eq!(Framing::NullTerminated.frame("(bye)"), b"(bye)\0".to_vec());
    }
}
