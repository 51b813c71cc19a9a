//! Async UDP transport with dynamic peer tracking.
//!
//! The server replies from an ephemeral port, not the well-known connect
//! port, so the socket stays unconnected: every send names its target
//! explicitly and every receive reports the sender's source port for the
//! session to track. The transport knows nothing about the protocol — it
//! sends exactly the bytes it is given (terminators are the caller's
//! concern) and hands payloads back uninterpreted.

use std::io;
use std::net::SocketAddr;

use tokio::net::UdpSocket;

use crate::error::TransportError;

/// Receive buffer size.
///
/// A larger incoming datagram is silently truncated to this size; the
/// protocol's messages fit comfortably, so no reassembly is attempted.
pub const RECV_BUFFER_SIZE: usize = 4096;

/// Unconnected UDP socket wrapper for the simulation protocol.
#[derive(Debug)]
pub struct RcssSocket {
    socket: UdpSocket,
    recv_buffer: Vec<u8>,
}

impl RcssSocket {
    /// Bind to an ephemeral local port on all interfaces.
    pub async fn bind() -> Result<Self, TransportError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).await?;
        Ok(Self::from_socket(socket))
    }

    /// Wrap an existing UDP socket.
    pub fn from_socket(socket: UdpSocket) -> Self {
        Self {
            socket,
            recv_buffer: vec![0u8; RECV_BUFFER_SIZE],
        }
    }

    /// Get the local address the socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Send one datagram containing exactly `payload` to `host:port`.
    pub async fn send_to(&self, payload: &[u8], host: &str, port: u16) -> Result<(), TransportError> {
        self.socket.send_to(payload, (host, port)).await?;
        Ok(())
    }

    /// Block until one datagram arrives.
    ///
    /// Returns the payload and the UDP source port it arrived from. The
    /// caller is expected to target that port with its next send.
    pub async fn recv(&mut self) -> Result<(&[u8], u16), TransportError> {
        let (len, addr) = self.socket.recv_from(&mut self.recv_buffer).await?;
        Ok((&self.recv_buffer[..len], addr.port()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_ephemeral() {
        let socket = RcssSocket::bind().await.unwrap();
        assert!(socket.local_addr().unwrap().port() != 0);
    }

    #[tokio::test]
    async fn test_send_recv_reports_source_port() {
        let mut receiver = RcssSocket::bind().await.unwrap();
        let recv_port = receiver.local_addr().unwrap().port();

        let sender = RcssSocket::bind().await.unwrap();
        let send_port = sender.local_addr().unwrap().port();

        sender.send_to(b"(hello)", "127.0.0.1", recv_port).await.unwrap();

        let (payload, source_port) = receiver.recv().await.unwrap();
        assert_eq!(payload, b"(hello)");
        assert_eq!(source_port, send_port);
    }

    #[tokio::test]
    async fn test_oversized_datagram_truncates() {
        let mut receiver = RcssSocket::bind().await.unwrap();
        let recv_port = receiver.local_addr().unwrap().port();

        let peer = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let oversized = vec![b'x'; RECV_BUFFER_SIZE + 100];
        peer.send_to(&oversized, ("127.0.0.1", recv_port)).await.unwrap();

        let (payload, _) = receiver.recv().await.unwrap();
        assert_eq!(payload.len(), RECV_BUFFER_SIZE);
    }
}
