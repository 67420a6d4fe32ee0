//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Every round trip uses a fresh
//! ephemeral socket connected to the upstream, so the kernel drops datagrams
//! from any other peer. Replies must also echo the query's transaction id.

use podhost_dns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest upstream reply accepted (EDNS(0) sized)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    /// One round trip. `timeout` bounds the send and the wait for a reply
    /// carrying the same transaction id.
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<Vec<u8>, DomainError> {
        let id = message_bytes
            .get(..2)
            .ok_or_else(|| DomainError::malformed("query shorter than its transaction id"))?;

        let socket = UdpSocket::bind(self.bind_addr())
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;
        socket.connect(self.server_addr).await.map_err(|e| {
            DomainError::IoError(format!("Failed to connect to {}: {}", self.server_addr, e))
        })?;

        let bytes_sent = tokio::time::timeout(timeout, socket.send(message_bytes))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to send UDP query to {}: {}",
                    self.server_addr, e
                ))
            })?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let response = tokio::time::timeout(timeout, self.recv_matching(&socket, id))
            .await
            .map_err(|_| self.timeout_error())??;

        debug!(server = %self.server_addr, bytes_received = response.len(), "UDP response received");
        Ok(response)
    }

    async fn recv_matching(&self, socket: &UdpSocket, id: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        loop {
            let bytes_received = socket.recv(&mut recv_buf).await.map_err(|e| {
                DomainError::IoError(format!(
                    "Failed to receive UDP response from {}: {}",
                    self.server_addr, e
                ))
            })?;

            if recv_buf[..bytes_received].starts_with(id) {
                recv_buf.truncate(bytes_received);
                return Ok(recv_buf);
            }
            debug!(
                server = %self.server_addr,
                bytes_received,
                "Ignoring reply with mismatched transaction id"
            );
        }
    }
}
