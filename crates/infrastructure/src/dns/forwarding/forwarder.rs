use crate::dns::transport::udp::UdpTransport;
use async_trait::async_trait;
use podhost_dns_application::ports::UpstreamForwarder;
use podhost_dns_domain::{DomainError, ResolverConfig};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::{debug, warn};

/// Tries each upstream in configured order; the first reply wins.
pub struct UdpUpstreamForwarder {
    servers: Vec<UdpTransport>,
    timeout: Duration,
}

impl UdpUpstreamForwarder {
    pub fn new(servers: &[SocketAddr], timeout: Duration) -> Self {
        Self {
            servers: servers.iter().copied().map(UdpTransport::new).collect(),
            timeout,
        }
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(config.upstream(), config.query_timeout())
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.servers.iter().map(UdpTransport::server_addr).collect()
    }
}

#[async_trait]
impl UpstreamForwarder for UdpUpstreamForwarder {
    async fn forward(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        if self.servers.is_empty() {
            return Err(DomainError::TransportNoHealthyServers);
        }
        debug!(strategy = "failover", servers = self.servers.len(), "Forwarding query");

        for (index, transport) in self.servers.iter().enumerate() {
            match transport.send(query, self.timeout).await {
                Ok(response) => {
                    debug!(server = %transport.server_addr(), position = index, "Server responded");
                    return Ok(response);
                }
                Err(e) => {
                    warn!(server = %transport.server_addr(), error = %e, position = index, "Failing over");
                }
            }
        }
        Err(DomainError::TransportAllServersUnreachable)
    }
}
