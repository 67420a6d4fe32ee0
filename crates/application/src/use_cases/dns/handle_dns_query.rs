use crate::ports::UpstreamForwarder;
use podhost_dns_domain::{DnsQuery, RecordType, ResolverConfig};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::debug;

/// Where a decoded question gets its answer from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Authoritative(Ipv4Addr),
    Forward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Synthesize an A answer carrying this address.
    Authoritative(Ipv4Addr),
    /// Relay these upstream bytes to the client unchanged.
    Upstream(Vec<u8>),
}

pub struct HandleDnsQueryUseCase {
    config: Arc<ResolverConfig>,
    forwarder: Arc<dyn UpstreamForwarder>,
}

impl HandleDnsQueryUseCase {
    pub fn new(config: Arc<ResolverConfig>, forwarder: Arc<dyn UpstreamForwarder>) -> Self {
        Self { config, forwarder }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Only A questions under the local domain are answered here.
    pub fn route(&self, query: &DnsQuery) -> Route {
        if query.record_type == RecordType::A && self.config.is_local(&query.domain) {
            Route::Authoritative(self.config.server_ip())
        } else {
            Route::Forward
        }
    }

    /// Returns `None` when nothing should be sent back to the client.
    pub async fn execute(&self, query: &DnsQuery, raw: &[u8]) -> Option<QueryOutcome> {
        match self.route(query) {
            Route::Authoritative(ip) => {
                debug!(domain = %query.domain, answer = %ip, "Answering locally");
                Some(QueryOutcome::Authoritative(ip))
            }
            Route::Forward => match self.forwarder.forward(raw).await {
                Ok(reply) => {
                    debug!(
                        domain = %query.domain,
                        record_type = %query.record_type,
                        bytes = reply.len(),
                        "Relaying upstream reply"
                    );
                    Some(QueryOutcome::Upstream(reply))
                }
                Err(e) => {
                    debug!(domain = %query.domain, error = %e, "Dropping query, no upstream reply");
                    None
                }
            },
        }
    }
}
