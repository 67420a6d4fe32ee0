use crate::dns::query_parser::parse_query;
use crate::dns::wire_response::build_local_response;
use podhost_dns_application::use_cases::{HandleDnsQueryUseCase, QueryOutcome};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::debug;

/// Turns one raw inbound message into the bytes to send back, if any.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub fn use_case(&self) -> &HandleDnsQueryUseCase {
        &self.use_case
    }

    pub async fn handle_raw(&self, buf: &[u8], client: SocketAddr) -> Option<Vec<u8>> {
        let query = match parse_query(buf) {
            Ok(query) => query,
            Err(e) => {
                debug!(client = %client, error = %e, "Dropping malformed query");
                return None;
            }
        };

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            client = %client,
            "DNS query received"
        );

        match self.use_case.execute(&query, buf).await? {
            QueryOutcome::Authoritative(ip) => build_local_response(&query, buf, ip),
            QueryOutcome::Upstream(reply) => Some(reply),
        }
    }
}
