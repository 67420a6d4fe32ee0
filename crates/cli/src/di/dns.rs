use podhost_dns_application::use_cases::HandleDnsQueryUseCase;
use podhost_dns_domain::ResolverConfig;
use podhost_dns_infrastructure::dns::{DnsServer, DnsServerHandler, UdpUpstreamForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub server: DnsServer,
}

impl DnsServices {
    pub fn new(config: ResolverConfig) -> Self {
        let forwarder = Arc::new(UdpUpstreamForwarder::from_config(&config));
        info!(servers = ?forwarder.servers(), "Upstream forwarder ready");

        let use_case = Arc::new(HandleDnsQueryUseCase::new(Arc::new(config), forwarder));
        let handler = DnsServerHandler::new(use_case);

        Self {
            server: DnsServer::new(handler),
        }
    }
}
