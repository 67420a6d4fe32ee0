use super::DomainError;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const DEFAULT_DNS_PORT: u16 = 53;
pub const DEFAULT_QUERY_TIMEOUT_MS: u64 = 2000;

/// Runtime settings of the resolver. Built once at startup and shared
/// read-only by every query task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    domain: String,
    server_ip: Ipv4Addr,
    bind_address: IpAddr,
    port: u16,
    upstream: Vec<SocketAddr>,
    query_timeout: Duration,
}

impl ResolverConfig {
    pub fn new(
        domain: &str,
        server_ip: Ipv4Addr,
        bind_address: IpAddr,
        port: u16,
        upstream: Vec<SocketAddr>,
        query_timeout: Duration,
    ) -> Result<Self, DomainError> {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "domain cannot be empty".to_string(),
            ));
        }
        if port == 0 {
            return Err(DomainError::InvalidPort(port));
        }

        Ok(Self {
            domain,
            server_ip,
            bind_address,
            port,
            upstream,
            query_timeout,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn server_ip(&self) -> Ipv4Addr {
        self.server_ip
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    pub fn upstream(&self) -> &[SocketAddr] {
        &self.upstream
    }

    pub fn query_timeout(&self) -> Duration {
        self.query_timeout
    }

    pub fn is_local(&self, name: &str) -> bool {
        matches_domain(name, &self.domain)
    }
}

fn normalize_domain(domain: &str) -> String {
    domain
        .trim()
        .trim_start_matches('.')
        .trim_end_matches('.')
        .to_ascii_lowercase()
}

/// True when `name` is `domain` itself or any name below it.
///
/// Comparison ignores ASCII case and a trailing root dot on either side.
pub fn matches_domain(name: &str, domain: &str) -> bool {
    let name = name.trim_end_matches('.');
    let domain = domain.trim_end_matches('.');
    if domain.is_empty() || name.len() < domain.len() {
        return false;
    }

    let split = name.len() - domain.len();
    if !name.is_char_boundary(split) || !name[split..].eq_ignore_ascii_case(domain) {
        return false;
    }

    split == 0 || name.as_bytes()[split - 1] == b'.'
}

/// Parses an upstream endpoint. A bare address implies port 53.
pub fn parse_upstream(value: &str) -> Result<SocketAddr, DomainError> {
    let value = value.trim();
    if let Ok(addr) = value.parse::<SocketAddr>() {
        return Ok(addr);
    }
    if let Ok(ip) = value.parse::<IpAddr>() {
        return Ok(SocketAddr::new(ip, DEFAULT_DNS_PORT));
    }
    Err(DomainError::InvalidUpstream(value.to_string()))
}
