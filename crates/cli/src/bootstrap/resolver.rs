use podhost_dns_domain::{parse_upstream, Config, ResolverConfig};
use podhost_dns_infrastructure::system::select_server_ip;
use std::net::IpAddr;
use std::time::Duration;
use tracing::info;

pub fn build_resolver_config(config: &Config) -> anyhow::Result<ResolverConfig> {
    let server_ip = select_server_ip(config.server.server_ip.as_deref())?;
    let bind_address: IpAddr = config.server.bind_address.parse()?;

    let upstream = config
        .dns
        .upstream_servers
        .iter()
        .map(|server| parse_upstream(server))
        .collect::<Result<Vec<_>, _>>()?;

    info!(
        domain = %config.dns.domain,
        server_ip = %server_ip,
        upstream_count = upstream.len(),
        "Resolver configured"
    );

    Ok(ResolverConfig::new(
        &config.dns.domain,
        server_ip,
        bind_address,
        config.server.dns_port,
        upstream,
        Duration::from_millis(config.dns.query_timeout),
    )?)
}
