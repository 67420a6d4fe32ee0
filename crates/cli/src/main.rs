use clap::Parser;
use podhost_dns_domain::CliOverrides;
use tracing::info;

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "podhost-dns")]
#[command(version = "0.1.0")]
#[command(about = "Podhost DNS - split-horizon resolver for container hosts")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Local domain answered by this server (e.g. base.pod)
    #[arg(long)]
    domain: Option<String>,

    /// IPv4 address returned for local names (auto-detected when omitted)
    #[arg(long)]
    server_ip: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        server_ip: cli.server_ip,
        domain: cli.domain,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Podhost DNS v{}", env!("CARGO_PKG_VERSION"));

    let resolver_config = bootstrap::build_resolver_config(&config)?;
    let dns_services = di::DnsServices::new(resolver_config);

    dns_services.server.start().await?;

    server::wait_for_shutdown().await?;

    dns_services.server.stop().await;
    info!("Server shutdown complete");
    Ok(())
}
