use serde::Deserialize;

use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::resolver_config::parse_upstream;

const LOCAL_CONFIG_PATH: &str = "podhost-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/podhost-dns/config.toml";

/// Main configuration structure for podhost-dns
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Listener settings (port, bind address, advertised address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Local domain and upstream resolvers
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. podhost-dns.toml in current directory
    /// 3. /etc/podhost-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(ip) = overrides.server_ip {
            self.server.server_ip = Some(ip);
        }
        if let Some(domain) = overrides.domain {
            self.dns.domain = domain;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.dns.domain.trim().trim_matches('.').is_empty() {
            return Err(ConfigError::Validation(
                "dns.domain must be set".to_string(),
            ));
        }

        if self.server.bind_address.parse::<std::net::IpAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address '{}'",
                self.server.bind_address
            )));
        }

        for server in &self.dns.upstream_servers {
            parse_upstream(server).map_err(|e| ConfigError::Validation(e.to_string()))?;
        }

        Ok(())
    }

    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub server_ip: Option<String>,
    pub domain: Option<String>,
    pub log_level: Option<String>,
}
