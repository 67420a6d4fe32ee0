use crate::resolver_config::DEFAULT_DNS_PORT;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Address handed out for names under the local domain. Detected from the
    /// host's interfaces when absent.
    #[serde(default)]
    pub server_ip: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            server_ip: None,
        }
    }
}

fn default_dns_port() -> u16 {
    DEFAULT_DNS_PORT
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
