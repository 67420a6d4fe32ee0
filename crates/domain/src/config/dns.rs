use crate::resolver_config::DEFAULT_QUERY_TIMEOUT_MS;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DnsConfig {
    #[serde(default)]
    pub domain: String,

    #[serde(default = "default_upstream_servers")]
    pub upstream_servers: Vec<String>,

    /// Per-upstream round trip budget in milliseconds.
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            upstream_servers: default_upstream_servers(),
            query_timeout: default_query_timeout(),
        }
    }
}

fn default_upstream_servers() -> Vec<String> {
    vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
}

fn default_query_timeout() -> u64 {
    DEFAULT_QUERY_TIMEOUT_MS
}
