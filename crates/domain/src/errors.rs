use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed DNS message: {0}")]
    MalformedMessage(String),

    #[error("DNS server is already running")]
    AlreadyRunning,

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("No usable IPv4 server address could be determined")]
    NoServerAddress,

    #[error("Invalid upstream server: {0}")]
    InvalidUpstream(String),

    #[error("Invalid port: {0}")]
    InvalidPort(u16),

    #[error("Failed to bind {addr}: {reason}")]
    Bind { addr: String, reason: String },

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("No upstream servers configured")]
    TransportNoHealthyServers,

    #[error("All upstream servers are unreachable")]
    TransportAllServersUnreachable,
}

impl DomainError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedMessage(reason.into())
    }
}
