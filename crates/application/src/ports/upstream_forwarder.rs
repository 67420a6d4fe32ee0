use async_trait::async_trait;
use podhost_dns_domain::DomainError;

/// Relays a query to resolvers outside the local domain.
#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Send `query` unmodified and return the first reply received, byte for byte.
    async fn forward(&self, query: &[u8]) -> Result<Vec<u8>, DomainError>;
}
