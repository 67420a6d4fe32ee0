#![allow(dead_code)]

use async_trait::async_trait;
use podhost_dns_application::ports::UpstreamForwarder;
use podhost_dns_domain::DomainError;
use std::sync::{Arc, Mutex};

/// Records every forwarded query and answers with a canned reply.
#[derive(Clone, Default)]
pub struct MockUpstreamForwarder {
    reply: Option<Vec<u8>>,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockUpstreamForwarder {
    pub fn replying(reply: Vec<u8>) -> Self {
        Self {
            reply: Some(reply),
            received: Arc::default(),
        }
    }

    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamForwarder for MockUpstreamForwarder {
    async fn forward(&self, query: &[u8]) -> Result<Vec<u8>, DomainError> {
        self.received.lock().unwrap().push(query.to_vec());
        self.reply
            .clone()
            .ok_or(DomainError::TransportAllServersUnreachable)
    }
}
