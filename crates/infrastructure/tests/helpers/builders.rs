#![allow(dead_code)]
use podhost_dns_application::use_cases::HandleDnsQueryUseCase;
use podhost_dns_domain::ResolverConfig;
use podhost_dns_infrastructure::dns::{DnsServer, DnsServerHandler, UdpUpstreamForwarder};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, UdpSocket};

pub const SERVER_IP: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 2);
pub const DOMAIN: &str = "base.pod";

/// Builds raw query messages.
pub struct QueryBuilder {
    id: u16,
    qdcount: u16,
    name: String,
    qtype: u16,
}

impl QueryBuilder {
    pub fn a(name: &str) -> Self {
        Self {
            id: 0x1234,
            qdcount: 1,
            name: name.to_string(),
            qtype: 1,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn qdcount(mut self, qdcount: u16) -> Self {
        self.qdcount = qdcount;
        self
    }

    pub fn header_only(id: u16) -> Vec<u8> {
        let mut buf = id.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0x01, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
        buf
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = self.id.to_be_bytes().to_vec();
        buf.extend_from_slice(&[0x01, 0x00]); // RD
        buf.extend_from_slice(&self.qdcount.to_be_bytes());
        buf.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        for label in self.name.trim_end_matches('.').split('.') {
            if label.is_empty() {
                continue;
            }
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0x00);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01]); // IN
        buf
    }
}

/// A port currently free for both UDP and TCP on 127.0.0.1.
pub fn free_port() -> u16 {
    loop {
        let udp = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = udp.local_addr().unwrap().port();
        if std::net::TcpListener::bind(("127.0.0.1", port)).is_ok() {
            return port;
        }
    }
}

pub fn resolver_config(port: u16, upstream: Vec<SocketAddr>) -> ResolverConfig {
    ResolverConfig::new(
        DOMAIN,
        SERVER_IP,
        IpAddr::V4(Ipv4Addr::LOCALHOST),
        port,
        upstream,
        Duration::from_millis(300),
    )
    .unwrap()
}

pub fn build_server(config: ResolverConfig) -> DnsServer {
    let forwarder = UdpUpstreamForwarder::from_config(&config);
    let use_case = HandleDnsQueryUseCase::new(Arc::new(config), Arc::new(forwarder));
    DnsServer::new(DnsServerHandler::new(Arc::new(use_case)))
}

pub struct TestServer {
    pub server: DnsServer,
    pub addr: SocketAddr,
}

impl TestServer {
    pub async fn start(upstream: Vec<SocketAddr>) -> Self {
        let port = free_port();
        let server = build_server(resolver_config(port, upstream));
        server.start().await.unwrap();
        Self {
            server,
            addr: SocketAddr::from(([127, 0, 0, 1], port)),
        }
    }
}

/// Sends one datagram and waits briefly for a reply.
pub async fn udp_exchange(addr: SocketAddr, query: &[u8]) -> Option<Vec<u8>> {
    let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    client.send_to(query, addr).await.unwrap();

    let mut buf = vec![0u8; 4096];
    match tokio::time::timeout(Duration::from_millis(1000), client.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => Some(buf[..len].to_vec()),
        _ => None,
    }
}

/// Sends one framed query and returns everything the server wrote before
/// closing the connection, length prefix included.
pub async fn tcp_exchange(addr: SocketAddr, query: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream
        .write_all(&(query.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(query).await.unwrap();

    let mut raw = Vec::new();
    tokio::time::timeout(Duration::from_millis(2000), stream.read_to_end(&mut raw))
        .await
        .expect("server should close the connection")
        .unwrap();
    raw
}
