pub mod forwarding;
pub mod lifecycle;
pub mod listener;
pub mod query_parser;
pub mod server;
pub mod transport;
pub mod wire_response;

pub use forwarding::UdpUpstreamForwarder;
pub use lifecycle::DnsServer;
pub use server::DnsServerHandler;
