mod forwarder;

pub use forwarder::UdpUpstreamForwarder;
