#![allow(unused_imports)]

pub mod builders;
pub mod dns_server_mock;

pub use builders::{free_port, tcp_exchange, udp_exchange, QueryBuilder, TestServer};
pub use dns_server_mock::MockDnsServer;
