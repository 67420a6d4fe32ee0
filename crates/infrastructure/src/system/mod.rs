pub mod interfaces;

pub use interfaces::{local_ipv4_addresses, select_server_ip};
