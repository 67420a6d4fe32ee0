//! Podhost DNS Domain Layer
pub mod config;
pub mod dns_query;
pub mod errors;
pub mod record_type;
pub mod resolver_config;
pub mod server_address;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use errors::DomainError;
pub use record_type::RecordType;
pub use resolver_config::{matches_domain, parse_upstream, ResolverConfig};
pub use server_address::{preferred_ipv4, AddressPreference};
