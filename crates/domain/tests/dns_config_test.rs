use podhost_dns_domain::config::{CliOverrides, Config, ConfigError, DnsConfig, ServerConfig};
use std::io::Write;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert!(config.server.server_ip.is_none());
    assert!(config.dns.domain.is_empty());
    assert_eq!(
        config.dns.upstream_servers,
        vec!["8.8.8.8:53".to_string(), "1.1.1.1:53".to_string()]
    );
    assert_eq!(config.dns.query_timeout, 2000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_config_partial_toml_fills_defaults() {
    let toml_str = r#"
        [dns]
        domain = "base.pod"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.dns.domain, "base.pod");
    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.dns.upstream_servers.len(), 2);
}

#[test]
fn test_config_full_toml() {
    let toml_str = r#"
        [server]
        dns_port = 15353
        bind_address = "127.0.0.1"
        server_ip = "127.0.0.2"

        [dns]
        domain = "base.pod"
        upstream_servers = ["9.9.9.9"]
        query_timeout = 500

        [logging]
        level = "debug"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.server.dns_port, 15353);
    assert_eq!(config.server.server_ip.as_deref(), Some("127.0.0.2"));
    assert_eq!(config.dns.upstream_servers, vec!["9.9.9.9".to_string()]);
    assert_eq!(config.dns.query_timeout, 500);
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_upstream_list_is_allowed() {
    let config = Config {
        dns: DnsConfig {
            domain: "base.pod".to_string(),
            upstream_servers: vec![],
            ..DnsConfig::default()
        },
        ..Config::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_rejects_zero_port() {
    let config = Config {
        server: ServerConfig {
            dns_port: 0,
            ..ServerConfig::default()
        },
        dns: DnsConfig {
            domain: "base.pod".to_string(),
            ..DnsConfig::default()
        },
        ..Config::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_missing_domain() {
    let mut config = Config::default();
    assert!(config.validate().is_err());

    config.dns.domain = ".".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_upstream() {
    let mut config = Config::default();
    config.dns.domain = "base.pod".to_string();
    config.dns.upstream_servers = vec!["not-an-address".to_string()];

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("not-an-address"), "{}", err);
}

#[test]
fn test_validate_rejects_bad_bind_address() {
    let mut config = Config::default();
    config.dns.domain = "base.pod".to_string();
    config.server.bind_address = "localhost".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_load_from_explicit_path_applies_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
        [server]
        dns_port = 5300

        [dns]
        domain = "file.pod"
        "#
    )
    .unwrap();

    let overrides = CliOverrides {
        dns_port: Some(15353),
        domain: Some("cli.pod".to_string()),
        log_level: Some("trace".to_string()),
        ..CliOverrides::default()
    };

    let config = Config::load(file.path().to_str(), overrides).unwrap();
    assert_eq!(config.server.dns_port, 15353);
    assert_eq!(config.dns.domain, "cli.pod");
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_load_missing_file_is_read_error() {
    let result = Config::load(Some("/nonexistent/podhost-dns.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn test_load_invalid_toml_is_parse_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[dns\ndomain = ").unwrap();

    let result = Config::load(file.path().to_str(), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
