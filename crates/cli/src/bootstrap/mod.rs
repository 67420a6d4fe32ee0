mod logging;
mod resolver;

pub use logging::init_logging;
pub use resolver::build_resolver_config;

use podhost_dns_domain::{CliOverrides, Config};

pub fn load_config(path: Option<&str>, cli_overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}
