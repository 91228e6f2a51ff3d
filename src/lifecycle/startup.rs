//! Startup orchestration.
//!
//! Command-line overrides are applied before validation so that a host given
//! only on the command line still passes the "host must be set" check.

use std::path::Path;

use crate::config::loader::{finalize_config, read_config};
use crate::config::{ConfigError, VanityConfig};

/// Settings that may be supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub bind_address: Option<String>,
}

impl Overrides {
    pub fn apply(self, config: &mut VanityConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(bind_address) = self.bind_address {
            config.server.bind_address = bind_address;
        }
    }
}

/// Read the config file, layer `overrides` on top and validate the result.
pub fn prepare_config(path: &Path, overrides: Overrides) -> Result<VanityConfig, ConfigError> {
    let mut config = read_config(path)?;
    overrides.apply(&mut config);
    finalize_config(config)
}
