//! Gateway configuration.

use std::path::Path;

use anyhow::bail;
use serde::Deserialize;

/// How many epochs, counting the current one, may still sign proofs.
pub const OLD_KEY_RETENTION: u64 = 16;

/// Static configuration of a gateway instance.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct GatewayConfig {
    /// The chain id that command batches must target.
    pub chain_id: u64,
    /// How many n epochs do we consider valid
    pub previous_operators_retention: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            chain_id: 0,
            previous_operators_retention: OLD_KEY_RETENTION,
        }
    }
}

impl GatewayConfig {
    /// Create a new [`GatewayConfig`] for `chain_id` with the default
    /// retention window.
    #[must_use]
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            ..Self::default()
        }
    }

    /// Read and validate a TOML configuration file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let config_file = std::fs::read_to_string(path)?;
        Self::from_toml_str(&config_file)
    }

    /// Parse and validate a TOML configuration.
    pub fn from_toml_str(config: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(config)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the gateway cannot operate with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.previous_operators_retention == 0 {
            bail!("previous_operators_retention must keep at least the current epoch")
        }
        Ok(())
    }
}
