use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::chain::address::{AddressCodec, DEFAULT_ACCOUNT_PREFIX, DEFAULT_VALIDATOR_PREFIX};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub bech32: Bech32Config,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bech32Config {
    /// Prefix of ordinary account addresses, e.g. "secret"
    pub account_prefix: String,
    /// Prefix of validator operator addresses, e.g. "secretvaloper"
    pub validator_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing-subscriber filter directive; RUST_LOG takes precedence
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "compute_msg_encoder=info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bech32: Bech32Config {
                account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
                validator_prefix: DEFAULT_VALIDATOR_PREFIX.to_string(),
            },
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.bech32.account_prefix.is_empty() || self.bech32.validator_prefix.is_empty() {
            bail!("bech32 prefixes must not be empty");
        }
        if self.bech32.account_prefix == self.bech32.validator_prefix {
            bail!(
                "account and validator prefixes must differ, both are {:?}",
                self.bech32.account_prefix
            );
        }
        self.address_codec()?;
        Ok(())
    }

    /// Build the address codec described by this configuration
    pub fn address_codec(&self) -> Result<AddressCodec> {
        Ok(AddressCodec::new(
            &self.bech32.account_prefix,
            &self.bech32.validator_prefix,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let codec = config.address_codec().unwrap();
        assert_eq!(codec.account_prefix(), "secret");
        assert_eq!(codec.validator_prefix(), "secretvaloper");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.bech32.account_prefix = "inj".to_string();
        config.bech32.validator_prefix = "injvaloper".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_logging_section_is_optional() {
        let config: Config = toml::from_str(
            r#"
            [bech32]
            account_prefix = "secret"
            validator_prefix = "secretvaloper"
            "#,
        )
        .unwrap();
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_rejects_identical_prefixes() {
        let mut config = Config::default();
        config.bech32.validator_prefix = "secret".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_rejects_invalid_prefix() {
        let mut config = Config::default();
        config.bech32.account_prefix = "sec ret".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_rejects_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[bech32]\naccount_prefix = \"\"\nvalidator_prefix = \"x\"\n").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
