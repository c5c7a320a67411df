//! # Application Configuration
//!
//! Everything here is compiled in: the page has no environment to read at
//! runtime. Defaults target Helios Testnet; a build can point at another
//! chain by setting these variables when compiling:
//!
//! | Variable | Overrides |
//! |----------|-----------|
//! | `DEPLOYER_CHAIN_ID` | chain id (decimal or `0x` hex) |
//! | `DEPLOYER_NETWORK_NAME` | display name |
//! | `DEPLOYER_RPC_URL` | RPC URL offered to `wallet_addEthereumChain` |
//! | `DEPLOYER_EXPLORER_URL` | block explorer base URL |
//! | `DEPLOYER_VERIFY_SIGNATURE` | `true` to request a signature after connecting |
//!
//! ## Global Config Access
//!
//! ```rust
//! use lib_core::config::{core_config, init_config};
//!
//! init_config().unwrap();
//! assert_eq!(core_config().network.chain_id, 42000);
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use shared::NetworkConfig;

use crate::error::{Error, Result};
use crate::provider::parse_chain_id;

pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_NETWORK_SWITCH_DELAY: Duration = Duration::from_secs(1);
pub const DEFAULT_RECEIPT_POLL_INTERVAL: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Network the wallet is expected to be on.
    pub network: NetworkConfig,

    /// Upper bound on waiting for a deployment receipt.
    pub confirmation_timeout: Duration,

    /// Delay before the automatic switch request after connecting to the
    /// wrong chain.
    pub network_switch_delay: Duration,

    pub receipt_poll_interval: Duration,

    /// Ask for a timestamped `personal_sign` after connecting.
    pub verify_signature_on_connect: bool,

    /// Name used in the verification message.
    pub app_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::helios_testnet(),
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
            network_switch_delay: DEFAULT_NETWORK_SWITCH_DELAY,
            receipt_poll_interval: DEFAULT_RECEIPT_POLL_INTERVAL,
            verify_signature_on_connect: false,
            app_name: "Helios Contract Deployer".to_string(),
        }
    }
}

/// Raw override values, as captured at build time.
#[derive(Clone, Debug, Default)]
pub struct Overrides<'a> {
    pub chain_id: Option<&'a str>,
    pub network_name: Option<&'a str>,
    pub rpc_url: Option<&'a str>,
    pub explorer_url: Option<&'a str>,
    pub verify_signature: Option<&'a str>,
}

impl Overrides<'static> {
    pub fn from_build_env() -> Self {
        Self {
            chain_id: option_env!("DEPLOYER_CHAIN_ID"),
            network_name: option_env!("DEPLOYER_NETWORK_NAME"),
            rpc_url: option_env!("DEPLOYER_RPC_URL"),
            explorer_url: option_env!("DEPLOYER_EXPLORER_URL"),
            verify_signature: option_env!("DEPLOYER_VERIFY_SIGNATURE"),
        }
    }
}

impl Config {
    /// Defaults plus whatever was set at compile time.
    pub fn from_build_env() -> Result<Self> {
        Self::from_overrides(&Overrides::from_build_env())
    }

    pub fn from_overrides(overrides: &Overrides<'_>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = overrides.chain_id {
            config.network.chain_id = parse_chain_id(&serde_json::Value::String(raw.to_string()))
                .ok_or_else(|| {
                    Error::Config(format!("DEPLOYER_CHAIN_ID must be a non-zero chain id, got '{}'", raw))
                })?;
        }
        if let Some(name) = overrides.network_name {
            config.network.name = name.trim().to_string();
        }
        if let Some(url) = overrides.rpc_url {
            config.network.rpc_url = url.trim().to_string();
        }
        if let Some(url) = overrides.explorer_url {
            config.network.explorer_url = url.trim().to_string();
        }
        if let Some(raw) = overrides.verify_signature {
            config.verify_signature_on_connect = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                other => {
                    return Err(Error::Config(format!(
                        "DEPLOYER_VERIFY_SIGNATURE must be true or false, got '{}'",
                        other
                    )))
                }
            };
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.network.chain_id == 0 {
            return Err(Error::Config("chain id must be non-zero".to_string()));
        }
        if self.network.name.is_empty() {
            return Err(Error::Config("network name must not be empty".to_string()));
        }
        for (label, url) in [("RPC URL", &self.network.rpc_url), ("explorer URL", &self.network.explorer_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(Error::Config(format!("{} must be an http(s) URL, got '{}'", label, url)));
            }
        }
        if self.network.native_currency.decimals != 18 {
            return Err(Error::Config("native currency must use 18 decimals".to_string()));
        }
        if self.confirmation_timeout.is_zero() || self.receipt_poll_interval.is_zero() {
            return Err(Error::Config("timeouts must be non-zero".to_string()));
        }
        Ok(())
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Build, validate and store the global configuration.
///
/// # Errors
///
/// Returns an error if an override is invalid, validation fails, or the
/// config has already been initialized.
pub fn init_config() -> Result<()> {
    let config = Config::from_build_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Config has already been initialized".to_string()))
}

/// The global configuration. Falls back to the defaults if [`init_config()`]
/// was never called.
pub fn core_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
