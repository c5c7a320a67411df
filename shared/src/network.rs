//! # Target Network
//!
//! The network the deployer expects the wallet to be on. The same value drives
//! the "wrong network" check and the `wallet_addEthereumChain` request sent when
//! the wallet does not know the chain yet.

use serde::{Deserialize, Serialize};

/// Chain id of Helios Testnet.
pub const HELIOS_TESTNET_CHAIN_ID: u64 = 42000;

/// Native currency descriptor, in the shape wallets expect inside
/// `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Static description of the target chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub native_currency: NativeCurrency,
}

impl NetworkConfig {
    /// Helios Testnet, the default deployment target.
    pub fn helios_testnet() -> Self {
        Self {
            chain_id: HELIOS_TESTNET_CHAIN_ID,
            name: "Helios Testnet".to_string(),
            rpc_url: "https://testnet1.helioschainlabs.org".to_string(),
            explorer_url: "https://explorer.helioschainlabs.org".to_string(),
            native_currency: NativeCurrency {
                name: "Helios".to_string(),
                symbol: "HLS".to_string(),
                decimals: 18,
            },
        }
    }

    /// Chain id as the `0x`-prefixed quantity used on the wallet RPC surface.
    pub fn chain_id_hex(&self) -> String {
        format!("0x{:x}", self.chain_id)
    }

    /// Explorer page for a contract or account.
    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_base(), address)
    }

    /// Explorer page for a transaction.
    pub fn tx_url(&self, hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_base(), hash)
    }

    fn explorer_base(&self) -> &str {
        self.explorer_url.trim_end_matches('/')
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::helios_testnet()
    }
}
