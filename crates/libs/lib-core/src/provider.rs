//! # Wallet Provider Capability
//!
//! The injected wallet is reached only through [`Eip1193Provider`]: a JSON-RPC
//! `request` plus `on`/`off` event registration. Which object on the page
//! implements it is decided by a [`WalletEnvironment`], checked in
//! [`WalletKind::DETECTION_ORDER`].
//!
//! ## RPC Methods
//!
//! | Method | Params | Result |
//! |--------|--------|--------|
//! | `eth_requestAccounts` | none | `string[]` |
//! | `eth_accounts` | none | `string[]` |
//! | `eth_chainId` | none | hex quantity |
//! | `wallet_switchEthereumChain` | `[{ chainId }]` | `null` |
//! | `wallet_addEthereumChain` | `[{ chainId, chainName, nativeCurrency, rpcUrls, blockExplorerUrls }]` | `null` |
//! | `eth_sendTransaction` | `[{ from, input, data, gas?, gasPrice? }]` | tx hash |
//! | `eth_getTransactionReceipt` | `[hash]` | receipt or `null` |
//! | `personal_sign` | `[message, address]` | signature |

use std::fmt;
use std::rc::Rc;

use alloy_primitives::{Address, U64};
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::NetworkConfig;

use crate::error::{Error, Result};

pub mod methods {
    pub const REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ACCOUNTS: &str = "eth_accounts";
    pub const CHAIN_ID: &str = "eth_chainId";
    pub const SWITCH_CHAIN: &str = "wallet_switchEthereumChain";
    pub const ADD_CHAIN: &str = "wallet_addEthereumChain";
    pub const SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
    pub const PERSONAL_SIGN: &str = "personal_sign";
}

pub type RequestFuture = LocalBoxFuture<'static, Result<Value>>;

/// Callback for a provider event. Receives the event payload.
pub type EventHandler = Rc<dyn Fn(&Value)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderEvent {
    AccountsChanged,
    ChainChanged,
    Disconnect,
}

impl ProviderEvent {
    pub const ALL: [ProviderEvent; 3] = [
        ProviderEvent::AccountsChanged,
        ProviderEvent::ChainChanged,
        ProviderEvent::Disconnect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderEvent::AccountsChanged => "accountsChanged",
            ProviderEvent::ChainChanged => "chainChanged",
            ProviderEvent::Disconnect => "disconnect",
        }
    }
}

impl fmt::Display for ProviderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token returned by [`Eip1193Provider::on`], needed to detach the same handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// EIP-1193 provider.
///
/// `params` of `Value::Null` means the request carries no params at all.
pub trait Eip1193Provider {
    fn request(&self, method: &str, params: Value) -> RequestFuture;

    fn on(&self, event: ProviderEvent, handler: EventHandler) -> ListenerId;

    fn off(&self, event: ProviderEvent, id: ListenerId);
}

/// Injected wallets, in the order they are checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Injected,
    Rabby,
    Okx,
    Bitget,
    TokenPocket,
    ImToken,
}

impl WalletKind {
    pub const DETECTION_ORDER: [WalletKind; 6] = [
        WalletKind::Injected,
        WalletKind::Rabby,
        WalletKind::Okx,
        WalletKind::Bitget,
        WalletKind::TokenPocket,
        WalletKind::ImToken,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            WalletKind::Injected => "Injected",
            WalletKind::Rabby => "Rabby",
            WalletKind::Okx => "OKX Wallet",
            WalletKind::Bitget => "Bitget Wallet",
            WalletKind::TokenPocket => "TokenPocket",
            WalletKind::ImToken => "imToken",
        }
    }

    /// Where the wallet puts its provider on `window`.
    pub fn global_path(&self) -> &'static [&'static str] {
        match self {
            WalletKind::Injected => &["ethereum"],
            WalletKind::Rabby => &["rabby", "ethereum"],
            WalletKind::Okx => &["okxwallet"],
            WalletKind::Bitget => &["bitkeep"],
            WalletKind::TokenPocket => &["tokenpocket"],
            WalletKind::ImToken => &["imToken"],
        }
    }
}

/// The provider chosen for this page, tagged with where it was found.
#[derive(Clone)]
pub struct DetectedProvider {
    pub kind: WalletKind,
    pub provider: Rc<dyn Eip1193Provider>,
}

impl fmt::Debug for DetectedProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectedProvider").field("kind", &self.kind).finish()
    }
}

/// What the page exposes.
pub trait WalletEnvironment {
    /// Provider at `kind`'s global path, if present.
    fn provider(&self, kind: WalletKind) -> Option<Rc<dyn Eip1193Provider>>;

    /// Whether the vendor's own global marker is present, regardless of which
    /// provider ends up being used.
    fn has_marker(&self, kind: WalletKind) -> bool;
}

/// First provider in detection order, or `None` when no wallet is injected.
pub fn detect_provider(env: &dyn WalletEnvironment) -> Option<DetectedProvider> {
    WalletKind::DETECTION_ORDER.iter().find_map(|kind| {
        env.provider(*kind).map(|provider| {
            tracing::debug!("Detected wallet provider: {}", kind.name());
            DetectedProvider { kind: *kind, provider }
        })
    })
}

/// `request` followed by deserialization of the result.
pub async fn request_typed<T: DeserializeOwned>(
    provider: &dyn Eip1193Provider,
    method: &str,
    params: Value,
) -> Result<T> {
    let value = provider.request(method, params).await?;
    serde_json::from_value(value)
        .map_err(|e| Error::MalformedResponse(format!("{} returned unexpected data: {}", method, e)))
}

/// Parse a chain id as wallets report it: hex quantity, decimal string, or number.
/// Returns `None` for anything unparseable, and for zero.
pub fn parse_chain_id(value: &Value) -> Option<u64> {
    let id = match value {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<U64>().ok()?.to::<u64>(),
        _ => return None,
    };
    (id != 0).then_some(id)
}

/// Account list from an `accountsChanged` payload. Entries that are not
/// addresses are skipped.
pub fn parse_accounts(value: &Value) -> Vec<Address> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str()?.parse::<Address>().ok())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
    pub chain_id: U64,
}

impl From<&NetworkConfig> for SwitchEthereumChainParameter {
    fn from(network: &NetworkConfig) -> Self {
        Self {
            chain_id: U64::from(network.chain_id),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: U64,
    pub chain_name: String,
    pub native_currency: shared::NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl From<&NetworkConfig> for AddEthereumChainParameter {
    fn from(network: &NetworkConfig) -> Self {
        Self {
            chain_id: U64::from(network.chain_id),
            chain_name: network.name.clone(),
            native_currency: network.native_currency.clone(),
            rpc_urls: vec![network.rpc_url.clone()],
            block_explorer_urls: vec![network.explorer_url.clone()],
        }
    }
}
