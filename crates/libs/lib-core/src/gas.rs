//! Gas settings for the deployment transaction.
//!
//! Most wallets estimate gas themselves. OKX Wallet fails estimation for
//! contract creation on this chain, so when its marker is present a fixed
//! limit and price are sent instead.

use std::rc::Rc;

use alloy_rpc_types_eth::TransactionRequest;

use crate::provider::{WalletEnvironment, WalletKind};

/// 1 gwei.
pub const MANUAL_GAS_PRICE_WEI: u64 = 1_000_000_000;
pub const MANUAL_GAS_LIMIT: u64 = 200_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GasStrategy {
    /// Let the wallet estimate.
    Auto,
    Manual { gas_price_wei: u64, gas_limit: u64 },
}

impl GasStrategy {
    pub fn manual_default() -> Self {
        GasStrategy::Manual {
            gas_price_wei: MANUAL_GAS_PRICE_WEI,
            gas_limit: MANUAL_GAS_LIMIT,
        }
    }

    pub fn is_manual(&self) -> bool {
        matches!(self, GasStrategy::Manual { .. })
    }

    pub fn apply(&self, tx: &mut TransactionRequest) {
        if let GasStrategy::Manual {
            gas_price_wei,
            gas_limit,
        } = *self
        {
            tx.gas = Some(gas_limit);
            tx.gas_price = Some(u128::from(gas_price_wei));
        }
    }
}

/// Decides the gas strategy for the next deployment.
pub trait GasPolicy {
    fn strategy(&self) -> GasStrategy;
}

/// Always [`GasStrategy::Auto`].
pub struct AutoGas;

impl GasPolicy for AutoGas {
    fn strategy(&self) -> GasStrategy {
        GasStrategy::Auto
    }
}

/// Manual gas whenever a vendor's global marker is on the page.
///
/// The marker is checked independently of which provider was detected, so a
/// page with both `window.ethereum` and `window.okxwallet` deploys through the
/// generic provider with manual gas.
pub struct VendorMarkerPolicy {
    env: Rc<dyn WalletEnvironment>,
    vendor: WalletKind,
}

impl VendorMarkerPolicy {
    pub fn new(env: Rc<dyn WalletEnvironment>, vendor: WalletKind) -> Self {
        Self { env, vendor }
    }

    pub fn okx(env: Rc<dyn WalletEnvironment>) -> Self {
        Self::new(env, WalletKind::Okx)
    }
}

impl GasPolicy for VendorMarkerPolicy {
    fn strategy(&self) -> GasStrategy {
        if self.env.has_marker(self.vendor) {
            GasStrategy::manual_default()
        } else {
            GasStrategy::Auto
        }
    }
}
