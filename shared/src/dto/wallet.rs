use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

use crate::utils::truncate_address;

/// Wallet session as seen by the UI.
///
/// `connected` implies an `address` and a non-zero `chain_id`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub chain_id: u64,
    pub connected: bool,
    pub connecting: bool,
    pub last_error: Option<String>,
}

impl WalletSession {
    /// Derived, never stored.
    pub fn is_correct_network(&self, expected_chain_id: u64) -> bool {
        self.chain_id == expected_chain_id
    }

    /// Checksummed `0x1234...abcd`, or an empty string when disconnected.
    pub fn display_address(&self) -> String {
        self.address
            .map(|address| truncate_address(&address.to_checksum(None)))
            .unwrap_or_default()
    }

    /// Whether the connected flag agrees with the address and chain id.
    pub fn is_consistent(&self) -> bool {
        self.connected == (self.address.is_some() && self.chain_id != 0)
    }
}
