//! # Shared Types Library
//!
//! Plain data shared between the deployment core (`lib-core`) and the browser
//! front end (`deployer-web`). Nothing in here talks to a wallet; these are the
//! values the core publishes and the UI renders.
//!
//! ## Structure
//!
//! - **[`network`]**: the target [`NetworkConfig`] (Helios Testnet by default)
//! - **[`contracts`]**: the static contract catalog ([`ContractArtifact`]: JSON ABI and creation bytecode)
//! - **[`dto`]**: state snapshots published by the core
//!   - **[`dto::wallet`]**: [`WalletSession`]
//!   - **[`dto::deployment`]**: [`DeploymentAttempt`] and [`DeploymentStatus`]
//! - **[`utils`]**: address formatting helpers
//!
//! ## Wire Format
//!
//! Snapshots serialize with `serde` defaults (snake_case fields, lowercase
//! enums). Addresses are [`alloy_primitives::Address`] and serialize as `0x` hex.
//! ABIs are kept in the standard Solidity JSON ABI shape and decoded into
//! [`alloy_json_abi::JsonAbi`].
//!
//! ```rust
//! use shared::{ContractKey, NetworkConfig};
//!
//! let network = NetworkConfig::helios_testnet();
//! assert_eq!(network.chain_id_hex(), "0xa410");
//!
//! let counter = ContractKey::Counter.artifact();
//! assert_eq!(counter.name, "Simple Counter");
//! ```

pub mod contracts;
pub mod dto;
pub mod network;
pub mod utils;

pub use contracts::{ContractArtifact, ContractKey, CATALOG};
pub use dto::*;
pub use network::{NativeCurrency, NetworkConfig, HELIOS_TESTNET_CHAIN_ID};
pub use utils::*;
