//! # Core Library
//!
//! Everything the deployer does that is not DOM: wallet session, deployment
//! orchestration, error classification and configuration. The browser is
//! reached only through traits ([`Eip1193Provider`], [`WalletEnvironment`],
//! [`Runtime`]), so the whole crate runs under plain `cargo test`.
//!
//! ## Modules
//!
//! - [`session`]: [`WalletSessionManager`], connect / disconnect / switch network / events
//! - [`deploy`]: [`DeploymentOrchestrator`] and the [`ContractDeployer`] seam
//! - [`provider`]: EIP-1193 capability, wallet discovery, RPC wire types
//! - [`signer`]: transaction submission and message signing for the connected account
//! - [`gas`]: gas strategy selection
//! - [`store`]: observable state container backing both managers
//! - [`classify`]: user-facing error messages
//! - [`config`]: compiled-in configuration

pub mod classify;
pub mod config;
pub mod deploy;
pub mod error;
pub mod gas;
pub mod provider;
pub mod runtime;
pub mod session;
pub mod signer;
pub mod store;
pub mod verify;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use config::Config;
pub use deploy::{ContractDeployer, DeploymentOrchestrator, ProviderDeployer};
pub use error::{Error, ProviderError, Result};
pub use gas::{GasPolicy, GasStrategy, VendorMarkerPolicy};
pub use provider::{DetectedProvider, Eip1193Provider, ProviderEvent, WalletEnvironment, WalletKind};
pub use runtime::Runtime;
pub use session::WalletSessionManager;
pub use signer::Signer;
pub use store::Store;
