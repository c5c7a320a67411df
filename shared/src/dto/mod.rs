//! # State Snapshots
//!
//! Values published by the core state containers after every atomic update.
//!
//! - [`wallet`] - the wallet session (address, chain id, flags, last error)
//! - [`deployment`] - the single active deployment attempt
//!
//! Enums serialize to lowercase strings, for example:
//!
//! ```text
//! {
//!   "status": "success",
//!   "message": "Contract deployed successfully!",
//!   "deployed_address": "0xabc...123",
//!   "transaction_hash": "0xdef...456",
//!   "error": null
//! }
//! ```

pub mod deployment;
pub mod wallet;

pub use deployment::*;
pub use wallet::*;
