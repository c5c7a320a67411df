//! # Deployment Orchestrator
//!
//! Drives one [`DeploymentAttempt`] through `idle → deploying → success | error`.
//! The actual contract-creation step is behind [`ContractDeployer`]; the
//! default implementation is [`ProviderDeployer`], which goes through the
//! wallet's own RPC.
//!
//! Only the wait for the receipt is bounded by the confirmation timeout. On
//! timeout the wait is abandoned, the submitted transaction is not.

use std::rc::Rc;

use alloy_primitives::{hex, Address, TxHash};
use futures::future::LocalBoxFuture;
use shared::{ContractArtifact, DeploymentAttempt};

use crate::classify;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::gas::{GasPolicy, GasStrategy};
use crate::runtime::{with_timeout, Runtime};
use crate::signer::Signer;
use crate::store::{Store, SubscriptionId};

mod rpc;

pub use rpc::ProviderDeployer;

#[cfg(test)]
mod tests;

pub const MSG_PREPARING: &str = "Preparing deployment...";
pub const MSG_MANUAL_GAS: &str = "OKX Wallet detected - using manual gas settings...";
pub const MSG_DEPLOYING: &str = "Deploying contract...";
pub const MSG_WAITING: &str = "Waiting for confirmation...";
pub const MSG_NOT_CONNECTED: &str = "Wallet not connected";
pub const DETAIL_NOT_CONNECTED: &str = "Please connect your wallet first";
/// Stands in for the transaction hash on the manual gas path.
pub const MANUAL_GAS_PLACEHOLDER_HASH: &str = "OKX deployment completed";

/// Everything needed to build the contract-creation transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeploymentRequest {
    pub contract: ContractArtifact,
    pub gas: GasStrategy,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeploymentReceipt {
    pub contract_address: Address,
    pub transaction_hash: Option<TxHash>,
}

/// A submitted deployment, still waiting to be mined.
pub struct PendingDeployment {
    pub transaction_hash: Option<TxHash>,
    pub confirmation: LocalBoxFuture<'static, Result<DeploymentReceipt>>,
}

pub trait ContractDeployer {
    /// Submit through `signer`. Resolves once the wallet has accepted the
    /// transaction; the receipt comes from the returned handle.
    fn deploy(&self, request: DeploymentRequest, signer: &Signer) -> LocalBoxFuture<'static, Result<PendingDeployment>>;
}

#[derive(Clone)]
pub struct DeploymentOrchestrator {
    config: Config,
    runtime: Rc<dyn Runtime>,
    deployer: Rc<dyn ContractDeployer>,
    gas: Rc<dyn GasPolicy>,
    store: Rc<Store<DeploymentAttempt>>,
}

impl DeploymentOrchestrator {
    pub fn new(
        config: Config,
        runtime: Rc<dyn Runtime>,
        deployer: Rc<dyn ContractDeployer>,
        gas: Rc<dyn GasPolicy>,
    ) -> Self {
        Self {
            config,
            runtime,
            deployer,
            gas,
            store: Rc::new(Store::new(DeploymentAttempt::idle())),
        }
    }

    pub fn state(&self) -> DeploymentAttempt {
        self.store.get()
    }

    pub fn store(&self) -> &Store<DeploymentAttempt> {
        &self.store
    }

    pub fn subscribe(&self, f: impl Fn(&DeploymentAttempt) + 'static) -> SubscriptionId {
        self.store.subscribe(f)
    }

    /// Back to idle. An in-flight deployment keeps running.
    pub fn reset(&self) {
        self.store.set(DeploymentAttempt::idle());
    }

    /// Deploy `contract` with the connected account's signer.
    pub async fn deploy(&self, contract: &ContractArtifact, signer: Option<&Signer>) {
        let Some(signer) = signer else {
            tracing::warn!("Deploy requested without a connected wallet");
            self.store
                .set(DeploymentAttempt::failed(MSG_NOT_CONNECTED, DETAIL_NOT_CONNECTED));
            return;
        };

        tracing::info!(contract = contract.name, from = %signer.address(), "Starting deployment");
        self.store.set(DeploymentAttempt::deploying(MSG_PREPARING));

        let gas = self.gas.strategy();
        self.progress(if gas.is_manual() { MSG_MANUAL_GAS } else { MSG_DEPLOYING });

        let request = DeploymentRequest {
            contract: *contract,
            gas,
        };

        match self.submit_and_wait(request, signer).await {
            Ok((address, hash)) => {
                tracing::info!(address = %address, tx = %hash, "Contract deployed");
                self.store.set(DeploymentAttempt::succeeded(address, hash));
            }
            Err(err) => {
                let message =
                    classify::deployment_error_message(&err, &self.config.network.native_currency.symbol);
                tracing::warn!(error = %err, "Deployment failed: {}", message);
                self.store.set(DeploymentAttempt::failed(message, err.to_string()));
            }
        }
    }

    async fn submit_and_wait(&self, request: DeploymentRequest, signer: &Signer) -> Result<(Address, String)> {
        let pending = self.deployer.deploy(request, signer).await?;
        let submitted = pending.transaction_hash;
        if let Some(hash) = &submitted {
            tracing::debug!(tx = %hash, "Deployment transaction submitted");
        }

        self.progress(MSG_WAITING);

        let receipt = with_timeout(
            self.runtime.as_ref(),
            self.config.confirmation_timeout,
            pending.confirmation,
        )
        .await
        .ok_or(Error::Timeout)??;

        let hash = if request.gas.is_manual() {
            MANUAL_GAS_PLACEHOLDER_HASH.to_string()
        } else {
            receipt
                .transaction_hash
                .or(submitted)
                .map(hex::encode_prefixed)
                .unwrap_or_else(|| MANUAL_GAS_PLACEHOLDER_HASH.to_string())
        };

        Ok((receipt.contract_address, hash))
    }

    /// Progress text, only while still deploying.
    fn progress(&self, message: &str) {
        self.store.update_if(|attempt| {
            if attempt.is_deploying() {
                attempt.message = message.to_string();
                true
            } else {
                false
            }
        });
    }
}
