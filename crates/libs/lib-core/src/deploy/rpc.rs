//! Contract creation through the wallet's own RPC.

use std::rc::Rc;
use std::time::Duration;

use alloy_consensus::TxReceipt;
use alloy_primitives::TxHash;
use futures::future::LocalBoxFuture;

use super::{ContractDeployer, DeploymentReceipt, DeploymentRequest, PendingDeployment};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::runtime::Runtime;
use crate::signer::{contract_creation, Signer};

/// `eth_sendTransaction` followed by `eth_getTransactionReceipt` polling.
pub struct ProviderDeployer {
    runtime: Rc<dyn Runtime>,
    poll_interval: Duration,
}

impl ProviderDeployer {
    pub fn new(runtime: Rc<dyn Runtime>, poll_interval: Duration) -> Self {
        Self { runtime, poll_interval }
    }

    pub fn from_config(runtime: Rc<dyn Runtime>, config: &Config) -> Self {
        Self::new(runtime, config.receipt_poll_interval)
    }
}

impl ContractDeployer for ProviderDeployer {
    fn deploy(&self, request: DeploymentRequest, signer: &Signer) -> LocalBoxFuture<'static, Result<PendingDeployment>> {
        let signer = signer.clone();
        let runtime = self.runtime.clone();
        let poll_interval = self.poll_interval;

        Box::pin(async move {
            let code = request.contract.creation_code().map_err(|e| {
                Error::Config(format!("invalid bytecode for {}: {}", request.contract.name, e))
            })?;
            let mut tx = contract_creation(signer.address(), code);
            request.gas.apply(&mut tx);

            let hash = signer.send_transaction(&tx).await?;
            let confirmation = wait_for_receipt(signer, runtime, hash, poll_interval);

            Ok::<_, Error>(PendingDeployment {
                transaction_hash: Some(hash),
                confirmation: Box::pin(confirmation),
            })
        })
    }
}

/// Poll until the receipt shows up. A failed lookup is retried on the next
/// tick; the caller bounds the whole wait.
async fn wait_for_receipt(
    signer: Signer,
    runtime: Rc<dyn Runtime>,
    hash: TxHash,
    poll_interval: Duration,
) -> Result<DeploymentReceipt> {
    loop {
        match signer.transaction_receipt(hash).await {
            Ok(Some(receipt)) => {
                if !receipt.inner.status() {
                    return Err(Error::Reverted(hash.to_string()));
                }
                let contract_address = receipt
                    .contract_address
                    .filter(|address| !address.is_zero())
                    .ok_or_else(|| {
                        Error::MalformedResponse(format!("receipt for {} has no contract address", hash))
                    })?;
                return Ok(DeploymentReceipt {
                    contract_address,
                    transaction_hash: Some(receipt.transaction_hash),
                });
            }
            Ok(None) => tracing::trace!(tx = %hash, "Receipt not available yet"),
            Err(err @ Error::MalformedResponse(_)) => return Err(err),
            Err(err) => tracing::warn!(tx = %hash, error = %err, "Receipt lookup failed, retrying"),
        }

        runtime.sleep(poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProviderError;
    use crate::gas::GasStrategy;
    use crate::provider::{methods, WalletKind};
    use crate::testing::{receipt_json, MockProvider, TokioRuntime};
    use alloy_primitives::{b256, Address};
    use serde_json::json;
    use shared::ContractKey;

    const FROM: Address = Address::repeat_byte(0x11);
    const CONTRACT: Address = Address::repeat_byte(0xc0);
    const HASH: TxHash = b256!("0x9c2f000000000000000000000000000000000000000000000000000000000001");

    fn request(gas: GasStrategy) -> DeploymentRequest {
        DeploymentRequest {
            contract: *ContractKey::Hello.artifact(),
            gas,
        }
    }

    fn setup() -> (Rc<MockProvider>, Signer, ProviderDeployer) {
        let provider = MockProvider::new();
        provider.respond(methods::SEND_TRANSACTION, Ok(json!(HASH)));
        let signer = Signer::new(FROM, WalletKind::Injected, provider.clone());
        let deployer = ProviderDeployer::new(Rc::new(TokioRuntime), Duration::from_secs(2));
        (provider, signer, deployer)
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_until_receipt() {
        let (provider, signer, deployer) = setup();
        provider.respond_once(methods::GET_TRANSACTION_RECEIPT, Ok(json!(null)));
        provider.respond_once(methods::GET_TRANSACTION_RECEIPT, Ok(json!(null)));
        provider.respond(
            methods::GET_TRANSACTION_RECEIPT,
            Ok(receipt_json(HASH, Some(CONTRACT), true)),
        );

        let pending = deployer.deploy(request(GasStrategy::Auto), &signer).await.unwrap();
        assert_eq!(pending.transaction_hash, Some(HASH));

        let receipt = pending.confirmation.await.unwrap();
        assert_eq!(receipt.contract_address, CONTRACT);
        assert_eq!(receipt.transaction_hash, Some(HASH));
        assert_eq!(provider.call_count(methods::GET_TRANSACTION_RECEIPT), 3);

        let sent = provider.calls_for(methods::SEND_TRANSACTION);
        assert_eq!(sent[0][0]["from"], "0x1111111111111111111111111111111111111111");
        assert_eq!(sent[0][0]["data"], ContractKey::Hello.artifact().bytecode);
        assert!(sent[0][0].get("gas").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_lookup_keeps_polling() {
        let (provider, signer, deployer) = setup();
        provider.respond_once(methods::GET_TRANSACTION_RECEIPT, Ok(json!(null)));
        provider.respond_once(
            methods::GET_TRANSACTION_RECEIPT,
            Err(Error::Provider(ProviderError::new(-32603, "network error: failed to fetch"))),
        );
        provider.respond(
            methods::GET_TRANSACTION_RECEIPT,
            Ok(receipt_json(HASH, Some(CONTRACT), true)),
        );

        let pending = deployer.deploy(request(GasStrategy::Auto), &signer).await.unwrap();
        let receipt = pending.confirmation.await.unwrap();

        assert_eq!(receipt.contract_address, CONTRACT);
        assert_eq!(provider.call_count(methods::GET_TRANSACTION_RECEIPT), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_manual_gas_is_sent() {
        let (provider, signer, deployer) = setup();

        deployer
            .deploy(request(GasStrategy::manual_default()), &signer)
            .await
            .unwrap();

        let sent = provider.calls_for(methods::SEND_TRANSACTION);
        assert_eq!(sent[0][0]["gas"], "0x30d40");
        assert_eq!(sent[0][0]["gasPrice"], "0x3b9aca00");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reverted_receipt_fails() {
        let (provider, signer, deployer) = setup();
        provider.respond(methods::GET_TRANSACTION_RECEIPT, Ok(receipt_json(HASH, None, false)));

        let pending = deployer.deploy(request(GasStrategy::Auto), &signer).await.unwrap();
        assert_eq!(pending.confirmation.await, Err(Error::Reverted(HASH.to_string())));
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_without_usable_contract_address_fails() {
        let mut empty = receipt_json(HASH, None, true);
        empty["contractAddress"] = json!("");
        let cases = [empty, receipt_json(HASH, None, true), receipt_json(HASH, Some(Address::ZERO), true)];

        for receipt in cases {
            let (provider, signer, deployer) = setup();
            provider.respond(methods::GET_TRANSACTION_RECEIPT, Ok(receipt.clone()));

            let pending = deployer.deploy(request(GasStrategy::Auto), &signer).await.unwrap();
            let result = pending.confirmation.await;
            assert!(matches!(result, Err(Error::MalformedResponse(_))), "{receipt}: {result:?}");
            assert_eq!(provider.call_count(methods::GET_TRANSACTION_RECEIPT), 1);
        }
    }
}
