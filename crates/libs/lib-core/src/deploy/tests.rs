use super::*;
use crate::error::ProviderError;
use crate::gas::{AutoGas, VendorMarkerPolicy};
use crate::provider::WalletKind;
use crate::testing::{DeployOutcome, MockDeployer, MockEnvironment, MockProvider, TokioRuntime};
use alloy_primitives::{address, b256};
use shared::{ContractKey, DeploymentStatus};
use std::cell::{Cell, RefCell};
use std::time::Duration;
use tokio::task::LocalSet;

const FROM: Address = address!("0xabcdef0000000000000000000000000000000001");
const DEPLOYED: Address = address!("0x5fbdb2315678afecb367f032d93f642f64180aa3");
const TX: TxHash = b256!("0x9c2f000000000000000000000000000000000000000000000000000000000001");
const TX_HEX: &str = "0x9c2f000000000000000000000000000000000000000000000000000000000001";

fn confirmed() -> DeployOutcome {
    DeployOutcome::Confirm {
        address: DEPLOYED,
        hash: TX,
    }
}

fn orchestrator(deployer: &Rc<MockDeployer>, gas: Rc<dyn GasPolicy>) -> DeploymentOrchestrator {
    DeploymentOrchestrator::new(Config::default(), Rc::new(TokioRuntime), deployer.clone(), gas)
}

fn signer() -> Signer {
    Signer::new(FROM, WalletKind::Injected, MockProvider::new())
}

fn record_messages(orchestrator: &DeploymentOrchestrator) -> Rc<RefCell<Vec<String>>> {
    let messages = Rc::new(RefCell::new(Vec::new()));
    let sink = messages.clone();
    orchestrator.subscribe(move |attempt| sink.borrow_mut().push(attempt.message.clone()));
    messages
}

#[tokio::test]
async fn test_deploy_without_signer() {
    let deployer = MockDeployer::new(confirmed());
    let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));

    orchestrator.deploy(ContractKey::Counter.artifact(), None).await;

    let state = orchestrator.state();
    assert_eq!(state.status, DeploymentStatus::Error);
    assert_eq!(state.message, MSG_NOT_CONNECTED);
    assert_eq!(state.error.as_deref(), Some(DETAIL_NOT_CONNECTED));
    assert!(deployer.requests().is_empty());
}

#[tokio::test]
async fn test_deploy_success() {
    let deployer = MockDeployer::new(confirmed());
    let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));
    let messages = record_messages(&orchestrator);

    orchestrator
        .deploy(ContractKey::Storage.artifact(), Some(&signer()))
        .await;

    let state = orchestrator.state();
    assert_eq!(state.status, DeploymentStatus::Success);
    assert_eq!(state.deployed_address, Some(DEPLOYED));
    assert_eq!(state.transaction_hash, TX_HEX);
    assert!(state.error.is_none());

    assert_eq!(
        *messages.borrow(),
        vec![
            MSG_PREPARING.to_string(),
            MSG_DEPLOYING.to_string(),
            MSG_WAITING.to_string(),
            "Contract deployed successfully!".to_string(),
        ]
    );

    let requests = deployer.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].0.contract.key, ContractKey::Storage);
    assert_eq!(requests[0].0.gas, GasStrategy::Auto);
    assert_eq!(requests[0].1, FROM);
}

#[tokio::test]
async fn test_manual_gas_path_uses_placeholder_hash() {
    let env = Rc::new(MockEnvironment::new());
    env.set_marker(WalletKind::Okx, true);
    let deployer = MockDeployer::new(confirmed());
    let orchestrator = orchestrator(&deployer, Rc::new(VendorMarkerPolicy::okx(env)));
    let messages = record_messages(&orchestrator);

    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await;

    let state = orchestrator.state();
    assert_eq!(state.status, DeploymentStatus::Success);
    assert_eq!(state.transaction_hash, MANUAL_GAS_PLACEHOLDER_HASH);
    assert_eq!(messages.borrow()[1], MSG_MANUAL_GAS);
    assert_eq!(deployer.requests()[0].0.gas, GasStrategy::manual_default());
}

#[tokio::test(start_paused = true)]
async fn test_confirmation_timeout() {
    LocalSet::new()
        .run_until(async {
            let deployer = MockDeployer::new(DeployOutcome::NeverConfirm { hash: TX });
            let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));

            let task = {
                let orchestrator = orchestrator.clone();
                tokio::task::spawn_local(async move {
                    orchestrator.deploy(ContractKey::Hello.artifact(), Some(&signer())).await
                })
            };

            tokio::time::sleep(Duration::from_secs(59)).await;
            let state = orchestrator.state();
            assert!(state.is_deploying());
            assert_eq!(state.message, MSG_WAITING);

            task.await.unwrap();
            let state = orchestrator.state();
            assert_eq!(state.status, DeploymentStatus::Error);
            assert_eq!(state.message, classify::DEPLOY_TIMEOUT);
            assert_eq!(state.error, Some(Error::Timeout.to_string()));
            assert!(state.deployed_address.is_none() && state.transaction_hash.is_empty());
            assert_eq!(deployer.requests().len(), 1);
        })
        .await;
}

#[tokio::test]
async fn test_user_rejection_keeps_raw_detail() {
    let raw = "MetaMask Tx Signature: User denied transaction signature.";
    let deployer = MockDeployer::new(DeployOutcome::Reject(Error::Provider(ProviderError::new(4001, raw))));
    let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));

    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await;

    let state = orchestrator.state();
    assert_eq!(state.status, DeploymentStatus::Error);
    assert_eq!(state.message, classify::DEPLOY_REJECTED);
    assert_eq!(state.error.as_deref(), Some(raw));
}

#[tokio::test]
async fn test_confirmation_failure_is_classified() {
    let deployer = MockDeployer::new(DeployOutcome::FailConfirmation {
        hash: TX,
        error: Error::Provider(ProviderError::message("insufficient funds for gas * price + value")),
    });
    let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));

    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await;

    assert_eq!(
        orchestrator.state().message,
        "Insufficient funds for gas fees. Please ensure you have enough HLS tokens."
    );
}

#[tokio::test]
async fn test_reset_returns_exact_idle_defaults() {
    let deployer = MockDeployer::new(DeployOutcome::Reject(Error::Provider(ProviderError::message("nonce too low"))));
    let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));

    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await;
    assert_eq!(orchestrator.state().message, classify::DEPLOY_NONCE);

    orchestrator.reset();
    assert_eq!(orchestrator.state(), DeploymentAttempt::idle());
    assert_eq!(orchestrator.state().message, shared::READY_MESSAGE);
    assert_eq!(deployer.requests().len(), 1);
}

#[tokio::test]
async fn test_redeploy_after_error() {
    let deployer = MockDeployer::new(DeployOutcome::Reject(Error::MalformedResponse("bad".into())));
    let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));

    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await;
    assert_eq!(orchestrator.state().message, classify::DEPLOY_PARSE);

    deployer.set_outcome(confirmed());
    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await;
    let state = orchestrator.state();
    assert_eq!(state.status, DeploymentStatus::Success);
    assert!(state.error.is_none());
}

/// Whether `attempt` is a state the orchestrator may publish.
fn is_valid_attempt(attempt: &DeploymentAttempt) -> bool {
    match attempt.status {
        DeploymentStatus::Idle => *attempt == DeploymentAttempt::idle(),
        DeploymentStatus::Deploying => {
            attempt.deployed_address.is_none() && attempt.transaction_hash.is_empty() && attempt.error.is_none()
        }
        DeploymentStatus::Success => {
            attempt.deployed_address.is_some() && !attempt.transaction_hash.is_empty() && attempt.error.is_none()
        }
        DeploymentStatus::Error => {
            attempt.deployed_address.is_none() && attempt.transaction_hash.is_empty() && attempt.error.is_some()
        }
    }
}

fn count_invalid(orchestrator: &DeploymentOrchestrator) -> Rc<Cell<usize>> {
    let invalid = Rc::new(Cell::new(0));
    let sink = invalid.clone();
    orchestrator.subscribe(move |attempt| {
        if !is_valid_attempt(attempt) {
            sink.set(sink.get() + 1);
        }
    });
    invalid
}

fn confirm_after(secs: u64, address: Address, hash: TxHash) -> DeployOutcome {
    DeployOutcome::ConfirmAfter {
        delay: Duration::from_secs(secs),
        address,
        hash,
    }
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_deploys_last_write_wins() {
    LocalSet::new()
        .run_until(async {
            let first = Address::repeat_byte(0x01);
            let second = Address::repeat_byte(0x02);
            let deployer = MockDeployer::new(confirm_after(5, first, TxHash::repeat_byte(0x01)));
            let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));
            let invalid = count_invalid(&orchestrator);

            let slow = {
                let orchestrator = orchestrator.clone();
                tokio::task::spawn_local(async move {
                    orchestrator.deploy(ContractKey::Counter.artifact(), Some(&signer())).await
                })
            };
            tokio::task::yield_now().await;
            assert!(orchestrator.state().is_deploying());

            deployer.set_outcome(confirm_after(1, second, TxHash::repeat_byte(0x02)));
            let fast = {
                let orchestrator = orchestrator.clone();
                tokio::task::spawn_local(async move {
                    orchestrator.deploy(ContractKey::Storage.artifact(), Some(&signer())).await
                })
            };

            fast.await.unwrap();
            let state = orchestrator.state();
            assert_eq!(state.status, DeploymentStatus::Success);
            assert_eq!(state.deployed_address, Some(second));

            slow.await.unwrap();
            let state = orchestrator.state();
            assert_eq!(state.status, DeploymentStatus::Success);
            assert_eq!(state.deployed_address, Some(first));
            assert_eq!(state.transaction_hash, hex::encode_prefixed(TxHash::repeat_byte(0x01)));

            assert_eq!(deployer.requests().len(), 2);
            assert_eq!(invalid.get(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_reset_while_deploying() {
    LocalSet::new()
        .run_until(async {
            let deployer = MockDeployer::new(confirm_after(2, DEPLOYED, TX));
            let orchestrator = orchestrator(&deployer, Rc::new(AutoGas));
            let invalid = count_invalid(&orchestrator);
            let messages = record_messages(&orchestrator);

            let task = {
                let orchestrator = orchestrator.clone();
                tokio::task::spawn_local(async move {
                    orchestrator.deploy(ContractKey::Hello.artifact(), Some(&signer())).await
                })
            };
            tokio::time::sleep(Duration::from_secs(1)).await;
            assert_eq!(orchestrator.state().message, MSG_WAITING);

            orchestrator.reset();
            assert_eq!(orchestrator.state(), DeploymentAttempt::idle());

            task.await.unwrap();
            let state = orchestrator.state();
            assert_eq!(state.status, DeploymentStatus::Success);
            assert_eq!(state.deployed_address, Some(DEPLOYED));
            assert_eq!(state.transaction_hash, TX_HEX);

            assert_eq!(
                *messages.borrow(),
                vec![
                    MSG_PREPARING.to_string(),
                    MSG_DEPLOYING.to_string(),
                    MSG_WAITING.to_string(),
                    shared::READY_MESSAGE.to_string(),
                    "Contract deployed successfully!".to_string(),
                ]
            );
            assert_eq!(invalid.get(), 0);
        })
        .await;
}
