//! In-memory fakes for the wallet, the page and the deployer.
//!
//! Available to this crate's tests and, with the `testing` feature, to
//! downstream crates.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use alloy_primitives::{Address, Bloom, TxHash, B256};
use futures::future::{self, LocalBoxFuture};
use serde_json::{json, Value};

use crate::deploy::{ContractDeployer, DeploymentReceipt, DeploymentRequest, PendingDeployment};
use crate::error::{Error, ProviderError, Result};
use crate::provider::{
    EventHandler, Eip1193Provider, ListenerId, ProviderEvent, RequestFuture, WalletEnvironment, WalletKind,
};
use crate::runtime::Runtime;
use crate::signer::Signer;

/// Runs detached tasks on the current `LocalSet`.
pub struct TokioRuntime;

impl Runtime for TokioRuntime {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

#[derive(Clone)]
enum Response {
    Ready(Result<Value>),
    Delayed(Duration, Result<Value>),
    Never,
}

/// Scripted EIP-1193 provider.
///
/// Each method answers from its one-shot queue first, then from its standing
/// response. Unscripted methods fail with `-32601`.
#[derive(Default)]
pub struct MockProvider {
    once: RefCell<HashMap<String, VecDeque<Response>>>,
    standing: RefCell<HashMap<String, Response>>,
    calls: RefCell<Vec<(String, Value)>>,
    listeners: RefCell<Vec<(ProviderEvent, ListenerId, EventHandler)>>,
    next_listener: Cell<u64>,
}

impl MockProvider {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Provider for an already authorized account on `chain_id`.
    pub fn connected(address: &str, chain_id: u64) -> Rc<Self> {
        let provider = Self::new();
        let accounts = json!([address]);
        provider.respond(crate::provider::methods::REQUEST_ACCOUNTS, Ok(accounts.clone()));
        provider.respond(crate::provider::methods::ACCOUNTS, Ok(accounts));
        provider.respond(
            crate::provider::methods::CHAIN_ID,
            Ok(Value::String(format!("0x{:x}", chain_id))),
        );
        provider
    }

    pub fn respond(&self, method: &str, result: Result<Value>) {
        self.standing
            .borrow_mut()
            .insert(method.to_string(), Response::Ready(result));
    }

    pub fn respond_once(&self, method: &str, result: Result<Value>) {
        self.push_once(method, Response::Ready(result));
    }

    pub fn respond_after(&self, method: &str, delay: Duration, result: Result<Value>) {
        self.push_once(method, Response::Delayed(delay, result));
    }

    /// Every future call to `method` stays pending.
    pub fn hang(&self, method: &str) {
        self.standing.borrow_mut().insert(method.to_string(), Response::Never);
    }

    fn push_once(&self, method: &str, response: Response) {
        self.once
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.borrow().clone()
    }

    pub fn calls_for(&self, method: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }

    pub fn listener_count(&self, event: ProviderEvent) -> usize {
        self.listeners.borrow().iter().filter(|(e, _, _)| *e == event).count()
    }

    /// Fire `event` at every registered handler.
    pub fn emit(&self, event: ProviderEvent, payload: Value) {
        let handlers: Vec<EventHandler> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .map(|(_, _, h)| h.clone())
            .collect();
        for handler in handlers {
            handler(&payload);
        }
    }
}

impl Eip1193Provider for MockProvider {
    fn request(&self, method: &str, params: Value) -> RequestFuture {
        self.calls.borrow_mut().push((method.to_string(), params));

        let queued = self
            .once
            .borrow_mut()
            .get_mut(method)
            .and_then(|queue| queue.pop_front());
        let response = queued
            .or_else(|| self.standing.borrow().get(method).cloned())
            .unwrap_or_else(|| {
                Response::Ready(Err(Error::Provider(ProviderError::new(
                    -32601,
                    format!("The method {} does not exist", method),
                ))))
            });

        match response {
            Response::Ready(result) => Box::pin(future::ready(result)),
            Response::Delayed(delay, result) => Box::pin(async move {
                tokio::time::sleep(delay).await;
                result
            }),
            Response::Never => Box::pin(future::pending::<Result<Value>>()),
        }
    }

    fn on(&self, event: ProviderEvent, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((event, id, handler));
        id
    }

    fn off(&self, event: ProviderEvent, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(e, listener, _)| !(*e == event && *listener == id));
    }
}

/// Page with scripted wallet globals.
#[derive(Default)]
pub struct MockEnvironment {
    providers: RefCell<HashMap<WalletKind, Rc<dyn Eip1193Provider>>>,
    markers: RefCell<HashSet<WalletKind>>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&self, kind: WalletKind, provider: Rc<MockProvider>) {
        self.providers.borrow_mut().insert(kind, provider);
    }

    pub fn set_marker(&self, kind: WalletKind, present: bool) {
        let mut markers = self.markers.borrow_mut();
        if present {
            markers.insert(kind);
        } else {
            markers.remove(&kind);
        }
    }
}

impl WalletEnvironment for MockEnvironment {
    fn provider(&self, kind: WalletKind) -> Option<Rc<dyn Eip1193Provider>> {
        self.providers.borrow().get(&kind).cloned()
    }

    fn has_marker(&self, kind: WalletKind) -> bool {
        self.markers.borrow().contains(&kind) || self.providers.borrow().contains_key(&kind)
    }
}

/// A mined `eth_getTransactionReceipt` result, as a legacy transaction.
pub fn receipt_json(hash: TxHash, contract_address: Option<Address>, success: bool) -> Value {
    let status = if success { "0x1" } else { "0x0" };
    json!({
        "type": "0x0",
        "status": status,
        "cumulativeGasUsed": "0x1d4c0",
        "logs": [],
        "logsBloom": Bloom::ZERO,
        "transactionHash": hash,
        "transactionIndex": "0x0",
        "blockHash": B256::repeat_byte(0xbb),
        "blockNumber": "0x10",
        "gasUsed": "0x1d4c0",
        "effectiveGasPrice": "0x3b9aca00",
        "from": Address::repeat_byte(0x11),
        "to": null,
        "contractAddress": contract_address,
    })
}

/// How [`MockDeployer`] answers.
#[derive(Clone, Debug)]
pub enum DeployOutcome {
    /// Submitted, then mined at `address`.
    Confirm { address: Address, hash: TxHash },
    /// Submitted, then mined after `delay`.
    ConfirmAfter {
        delay: Duration,
        address: Address,
        hash: TxHash,
    },
    /// The wallet refused the submission.
    Reject(Error),
    /// Submitted, then the confirmation failed.
    FailConfirmation { hash: TxHash, error: Error },
    /// Submitted, never mined.
    NeverConfirm { hash: TxHash },
}

pub struct MockDeployer {
    outcome: RefCell<DeployOutcome>,
    requests: RefCell<Vec<(DeploymentRequest, Address)>>,
}

impl MockDeployer {
    pub fn new(outcome: DeployOutcome) -> Rc<Self> {
        Rc::new(Self {
            outcome: RefCell::new(outcome),
            requests: RefCell::new(Vec::new()),
        })
    }

    pub fn set_outcome(&self, outcome: DeployOutcome) {
        *self.outcome.borrow_mut() = outcome;
    }

    /// Requests received, with the signer address each was sent from.
    pub fn requests(&self) -> Vec<(DeploymentRequest, Address)> {
        self.requests.borrow().clone()
    }
}

impl ContractDeployer for MockDeployer {
    fn deploy(&self, request: DeploymentRequest, signer: &Signer) -> LocalBoxFuture<'static, Result<PendingDeployment>> {
        self.requests
            .borrow_mut()
            .push((request, signer.address()));

        let pending = match self.outcome.borrow().clone() {
            DeployOutcome::Confirm { address, hash } => Ok(PendingDeployment {
                transaction_hash: Some(hash),
                confirmation: Box::pin(future::ready(Ok::<_, Error>(DeploymentReceipt {
                    contract_address: address,
                    transaction_hash: Some(hash),
                }))),
            }),
            DeployOutcome::ConfirmAfter { delay, address, hash } => Ok(PendingDeployment {
                transaction_hash: Some(hash),
                confirmation: Box::pin(async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, Error>(DeploymentReceipt {
                        contract_address: address,
                        transaction_hash: Some(hash),
                    })
                }),
            }),
            DeployOutcome::Reject(err) => Err(err),
            DeployOutcome::FailConfirmation { hash, error } => Ok(PendingDeployment {
                transaction_hash: Some(hash),
                confirmation: Box::pin(future::ready(Err::<DeploymentReceipt, _>(error))),
            }),
            DeployOutcome::NeverConfirm { hash } => Ok(PendingDeployment {
                transaction_hash: Some(hash),
                confirmation: Box::pin(future::pending::<Result<DeploymentReceipt>>()),
            }),
        };
        Box::pin(future::ready(pending))
    }
}
