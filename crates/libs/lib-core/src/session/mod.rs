//! # Wallet Session Manager
//!
//! Owns the detected provider, its event subscriptions and the
//! [`WalletSession`] store. Every public operation recovers its own errors:
//! failures land in `last_error` and never escape as a broken session.
//!
//! ## Flow
//!
//! ```text
//! detect_provider ──► restore (eth_accounts, silent)
//!        │
//!        └─► connect ──► eth_requestAccounts ──► eth_chainId ──► connected
//!                                                     │
//!                                    wrong chain ──► (1 s) switch_network
//! ```
//!
//! Provider events are wired with `Weak` references, so the manager can be
//! dropped while the wallet still holds the callbacks.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use alloy_primitives::Address;
use serde_json::{json, Value};
use shared::WalletSession;

use crate::classify;
use crate::config::Config;
use crate::error::{Error, ProviderError, Result};
use crate::provider::{
    self, methods, parse_accounts, parse_chain_id, request_typed, AddEthereumChainParameter,
    DetectedProvider, EventHandler, ListenerId, ProviderEvent, SwitchEthereumChainParameter,
    WalletEnvironment, WalletKind,
};
use crate::runtime::Runtime;
use crate::signer::Signer;
use crate::store::{Store, SubscriptionId};
use crate::verify;


#[derive(Clone)]
pub struct WalletSessionManager {
    inner: Rc<Inner>,
}

struct Inner {
    config: Config,
    runtime: Rc<dyn Runtime>,
    store: Store<WalletSession>,
    provider: RefCell<Option<DetectedProvider>>,
    signer: RefCell<Option<Signer>>,
    listeners: RefCell<Vec<(ProviderEvent, ListenerId)>>,
}

impl WalletSessionManager {
    pub fn new(config: Config, runtime: Rc<dyn Runtime>) -> Self {
        let expected_chain = config.network.chain_id;
        let store = Store::new(WalletSession::default());
        store.subscribe(move |session: &WalletSession| {
            tracing::debug!(
                address = ?session.address,
                chain_id = session.chain_id,
                connected = session.connected,
                connecting = session.connecting,
                error = ?session.last_error,
                is_correct_network = session.is_correct_network(expected_chain),
                "Wallet state changed"
            );
        });

        Self {
            inner: Rc::new(Inner {
                config,
                runtime,
                store,
                provider: RefCell::new(None),
                signer: RefCell::new(None),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    // -- accessors

    pub fn session(&self) -> WalletSession {
        self.inner.store.get()
    }

    pub fn store(&self) -> &Store<WalletSession> {
        &self.inner.store
    }

    pub fn subscribe(&self, f: impl Fn(&WalletSession) + 'static) -> SubscriptionId {
        self.inner.store.subscribe(f)
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Signing handle for the connected account.
    pub fn signer(&self) -> Option<Signer> {
        self.inner.signer.borrow().clone()
    }

    pub fn provider_kind(&self) -> Option<WalletKind> {
        self.inner.provider.borrow().as_ref().map(|p| p.kind)
    }

    pub fn has_provider(&self) -> bool {
        self.inner.provider.borrow().is_some()
    }

    pub fn is_correct_network(&self) -> bool {
        self.inner
            .store
            .with(|s| s.is_correct_network(self.inner.config.network.chain_id))
    }

    // -- provider wiring

    /// Pick the first injected wallet and attach to it. Finding none is
    /// recorded in `last_error`.
    pub fn detect_provider(&self, env: &dyn WalletEnvironment) -> Option<WalletKind> {
        match provider::detect_provider(env) {
            Some(detected) => {
                let kind = detected.kind;
                self.set_provider(detected);
                Some(kind)
            }
            None => {
                tracing::warn!("No injected wallet provider found");
                self.inner
                    .store
                    .update(|s| s.last_error = Some(classify::NO_WALLET.to_string()));
                None
            }
        }
    }

    /// Replace the provider. Listeners move to the new one, and a session
    /// bound to the old provider is reset.
    pub fn set_provider(&self, detected: DetectedProvider) {
        let inner = &self.inner;
        inner.detach_listeners();

        if inner.store.with(|s| s.connected) {
            inner.reset();
        }

        tracing::info!("Using wallet provider: {}", detected.kind.name());
        *inner.provider.borrow_mut() = Some(detected);
        self.attach_listeners();
    }

    /// Detach from the provider's events. The session itself is kept.
    pub fn teardown(&self) {
        self.inner.detach_listeners();
    }

    fn attach_listeners(&self) {
        let Some(detected) = self.inner.current_provider() else {
            return;
        };

        let mut registered = Vec::with_capacity(ProviderEvent::ALL.len());
        for event in ProviderEvent::ALL {
            let weak: Weak<Inner> = Rc::downgrade(&self.inner);
            let handler: EventHandler = Rc::new(move |payload: &Value| {
                if let Some(inner) = weak.upgrade() {
                    inner.handle_event(event, payload);
                }
            });
            registered.push((event, detected.provider.on(event, handler)));
        }
        *self.inner.listeners.borrow_mut() = registered;
    }

    // -- operations

    /// Interactive connection request.
    pub async fn connect(&self) -> Result<()> {
        let inner = &self.inner;
        let Some(detected) = inner.current_provider() else {
            inner.store.update(|s| {
                s.connecting = false;
                s.last_error = Some(classify::NO_WALLET.to_string());
            });
            return Err(Error::NoProvider);
        };

        inner.store.update(|s| {
            s.connecting = true;
            s.last_error = None;
        });

        let result = async {
            let accounts: Vec<Address> =
                request_typed(detected.provider.as_ref(), methods::REQUEST_ACCOUNTS, Value::Null).await?;
            let address = *accounts.first().ok_or(Error::NoAccounts)?;
            let chain_id = query_chain_id(&detected).await?;
            Ok::<_, Error>((address, chain_id))
        }
        .await;

        match result {
            Ok((address, chain_id)) => {
                inner.establish(&detected, address, chain_id);
                tracing::info!(%address, chain_id, "Wallet connected");

                if chain_id != inner.config.network.chain_id {
                    self.schedule_network_switch();
                }
                if inner.config.verify_signature_on_connect {
                    self.spawn_verification();
                }
                Ok(())
            }
            Err(err) => {
                let message = classify::connect_error_message(&err);
                tracing::warn!(error = %err, "Wallet connection failed: {}", message);
                inner.store.update(|s| {
                    s.connecting = false;
                    s.last_error = Some(message.to_string());
                });
                Err(err)
            }
        }
    }

    /// Local-only reset; the wallet keeps its permission grant.
    pub fn disconnect(&self) {
        tracing::info!("Wallet disconnected");
        self.inner.reset();
    }

    /// Ask the wallet to move to the configured chain, adding it first if the
    /// wallet does not know it.
    pub async fn switch_network(&self) {
        let inner = &self.inner;
        let Some(detected) = inner.current_provider() else {
            return;
        };
        let network = &inner.config.network;

        let switch = json!([SwitchEthereumChainParameter::from(network)]);
        let failure = match detected.provider.request(methods::SWITCH_CHAIN, switch).await {
            Ok(_) => None,
            Err(err) if err.code() == Some(ProviderError::UNRECOGNIZED_CHAIN) => {
                tracing::info!("Chain {} unknown to wallet, adding it", network.chain_id_hex());
                let add = json!([AddEthereumChainParameter::from(network)]);
                match detected.provider.request(methods::ADD_CHAIN, add).await {
                    Ok(_) => None,
                    Err(err) => {
                        tracing::warn!(error = %err, "Failed to add network");
                        Some(classify::ADD_NETWORK_FAILED)
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to switch network");
                Some(classify::SWITCH_FAILED)
            }
        };

        match failure {
            Some(message) => inner.store.update(|s| s.last_error = Some(message.to_string())),
            None => {
                inner.refresh_chain_id(&detected).await;
                inner.store.update_if(|s| s.last_error.take().is_some());
            }
        }
    }

    /// Silent reconnection on page load, without prompting the user.
    pub async fn restore(&self) {
        let inner = &self.inner;
        let Some(detected) = inner.current_provider() else {
            return;
        };

        let result = async {
            let accounts: Vec<Address> =
                request_typed(detected.provider.as_ref(), methods::ACCOUNTS, Value::Null).await?;
            let Some(address) = accounts.first().copied() else {
                return Ok(None);
            };
            let chain_id = query_chain_id(&detected).await?;
            Ok::<_, Error>(Some((address, chain_id)))
        }
        .await;

        match result {
            Ok(Some((address, chain_id))) => {
                inner.establish(&detected, address, chain_id);
                tracing::info!(%address, chain_id, "Restored existing wallet connection");
            }
            Ok(None) => tracing::debug!("No previously authorized accounts"),
            Err(err) => tracing::debug!(error = %err, "Could not check existing connection"),
        }
    }

    fn schedule_network_switch(&self) {
        let weak = Rc::downgrade(&self.inner);
        let delay = self.inner.runtime.sleep(self.inner.config.network_switch_delay);
        self.inner.runtime.spawn(Box::pin(async move {
            delay.await;
            if let Some(inner) = weak.upgrade() {
                WalletSessionManager { inner }.switch_network().await;
            }
        }));
    }

    fn spawn_verification(&self) {
        let Some(signer) = self.signer() else {
            return;
        };
        let app_name = self.inner.config.app_name.clone();
        self.inner.runtime.spawn(Box::pin(async move {
            if let Err(err) = verify::request_signature(&signer, &app_name).await {
                tracing::warn!(error = %err, "Signature verification declined or failed");
            }
        }));
    }
}

impl Inner {
    fn current_provider(&self) -> Option<DetectedProvider> {
        self.provider.borrow().clone()
    }

    fn establish(&self, detected: &DetectedProvider, address: Address, chain_id: u64) {
        *self.signer.borrow_mut() = Some(Signer::new(address, detected.kind, detected.provider.clone()));
        self.store.update(|s| {
            s.address = Some(address);
            s.chain_id = chain_id;
            s.connected = true;
            s.connecting = false;
            s.last_error = None;
        });
    }

    fn reset(&self) {
        self.signer.borrow_mut().take();
        self.store.set(WalletSession::default());
    }

    async fn refresh_chain_id(&self, detected: &DetectedProvider) {
        match query_chain_id(detected).await {
            Ok(chain_id) => {
                self.store.update_if(|s| {
                    let changed = s.chain_id != chain_id;
                    s.chain_id = chain_id;
                    changed
                });
            }
            Err(err) => tracing::debug!(error = %err, "Could not re-read chain id"),
        }
    }

    fn handle_event(&self, event: ProviderEvent, payload: &Value) {
        tracing::debug!(%event, %payload, "Provider event");
        match event {
            ProviderEvent::AccountsChanged => {
                let accounts = parse_accounts(payload);
                match accounts.first() {
                    None => self.reset(),
                    Some(account) => self.change_account(*account),
                }
            }
            ProviderEvent::ChainChanged => {
                if let Some(chain_id) = parse_chain_id(payload) {
                    self.store.update_if(|s| {
                        let changed = s.chain_id != chain_id;
                        s.chain_id = chain_id;
                        changed
                    });
                }
            }
            ProviderEvent::Disconnect => self.reset(),
        }
    }

    /// Only an existing connection follows the wallet's active account.
    fn change_account(&self, account: Address) {
        if !self.store.with(|s| s.connected) {
            return;
        }
        let Some(detected) = self.current_provider() else {
            return;
        };

        *self.signer.borrow_mut() = Some(Signer::new(account, detected.kind, detected.provider.clone()));
        self.store.update_if(|s| s.address.replace(account) != Some(account));
    }

    fn detach_listeners(&self) {
        let listeners = std::mem::take(&mut *self.listeners.borrow_mut());
        if listeners.is_empty() {
            return;
        }
        if let Some(detected) = self.provider.borrow().as_ref() {
            for (event, id) in listeners {
                detected.provider.off(event, id);
            }
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.detach_listeners();
    }
}

async fn query_chain_id(detected: &DetectedProvider) -> Result<u64> {
    let value = detected.provider.request(methods::CHAIN_ID, Value::Null).await?;
    parse_chain_id(&value)
        .ok_or_else(|| Error::MalformedResponse(format!("eth_chainId returned {}", value)))
}
