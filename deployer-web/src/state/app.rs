//! Global app context: core managers plus the signals the views read.
//!
//! The core publishes every state change through its stores; each store has
//! one subscriber here that copies the snapshot into a signal. Views never
//! touch the managers directly.

use std::rc::Rc;

use leptos::prelude::*;
use lib_core::config::core_config;
use lib_core::{
    DeploymentOrchestrator, ProviderDeployer, Runtime, VendorMarkerPolicy, WalletKind, WalletSessionManager,
};
use shared::{ContractKey, DeploymentAttempt, NetworkConfig, WalletSession};

use crate::services::{BrowserEnvironment, BrowserRuntime};

struct Services {
    wallet: WalletSessionManager,
    deployer: DeploymentOrchestrator,
}

#[derive(Clone, Copy)]
pub struct AppContext {
    pub session: RwSignal<WalletSession>,
    pub deployment: RwSignal<DeploymentAttempt>,
    pub selected: RwSignal<ContractKey>,
    pub provider_kind: RwSignal<Option<WalletKind>>,
    services: StoredValue<Services, LocalStorage>,
}

impl AppContext {
    pub fn new() -> Self {
        let config = core_config().clone();
        let runtime: Rc<dyn Runtime> = Rc::new(BrowserRuntime);
        let env = Rc::new(BrowserEnvironment);

        let wallet = WalletSessionManager::new(config.clone(), runtime.clone());
        let deployer = DeploymentOrchestrator::new(
            config.clone(),
            runtime.clone(),
            Rc::new(ProviderDeployer::from_config(runtime, &config)),
            Rc::new(VendorMarkerPolicy::okx(env.clone())),
        );

        let session = RwSignal::new(wallet.session());
        let deployment = RwSignal::new(deployer.state());
        wallet.subscribe(move |snapshot| session.set(snapshot.clone()));
        deployer.subscribe(move |snapshot| deployment.set(snapshot.clone()));

        let provider_kind = RwSignal::new(wallet.detect_provider(env.as_ref()));

        Self {
            session,
            deployment,
            selected: RwSignal::new(ContractKey::default()),
            provider_kind,
            services: StoredValue::new_local(Services { wallet, deployer }),
        }
    }

    fn wallet(&self) -> WalletSessionManager {
        self.services.with_value(|s| s.wallet.clone())
    }

    fn orchestrator(&self) -> DeploymentOrchestrator {
        self.services.with_value(|s| s.deployer.clone())
    }

    pub fn network(&self) -> NetworkConfig {
        core_config().network.clone()
    }

    // -- derived

    pub fn is_connected(&self) -> bool {
        self.session.with(|s| s.connected)
    }

    pub fn is_correct_network(&self) -> bool {
        let expected = core_config().network.chain_id;
        self.session.with(|s| s.is_correct_network(expected))
    }

    pub fn has_signer(&self) -> bool {
        // Read the signal so callers re-run when the session changes.
        self.session.track();
        self.wallet().signer().is_some()
    }

    pub fn can_deploy(&self) -> bool {
        self.is_connected() && self.is_correct_network() && !self.deployment.with(|d| d.is_deploying())
    }

    // -- wallet

    /// Silent reconnect for wallets that already granted access.
    pub fn restore(&self) {
        let wallet = self.wallet();
        leptos::task::spawn_local(async move { wallet.restore().await });
    }

    pub fn connect(&self) {
        let wallet = self.wallet();
        leptos::task::spawn_local(async move {
            if let Err(err) = wallet.connect().await {
                log::debug!("connect() ended with: {}", err);
            }
        });
    }

    pub fn disconnect(&self) {
        self.wallet().disconnect();
    }

    pub fn switch_network(&self) {
        let wallet = self.wallet();
        leptos::task::spawn_local(async move { wallet.switch_network().await });
    }

    pub fn teardown(&self) {
        if let Some(wallet) = self.services.try_with_value(|s| s.wallet.clone()) {
            wallet.teardown();
        }
    }

    // -- deployment

    pub fn select_contract(&self, key: &str) {
        match key.parse::<ContractKey>() {
            Ok(key) => self.selected.set(key),
            Err(err) => log::warn!("{}", err),
        }
    }

    pub fn deploy(&self) {
        if !self.can_deploy() {
            log::info!(
                "Deploy blocked: connected={}, correct_network={}",
                self.is_connected(),
                self.is_correct_network()
            );
            return;
        }

        let contract = self.selected.get_untracked().artifact();
        let signer = self.wallet().signer();
        let orchestrator = self.orchestrator();
        leptos::task::spawn_local(async move {
            orchestrator.deploy(contract, signer.as_ref()).await;
        });
    }

    pub fn reset_deployment(&self) {
        self.orchestrator().reset();
    }
}

pub fn provide_app_context() -> AppContext {
    let context = AppContext::new();
    provide_context(context);
    context
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
