//! Deploy Page - contract selection, deploy button and deployment result

use leptos::prelude::*;
use shared::{ContractKey, DeploymentStatus, CATALOG};

use crate::components::AbiViewer;
use crate::state::use_app_context;

fn status_class(status: DeploymentStatus) -> &'static str {
    match status {
        DeploymentStatus::Idle => "alert",
        DeploymentStatus::Deploying => "alert alert-info",
        DeploymentStatus::Success => "alert alert-success",
        DeploymentStatus::Error => "alert alert-error",
    }
}

#[component]
pub fn DeployPage() -> impl IntoView {
    let ctx = use_app_context();
    let network = ctx.network();

    let status = move || ctx.deployment.with(|d| d.status);
    let deploying = move || status() == DeploymentStatus::Deploying;

    view! {
        <main style="max-width: 720px; margin: 0 auto; padding: 32px 16px; display: flex; flex-direction: column; gap: 24px;">
            // Deployment status
            <div class=move || status_class(status())>
                <Show when=deploying>
                    <span class="spinner"></span>
                </Show>
                {move || ctx.deployment.with(|d| d.message.clone())}
            </div>

            // Wallet error
            {move || {
                ctx.session.with(|s| s.last_error.clone()).map(|error| {
                    view! { <div class="alert alert-error">{error}</div> }
                })
            }}

            // Deployment error with technical details
            {move || {
                ctx.deployment.with(|d| d.error.clone().map(|details| (d.message.clone(), details))).map(
                    |(message, details)| {
                        view! {
                            <div class="alert alert-error">
                                <p>{message}</p>
                                <details style="font-size: 0.8em;">
                                    <summary style="cursor: pointer;">"Technical Details"</summary>
                                    <code class="code-block" style="display: block; margin-top: 8px; word-break: break-all;">
                                        {details}
                                    </code>
                                </details>
                            </div>
                        }
                    },
                )
            }}

            // Wrong network warning
            <Show when=move || ctx.is_connected() && !ctx.is_correct_network()>
                <div class="alert alert-error">
                    {format!(
                        "Please switch to {} (Chain ID: {}) to deploy contracts.",
                        network.name, network.chain_id
                    )}
                </div>
            </Show>

            <ContractSelection/>

            <div class="card">
                <h2 class="card-title">"Deploy Contract"</h2>
                <p class="card-description">
                    {format!("Deploy your selected contract to the {}", ctx.network().name)}
                </p>
                <button
                    class="btn btn-lg"
                    style="width: 100%;"
                    disabled=move || !ctx.can_deploy()
                    on:click=move |_| ctx.deploy()
                >
                    {move || if deploying() { "Deploying..." } else { "Deploy Contract" }}
                </button>
            </div>

            <Show when=move || {
                status() == DeploymentStatus::Success && ctx.deployment.with(|d| d.deployed_address.is_some())
            }>
                <DeploymentResult/>
            </Show>
        </main>
    }
}

#[component]
fn ContractSelection() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="card">
            <h2 class="card-title">"Contract Selection"</h2>
            <p class="card-description">
                {format!("Choose a pre-defined contract to deploy to {}", ctx.network().name)}
            </p>

            <label class="form-label" for="contract-type">"Contract Type"</label>
            <select
                id="contract-type"
                class="form-select"
                prop:value=move || ctx.selected.get().as_str()
                on:change=move |ev| ctx.select_contract(&event_target_value(&ev))
            >
                {CATALOG
                    .iter()
                    .map(|artifact| {
                        let key: ContractKey = artifact.key;
                        view! {
                            <option value=key.as_str() selected=move || ctx.selected.get() == key>
                                {artifact.name}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>

            <div class="contract-info">
                <h4>{move || ctx.selected.get().artifact().name}</h4>
                <p>{move || ctx.selected.get().artifact().description}</p>
            </div>
        </div>
    }
}

#[component]
fn DeploymentResult() -> impl IntoView {
    let ctx = use_app_context();
    let network = StoredValue::new(ctx.network());

    view! {
        <div class="card card-success">
            <h2 class="card-title">"Deployment Successful!"</h2>

            <div>
                <label class="form-label">"Contract Address"</label>
                {move || {
                    let address = ctx
                        .deployment
                        .with(|d| d.deployed_address.map(|address| address.to_checksum(None)))
                        .unwrap_or_default();
                    let href = network.with_value(|n| n.address_url(&address));
                    view! {
                        <div class="result-row">
                            <code class="code-block">{address}</code>
                            <a class="btn btn-outline btn-sm" href=href target="_blank" rel="noopener noreferrer">
                                "Explorer"
                            </a>
                        </div>
                    }
                }}
            </div>

            {move || {
                let hash = ctx.deployment.with(|d| d.transaction_hash.clone());
                (!hash.is_empty()).then(|| {
                    let href = network.with_value(|n| n.tx_url(&hash));
                    view! {
                        <div>
                            <label class="form-label">"Transaction Hash"</label>
                            <div class="result-row">
                                <code class="code-block">{hash}</code>
                                <a class="btn btn-outline btn-sm" href=href target="_blank" rel="noopener noreferrer">
                                    "View"
                                </a>
                            </div>
                        </div>
                    }
                })
            }}

            <AbiViewer contract=ctx.selected/>

            <button class="btn btn-outline" style="width: 100%;" on:click=move |_| ctx.reset_deployment()>
                "Deploy Another Contract"
            </button>
        </div>
    }
}
