//! Floating panel with the raw wallet state, for troubleshooting wallets

use leptos::prelude::*;

use crate::services::BrowserEnvironment;
use crate::state::use_app_context;

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn available(value: bool) -> &'static str {
    if value {
        "Available"
    } else {
        "None"
    }
}

#[component]
pub fn DebugPanel() -> impl IntoView {
    let ctx = use_app_context();
    let (open, set_open) = signal(false);
    let network = ctx.network();

    move || {
        if !open.get() {
            return view! {
                <button class="btn btn-outline btn-sm debug-toggle" on:click=move |_| set_open.set(true)>
                    "Debug Wallet"
                </button>
            }
            .into_any();
        }

        let network = network.clone();
        view! {
            <div class="card debug-panel">
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <h3 class="card-title">"Wallet Debug Panel"</h3>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| set_open.set(false)>"×"</button>
                </div>

                <dl class="debug-grid">
                    <dt>"Connection Status:"</dt>
                    <dd>{move || if ctx.is_connected() { "Connected" } else { "Disconnected" }}</dd>

                    <dt>"Network:"</dt>
                    <dd>
                        {move || match ctx.session.with(|s| s.chain_id) {
                            0 => "Unknown".to_string(),
                            id => format!("Chain ID: {}", id),
                        }}
                    </dd>

                    <dt>"Correct Network:"</dt>
                    <dd>{move || yes_no(ctx.is_correct_network())}</dd>

                    <dt>"Address:"</dt>
                    <dd style="font-family: monospace; font-size: 0.8em;">
                        {move || {
                            ctx.session
                                .with(|s| s.address.map(|address| address.to_checksum(None)))
                                .unwrap_or_else(|| "None".to_string())
                        }}
                    </dd>

                    <dt>"Provider:"</dt>
                    <dd>
                        {move || match ctx.provider_kind.get() {
                            Some(kind) => kind.name().to_string(),
                            None => available(false).to_string(),
                        }}
                    </dd>

                    <dt>"Signer:"</dt>
                    <dd>{move || available(ctx.has_signer())}</dd>

                    <dt>"Connecting:"</dt>
                    <dd>{move || yes_no(ctx.session.with(|s| s.connecting))}</dd>
                </dl>

                {move || {
                    ctx.session.with(|s| s.last_error.clone()).map(|error| {
                        view! {
                            <div class="alert alert-error">
                                <strong>"Error: "</strong>
                                {error}
                            </div>
                        }
                    })
                }}

                <button class="btn btn-outline btn-sm" style="width: 100%;"
                    on:click=move |_| BrowserEnvironment::log_window_state()
                >
                    "Check Window State"
                </button>

                <div style="font-size: 0.75em; color: var(--text-secondary); margin-top: 8px;">
                    <p>
                        <strong>"Expected Network: "</strong>
                        {format!("{} (Chain ID: {})", network.name, network.chain_id)}
                    </p>
                    <p>
                        <strong>"RPC URL: "</strong>
                        {network.rpc_url.clone()}
                    </p>
                </div>
            </div>
        }
        .into_any()
    }
}
