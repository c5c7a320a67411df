//! Connect button, network badge and connected-account controls

use leptos::prelude::*;

use crate::state::use_app_context;

/// Wallets offered in the connect dialog. They all go through the same
/// detected provider.
const WALLET_OPTIONS: &[(&str, &str, &str)] = &[
    ("M", "MetaMask", "#f97316"),
    ("R", "Rabby Wallet", "#3b82f6"),
    ("O", "OKX Wallet", "#a855f7"),
    ("B", "BitKeep", "#22c55e"),
];

#[component]
pub fn WalletConnector() -> impl IntoView {
    let ctx = use_app_context();
    let (dialog_open, set_dialog_open) = signal(false);

    // Close the dialog as soon as a connection lands.
    Effect::new(move || {
        if ctx.is_connected() {
            set_dialog_open.set(false);
        }
    });

    move || {
        if ctx.is_connected() {
            let network_name = ctx.network().name;
            view! {
                <div style="display: flex; align-items: center; gap: 16px;">
                    {move || {
                        if ctx.is_correct_network() {
                            view! { <span class="badge">{network_name.clone()}</span> }.into_any()
                        } else {
                            view! {
                                <span class="badge badge-error">"Wrong Network"</span>
                                <button class="btn btn-outline btn-sm" on:click=move |_| ctx.switch_network()>
                                    "Switch Network"
                                </button>
                            }
                            .into_any()
                        }
                    }}
                    <span style="font-family: monospace; font-size: 0.9em; color: var(--text-secondary);">
                        {move || ctx.session.with(|s| s.display_address())}
                    </span>
                    <button class="btn btn-outline btn-sm" on:click=move |_| {
                        ctx.disconnect();
                        set_dialog_open.set(false);
                    }>
                        "Disconnect"
                    </button>
                </div>
            }
            .into_any()
        } else {
            view! {
                <div>
                    <button class="btn" on:click=move |_| set_dialog_open.set(true)>
                        "Connect Wallet"
                    </button>
                    <Show when=move || dialog_open.get()>
                        <ConnectDialog on_close=move || set_dialog_open.set(false)/>
                    </Show>
                </div>
            }
            .into_any()
        }
    }
}

#[component]
fn ConnectDialog(on_close: impl Fn() + Send + Sync + Copy + 'static) -> impl IntoView {
    let ctx = use_app_context();
    let connecting = move || ctx.session.with(|s| s.connecting);

    view! {
        <div class="dialog-backdrop">
            <div class="card dialog">
                <div style="display: flex; justify-content: space-between; align-items: center;">
                    <h2 class="card-title">"Connect Your Wallet"</h2>
                    <button class="btn btn-ghost btn-sm" on:click=move |_| on_close()>"×"</button>
                </div>
                <p style="color: var(--text-secondary); margin-bottom: 16px;">
                    {format!("Choose your preferred wallet to connect to {}", ctx.network().name)}
                </p>

                {move || {
                    ctx.session.with(|s| s.last_error.clone()).map(|error| {
                        view! { <div class="alert alert-error">{error}</div> }
                    })
                }}

                <div style="display: flex; flex-direction: column; gap: 12px;">
                    {WALLET_OPTIONS
                        .iter()
                        .map(|(initial, name, color)| {
                            view! {
                                <button
                                    class="btn btn-outline wallet-option"
                                    disabled=connecting
                                    on:click=move |_| ctx.connect()
                                >
                                    <span class="wallet-icon" style=format!("background: {};", color)>{*initial}</span>
                                    <span>{*name}</span>
                                    <Show when=connecting>
                                        <span class="spinner"></span>
                                    </Show>
                                </button>
                            }
                        })
                        .collect_view()}
                </div>

                <div style="font-size: 0.8em; color: var(--text-secondary); text-align: center; margin-top: 16px;">
                    <p>"Don't have a wallet? Install one of the supported wallets above."</p>
                    <a href="https://metamask.io/download/" target="_blank" rel="noopener noreferrer">
                        "Learn more"
                    </a>
                </div>
            </div>
        </div>
    }
}
