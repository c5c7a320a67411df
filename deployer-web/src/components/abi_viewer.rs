//! Collapsible JSON ABI of the selected contract

use leptos::prelude::*;
use shared::ContractKey;

#[component]
pub fn AbiViewer(#[prop(into)] contract: Signal<ContractKey>) -> impl IntoView {
    let (open, set_open) = signal(false);

    let abi_text = move || {
        contract
            .get()
            .artifact()
            .abi_json()
            .unwrap_or_else(|e| format!("Failed to render ABI: {}", e))
    };

    view! {
        <div>
            <button class="btn btn-ghost" style="width: 100%; display: flex; justify-content: space-between;"
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                "View Contract ABI"
                <span>{move || if open.get() { "▲" } else { "▼" }}</span>
            </button>
            <Show when=move || open.get()>
                <pre class="code-block" style="margin-top: 8px; font-size: 0.75em; overflow-x: auto;">
                    {abi_text}
                </pre>
            </Show>
        </div>
    }
}
