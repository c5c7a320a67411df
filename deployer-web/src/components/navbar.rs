//! Header and footer

use leptos::prelude::*;
use leptos_router::components::A;

use super::WalletConnector;

#[component]
pub fn Navbar() -> impl IntoView {
    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <A href="/" attr:class="nav-link-clean">
                    <span class="nav-title">"Helios Contract Deployer"</span>
                </A>
                <WalletConnector/>
            </div>
        </nav>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer style="margin-top: auto; padding: 16px; text-align: center; border-top: 1px solid var(--border-color);">
            <p style="font-size: 0.9em; color: var(--text-secondary);">
                "Deploys pre-compiled contracts through your browser wallet"
            </p>
        </footer>
    }
}
