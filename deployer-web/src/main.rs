//! Helios Contract Deployer - browser front end
//!
//! Connects an injected EVM wallet and deploys one of the bundled contracts
//! through it. All wallet and deployment logic lives in `lib-core`; this crate
//! binds it to the page.

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

mod app;
mod components;
mod pages;
mod services;
mod state;

use app::App;

#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    wasm_logger::init(wasm_logger::Config::new(log_level()));

    if let Err(err) = lib_core::config::init_config() {
        log::error!("Invalid build configuration, using defaults: {}", err);
    }
    log::info!("Helios Contract Deployer starting...");

    hide_loading_screen();
    leptos::mount::mount_to_body(|| view! { <App/> });
}

fn log_level() -> log::Level {
    if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    }
}

/// Hide the static loading element shown until the wasm module starts.
fn hide_loading_screen() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::warn!("No document available");
        return;
    };

    if let Some(loading_element) = document.get_element_by_id("leptos-loading") {
        if let Err(e) = loading_element.set_attribute("style", "display: none !important;") {
            log::warn!("Failed to hide loading screen: {:?}", e);
        }
    }
}
