//! Wallet globals on `window`.

use std::rc::Rc;

use js_sys::Reflect;
use lib_core::{Eip1193Provider, WalletEnvironment, WalletKind};
use wasm_bindgen::JsValue;

use super::provider::JsProvider;

pub struct BrowserEnvironment;

impl BrowserEnvironment {
    fn lookup(path: &[&str]) -> Option<JsValue> {
        let window = web_sys::window()?;
        let mut current: JsValue = window.into();
        for key in path {
            let next = Reflect::get(&current, &JsValue::from_str(key)).ok()?;
            if next.is_undefined() || next.is_null() {
                return None;
            }
            current = next;
        }
        Some(current)
    }

    /// Dump every known wallet global to the console.
    pub fn log_window_state() {
        log::info!("=== WALLET DEBUG INFO ===");
        for kind in WalletKind::DETECTION_ORDER {
            let path = kind.global_path().join(".");
            match Self::lookup(kind.global_path()) {
                Some(value) => {
                    log::info!("window.{}: present", path);
                    web_sys::console::log_2(&JsValue::from_str(&format!("window.{}:", path)), &value);
                }
                None => log::info!("window.{}: undefined", path),
            }
        }
        log::info!("=== END DEBUG INFO ===");
    }
}

impl WalletEnvironment for BrowserEnvironment {
    fn provider(&self, kind: WalletKind) -> Option<Rc<dyn Eip1193Provider>> {
        Self::lookup(kind.global_path()).map(|target| Rc::new(JsProvider::new(target)) as Rc<dyn Eip1193Provider>)
    }

    fn has_marker(&self, kind: WalletKind) -> bool {
        kind.global_path()
            .first()
            .is_some_and(|root| Self::lookup(&[*root]).is_some())
    }
}
