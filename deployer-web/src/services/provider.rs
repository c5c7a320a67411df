//! EIP-1193 provider backed by an injected JavaScript object.
//!
//! Requests go through `provider.request({ method, params })`. Event
//! callbacks are wrapped in [`Closure`]s that stay alive in this struct until
//! `off` (or drop) removes them from the page object.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use js_sys::{Function, Object, Promise, Reflect};
use lib_core::provider::{EventHandler, ListenerId, ProviderEvent, RequestFuture};
use lib_core::{Eip1193Provider, Error, ProviderError};
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

type Listener = Closure<dyn Fn(JsValue)>;

pub struct JsProvider {
    target: JsValue,
    listeners: RefCell<HashMap<ListenerId, (ProviderEvent, Listener)>>,
    next_id: Cell<u64>,
}

impl JsProvider {
    pub fn new(target: JsValue) -> Self {
        Self {
            target,
            listeners: RefCell::new(HashMap::new()),
            next_id: Cell::new(0),
        }
    }

    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.target, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    }

    fn remove_listener(&self, event: ProviderEvent, listener: &Listener) {
        let Some(remove) = self.method("removeListener").or_else(|| self.method("off")) else {
            log::warn!("Provider cannot remove {} listeners", event);
            return;
        };
        if let Err(err) = remove.call2(
            &self.target,
            &JsValue::from_str(event.as_str()),
            listener.as_ref(),
        ) {
            log::warn!("Failed to remove {} listener: {:?}", event, err);
        }
    }
}

impl Eip1193Provider for JsProvider {
    fn request(&self, method: &str, params: Value) -> RequestFuture {
        let target = self.target.clone();
        let method = method.to_string();

        Box::pin(async move {
            let args = Object::new();
            Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(&method))
                .map_err(js_error)?;
            if !params.is_null() {
                let js_params = params
                    .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                    .map_err(|e| Error::MalformedResponse(e.to_string()))?;
                Reflect::set(&args, &JsValue::from_str("params"), &js_params).map_err(js_error)?;
            }

            let request: Function = Reflect::get(&target, &JsValue::from_str("request"))
                .map_err(js_error)?
                .dyn_into()
                .map_err(|_| Error::MalformedResponse("provider has no request() method".to_string()))?;

            let returned = request.call1(&target, &args).map_err(js_error)?;
            let result = JsFuture::from(Promise::resolve(&returned))
                .await
                .map_err(js_error)?;

            if result.is_null() || result.is_undefined() {
                return Ok(Value::Null);
            }
            serde_wasm_bindgen::from_value::<Value>(result)
                .map_err(|e| Error::MalformedResponse(format!("{} result: {}", method, e)))
        })
    }

    fn on(&self, event: ProviderEvent, handler: EventHandler) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let listener = Listener::new(move |payload: JsValue| {
            let value = serde_wasm_bindgen::from_value::<Value>(payload).unwrap_or(Value::Null);
            handler(&value);
        });

        match self.method("on") {
            Some(on) => {
                if let Err(err) = on.call2(
                    &self.target,
                    &JsValue::from_str(event.as_str()),
                    listener.as_ref(),
                ) {
                    log::warn!("Failed to register {} listener: {:?}", event, err);
                }
            }
            None => log::warn!("Provider does not support events"),
        }

        self.listeners.borrow_mut().insert(id, (event, listener));
        id
    }

    fn off(&self, event: ProviderEvent, id: ListenerId) {
        let removed = self.listeners.borrow_mut().remove(&id);
        if let Some((registered, listener)) = removed {
            debug_assert_eq!(registered, event);
            self.remove_listener(registered, &listener);
        }
    }
}

impl Drop for JsProvider {
    fn drop(&mut self) {
        let listeners: Vec<_> = self.listeners.borrow_mut().drain().collect();
        for (_, (event, listener)) in listeners {
            self.remove_listener(event, &listener);
        }
    }
}

/// Turn a thrown JS value into a provider error, keeping `code` when present.
pub fn js_error(err: JsValue) -> Error {
    let code = Reflect::get(&err, &JsValue::from_str("code"))
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);

    let message = Reflect::get(&err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));

    Error::Provider(ProviderError { code, message })
}
