//! Browser implementations of the core's capability traits.

pub mod discovery;
pub mod provider;
pub mod runtime;

pub use discovery::BrowserEnvironment;
pub use provider::JsProvider;
pub use runtime::BrowserRuntime;
