//! Page modules

pub mod deploy;

pub use deploy::DeployPage;
