//! UI Components

pub mod abi_viewer;
pub mod debug_panel;
pub mod navbar;
pub mod wallet_connector;

pub use abi_viewer::AbiViewer;
pub use debug_panel::DebugPanel;
pub use navbar::{Footer, Navbar};
pub use wallet_connector::WalletConnector;
