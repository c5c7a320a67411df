//! # Centralized Error Handling
//!
//! [`Error`] is the single error type used across the core. Nothing here is
//! fatal: every error is caught at the boundary of the operation that produced
//! it (connect, network switch, deploy) and turned into user-facing text by
//! [`crate::classify`], while the `Display` form is kept as technical detail.
//!
//! ## Error Categories
//!
//! 1. **Absence** - [`NoProvider`](Error::NoProvider), [`NotConnected`](Error::NotConnected),
//!    [`NoAccounts`](Error::NoAccounts)
//! 2. **Provider** - [`Provider`](Error::Provider) wraps the EIP-1193 error object
//!    (user rejection `4001`, pending request `-32002`, unknown chain `4902`, ...)
//! 3. **Transaction** - [`MalformedResponse`](Error::MalformedResponse),
//!    [`Reverted`](Error::Reverted)
//! 4. **Timeout** - [`Timeout`](Error::Timeout), confirmation not observed in time
//! 5. **Configuration** - [`Config`](Error::Config)

use thiserror::Error;

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Error object returned by an injected wallet provider.
///
/// Mirrors the EIP-1193 `ProviderRpcError` shape: an optional numeric code and
/// a message. Wallets are inconsistent about codes, so classification also
/// looks at the message text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ProviderError {
    pub code: Option<i64>,
    pub message: String,
}

impl ProviderError {
    /// The user rejected the request.
    pub const USER_REJECTED: i64 = 4001;
    /// The requested chain has not been added to the wallet.
    pub const UNRECOGNIZED_CHAIN: i64 = 4902;
    /// A request of the same kind is already waiting for the user.
    pub const REQUEST_PENDING: i64 = -32002;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    /// An error without a code, e.g. a thrown string.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == Some(Self::USER_REJECTED)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(Self::UNRECOGNIZED_CHAIN)
    }
}

/// Core error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No injected wallet was found on the page.
    #[error("No Web3 wallet detected")]
    NoProvider,

    /// An operation needed a signer but the session is not connected.
    #[error("Wallet not connected")]
    NotConnected,

    /// The wallet answered an account request with an empty list.
    #[error("No accounts found")]
    NoAccounts,

    /// Error object reported by the wallet.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The wallet answered with something that does not match the RPC shape.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// The deployment transaction was mined but reverted.
    #[error("Transaction {0} reverted")]
    Reverted(String),

    /// Confirmation was not observed within the configured bound.
    #[error("Deployment taking longer than expected. Check your wallet for transaction status.")]
    Timeout,

    /// Invalid compiled-in configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// EIP-1193 error code, when the wallet supplied one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Provider(err) => err.code,
            _ => None,
        }
    }

    /// Short text for the UI when no context-specific classification applies.
    pub fn user_message(&self) -> String {
        match self {
            Error::NoProvider => crate::classify::NO_WALLET.to_string(),
            Error::NotConnected => "Please connect your wallet first".to_string(),
            Error::NoAccounts => "No accounts found. Please unlock your wallet.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedResponse(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display_is_raw_message() {
        let err = Error::from(ProviderError::new(4001, "User denied transaction signature."));
        assert_eq!(err.to_string(), "User denied transaction signature.");
        assert_eq!(err.code(), Some(4001));
    }

    #[test]
    fn test_codes() {
        assert!(ProviderError::new(4001, "x").is_user_rejection());
        assert!(ProviderError::new(4902, "x").is_unrecognized_chain());
        assert!(!ProviderError::message("x").is_user_rejection());
        assert_eq!(Error::Timeout.code(), None);
    }

    #[test]
    fn test_user_message() {
        assert!(Error::NoProvider.user_message().starts_with("No Web3 wallet detected."));
        assert_eq!(Error::NotConnected.user_message(), "Please connect your wallet first");
        assert_eq!(
            Error::Provider(ProviderError::message("boom")).user_message(),
            "boom"
        );
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::MalformedResponse(ref msg) if msg.starts_with("JSON error")));
    }
}
