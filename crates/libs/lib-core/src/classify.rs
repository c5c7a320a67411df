//! Mapping of wallet and transaction errors to short user-facing messages.
//!
//! Wallets disagree on error codes, so after the code checks these fall back to
//! substring matching on the message. Unmapped errors get a generic message;
//! the raw text is always kept separately as technical detail.

use crate::error::{Error, ProviderError};

pub const NO_WALLET: &str =
    "No Web3 wallet detected. Please install MetaMask, Rabby, or another Web3 wallet.";
pub const CONNECT_REJECTED_CODE: &str = "User rejected the connection request";
pub const CONNECT_IN_PROGRESS: &str = "Wallet connection already in progress. Please check your wallet.";
pub const CONNECT_REJECTED_TEXT: &str = "Connection was rejected by user";
pub const CONNECT_PENDING_TEXT: &str = "Connection request already pending. Please check your wallet.";
pub const CONNECT_FAILED: &str = "Failed to connect wallet";

pub const SWITCH_FAILED: &str = "Failed to switch network. Please switch manually in your wallet.";
pub const ADD_NETWORK_FAILED: &str = "Failed to add network. Please add it manually in your wallet.";

pub const DEPLOY_TIMEOUT: &str =
    "Deployment is taking longer than expected. Check your wallet - the transaction may still be processing.";
pub const DEPLOY_REJECTED: &str = "Transaction rejected by user.";
pub const DEPLOY_ESTIMATION: &str = "Gas estimation failed. Try refreshing the page or switching wallets.";
pub const DEPLOY_NONCE: &str = "Nonce error. Please reset your wallet and try again.";
pub const DEPLOY_PARSE: &str = "Transaction parsing error. Please check network connection and try again.";
pub const DEPLOY_NETWORK: &str =
    "Network connection error. Please check your internet connection and try again.";
pub const DEPLOY_FAILED: &str = "Deployment failed. Please try again.";

/// Message for a failed `connect()`.
pub fn connect_error_message(err: &Error) -> &'static str {
    match err {
        Error::NoProvider => return NO_WALLET,
        Error::Provider(ProviderError {
            code: Some(ProviderError::USER_REJECTED),
            ..
        }) => return CONNECT_REJECTED_CODE,
        Error::Provider(ProviderError {
            code: Some(ProviderError::REQUEST_PENDING),
            ..
        }) => return CONNECT_IN_PROGRESS,
        _ => {}
    }

    let raw = err.to_string();
    if raw.contains("User rejected") {
        CONNECT_REJECTED_TEXT
    } else if raw.contains("already pending") {
        CONNECT_PENDING_TEXT
    } else {
        CONNECT_FAILED
    }
}

/// Message for a failed deployment.
///
/// `currency_symbol` names the native token in the insufficient-funds hint.
/// Estimation failures are matched before the broad "gas" check so they keep
/// their own message.
pub fn deployment_error_message(err: &Error, currency_symbol: &str) -> String {
    let raw = err.to_string().to_lowercase();

    let message = if matches!(err, Error::Timeout)
        || raw.contains("timeout")
        || raw.contains("longer than expected")
    {
        DEPLOY_TIMEOUT
    } else if err.code() == Some(ProviderError::USER_REJECTED)
        || raw.contains("user rejected")
        || raw.contains("user denied")
    {
        DEPLOY_REJECTED
    } else if raw.contains("estimation") || raw.contains("estimate gas") {
        DEPLOY_ESTIMATION
    } else if raw.contains("insufficient funds") || raw.contains("gas") {
        return format!(
            "Insufficient funds for gas fees. Please ensure you have enough {} tokens.",
            currency_symbol
        );
    } else if raw.contains("nonce") {
        DEPLOY_NONCE
    } else if matches!(err, Error::MalformedResponse(_)) || raw.contains("parse") || raw.contains("json") {
        DEPLOY_PARSE
    } else if raw.contains("network") || raw.contains("connection") {
        DEPLOY_NETWORK
    } else {
        DEPLOY_FAILED
    };

    message.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(code: i64, message: &str) -> Error {
        Error::Provider(ProviderError::new(code, message))
    }

    fn text(message: &str) -> Error {
        Error::Provider(ProviderError::message(message))
    }

    #[test]
    fn test_connect_messages() {
        assert_eq!(connect_error_message(&Error::NoProvider), NO_WALLET);
        assert_eq!(connect_error_message(&provider(4001, "whatever")), CONNECT_REJECTED_CODE);
        assert_eq!(connect_error_message(&provider(-32002, "busy")), CONNECT_IN_PROGRESS);
        assert_eq!(connect_error_message(&text("User rejected the request.")), CONNECT_REJECTED_TEXT);
        assert_eq!(
            connect_error_message(&text("Request of type 'wallet_requestPermissions' already pending")),
            CONNECT_PENDING_TEXT
        );
        assert_eq!(connect_error_message(&Error::NoAccounts), CONNECT_FAILED);
        assert_eq!(connect_error_message(&provider(-32603, "Internal error")), CONNECT_FAILED);
    }

    #[test]
    fn test_deployment_messages() {
        let cases = [
            (Error::Timeout, DEPLOY_TIMEOUT.to_string()),
            (text("request timeout"), DEPLOY_TIMEOUT.to_string()),
            (provider(4001, "MetaMask Tx Signature: User denied transaction signature."), DEPLOY_REJECTED.to_string()),
            (text("user rejected transaction"), DEPLOY_REJECTED.to_string()),
            (text("gas estimation failed"), DEPLOY_ESTIMATION.to_string()),
            (
                text("insufficient funds for transfer"),
                "Insufficient funds for gas fees. Please ensure you have enough HLS tokens.".to_string(),
            ),
            (text("nonce too low"), DEPLOY_NONCE.to_string()),
            (Error::MalformedResponse("missing field".into()), DEPLOY_PARSE.to_string()),
            (text("Unexpected token < in JSON at position 0"), DEPLOY_PARSE.to_string()),
            (text("network changed"), DEPLOY_NETWORK.to_string()),
            (text("execution reverted"), DEPLOY_FAILED.to_string()),
        ];

        for (err, expected) in cases {
            assert_eq!(deployment_error_message(&err, "HLS"), expected, "for {:?}", err);
        }
    }

    #[test]
    fn test_rejection_code_wins_over_gas_text() {
        let err = provider(4001, "User rejected gas fee change");
        assert_eq!(deployment_error_message(&err, "HLS"), DEPLOY_REJECTED);
    }
}
