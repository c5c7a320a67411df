use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Status text shown while nothing is happening.
pub const READY_MESSAGE: &str = "Ready to deploy";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
    #[default]
    Idle,
    Deploying,
    Success,
    Error,
}

/// The single active deployment attempt.
///
/// Outside `Idle` and `Deploying`, exactly one of the result pair
/// (`deployed_address` + non-empty `transaction_hash`) or `error` is populated.
/// `transaction_hash` is display text: a `0x` hash, or a placeholder when the
/// wallet path does not report one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentAttempt {
    pub status: DeploymentStatus,
    pub message: String,
    pub deployed_address: Option<Address>,
    pub transaction_hash: String,
    /// Technical details, shown on demand only.
    pub error: Option<String>,
}

impl DeploymentAttempt {
    pub fn idle() -> Self {
        Self {
            status: DeploymentStatus::Idle,
            message: READY_MESSAGE.to_string(),
            deployed_address: None,
            transaction_hash: String::new(),
            error: None,
        }
    }

    pub fn deploying(message: impl Into<String>) -> Self {
        Self {
            status: DeploymentStatus::Deploying,
            message: message.into(),
            ..Self::idle()
        }
    }

    pub fn succeeded(address: Address, transaction_hash: impl Into<String>) -> Self {
        Self {
            status: DeploymentStatus::Success,
            message: "Contract deployed successfully!".to_string(),
            deployed_address: Some(address),
            transaction_hash: transaction_hash.into(),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: DeploymentStatus::Error,
            message: message.into(),
            deployed_address: None,
            transaction_hash: String::new(),
            error: Some(details.into()),
        }
    }

    pub fn is_deploying(&self) -> bool {
        self.status == DeploymentStatus::Deploying
    }
}

impl Default for DeploymentAttempt {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_defaults() {
        let attempt = DeploymentAttempt::default();
        assert_eq!(attempt.status, DeploymentStatus::Idle);
        assert_eq!(attempt.message, READY_MESSAGE);
        assert!(attempt.deployed_address.is_none());
        assert!(attempt.transaction_hash.is_empty());
        assert!(attempt.error.is_none());
    }

    #[test]
    fn test_terminal_states_are_exclusive() {
        let ok = DeploymentAttempt::succeeded(Address::repeat_byte(0x11), "0xdef");
        assert!(ok.error.is_none());
        assert!(ok.deployed_address.is_some() && !ok.transaction_hash.is_empty());

        let failed = DeploymentAttempt::failed("Transaction rejected by user.", "user denied");
        assert!(failed.deployed_address.is_none() && failed.transaction_hash.is_empty());
        assert_eq!(failed.error.as_deref(), Some("user denied"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(DeploymentAttempt::deploying("Preparing deployment...")).unwrap();
        assert_eq!(json["status"], "deploying");
        assert_eq!(json["message"], "Preparing deployment...");
        assert!(json["deployed_address"].is_null());

        let ok = serde_json::to_value(DeploymentAttempt::succeeded(Address::repeat_byte(0x11), "0x01")).unwrap();
        assert_eq!(ok["deployed_address"], "0x1111111111111111111111111111111111111111");
    }
}
