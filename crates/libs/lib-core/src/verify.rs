//! Optional ownership proof after connecting: a timestamped `personal_sign`.
//!
//! The signature is only logged. Declining it has no effect on the session.

use alloy_primitives::Address;
use chrono::{DateTime, SecondsFormat, Utc};

use crate::error::Result;
use crate::signer::Signer;

pub fn verification_message(app_name: &str, address: Address, issued_at: DateTime<Utc>) -> String {
    format!(
        "Welcome to {}!\n\nPlease sign this message to verify you own this wallet.\n\nWallet: {}\nTimestamp: {}",
        app_name,
        address.to_checksum(None),
        issued_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

/// Ask the wallet to sign the verification message for its own address.
pub async fn request_signature(signer: &Signer, app_name: &str) -> Result<String> {
    let message = verification_message(app_name, signer.address(), Utc::now());
    let signature = signer.sign_message(&message).await?;
    tracing::info!(address = %signer.address(), "Wallet ownership verified");
    Ok(signature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_verification_message() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let message = verification_message("Helios Contract Deployer", Address::repeat_byte(0x11), at);
        assert!(message.starts_with("Welcome to Helios Contract Deployer!"));
        assert!(message.contains("Wallet: 0x1111111111111111111111111111111111111111\n"));
        assert!(message.ends_with("Timestamp: 2024-05-01T12:00:00.000Z"));
    }
}
