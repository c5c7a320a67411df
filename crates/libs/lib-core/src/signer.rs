//! Transaction signer bound to the connected account.

use std::rc::Rc;

use alloy_primitives::{hex, Address, Bytes, TxHash};
use alloy_rpc_types_eth::{TransactionInput, TransactionReceipt, TransactionRequest};
use serde_json::json;

use crate::error::Result;
use crate::provider::{methods, request_typed, Eip1193Provider, WalletKind};

/// Contract creation from `from`: no `to`, `code` as the input.
///
/// The code goes out as both `input` and `data`; wallets differ in which one
/// they read. Gas fields are left for the wallet to fill in.
pub fn contract_creation(from: Address, code: Bytes) -> TransactionRequest {
    TransactionRequest {
        from: Some(from),
        input: TransactionInput::both(code),
        ..Default::default()
    }
}

/// The connected account together with the provider that can sign for it.
#[derive(Clone)]
pub struct Signer {
    address: Address,
    kind: WalletKind,
    provider: Rc<dyn Eip1193Provider>,
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("address", &self.address)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Signer {
    pub fn new(address: Address, kind: WalletKind, provider: Rc<dyn Eip1193Provider>) -> Self {
        Self {
            address,
            kind,
            provider,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn kind(&self) -> WalletKind {
        self.kind
    }

    pub fn provider(&self) -> &Rc<dyn Eip1193Provider> {
        &self.provider
    }

    /// Submit a transaction, returning its hash.
    pub async fn send_transaction(&self, tx: &TransactionRequest) -> Result<TxHash> {
        let params = json!([serde_json::to_value(tx)?]);
        request_typed(self.provider.as_ref(), methods::SEND_TRANSACTION, params).await
    }

    /// `personal_sign` over a UTF-8 message.
    pub async fn sign_message(&self, message: &str) -> Result<String> {
        let params = json!([hex::encode_prefixed(message.as_bytes()), self.address]);
        request_typed(self.provider.as_ref(), methods::PERSONAL_SIGN, params).await
    }

    /// Receipt lookup, `None` while the transaction is pending.
    pub async fn transaction_receipt(&self, hash: TxHash) -> Result<Option<TransactionReceipt>> {
        request_typed(self.provider.as_ref(), methods::GET_TRANSACTION_RECEIPT, json!([hash])).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{receipt_json, MockProvider};
    use alloy_primitives::b256;

    const FROM: Address = Address::repeat_byte(0x11);

    #[test]
    fn test_contract_creation_request() {
        let tx = contract_creation(FROM, Bytes::from_static(&[0x60, 0x80]));
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["from"], "0x1111111111111111111111111111111111111111");
        assert_eq!(json["data"], "0x6080");
        assert_eq!(json["input"], "0x6080");
        assert!(json.get("to").is_none());
        assert!(json.get("gas").is_none());
        assert!(json.get("gasPrice").is_none());

        let manual = TransactionRequest {
            gas: Some(200_000),
            gas_price: Some(1_000_000_000),
            ..tx
        };
        let json = serde_json::to_value(&manual).unwrap();
        assert_eq!(json["gas"], "0x30d40");
        assert_eq!(json["gasPrice"], "0x3b9aca00");
    }

    #[tokio::test]
    async fn test_sign_message_encodes_hex() {
        let provider = MockProvider::new();
        provider.respond(methods::PERSONAL_SIGN, Ok(json!("0xsig")));
        let signer = Signer::new(FROM, WalletKind::Injected, provider.clone());

        let signature = signer.sign_message("hi").await.unwrap();
        assert_eq!(signature, "0xsig");

        let calls = provider.calls_for(methods::PERSONAL_SIGN);
        assert_eq!(calls, vec![json!(["0x6869", "0x1111111111111111111111111111111111111111"])]);
    }

    #[tokio::test]
    async fn test_transaction_receipt_lookup() {
        let hash = b256!("0x00000000000000000000000000000000000000000000000000000000000000aa");
        let contract = Address::repeat_byte(0x22);
        let provider = MockProvider::new();
        provider.respond_once(methods::GET_TRANSACTION_RECEIPT, Ok(serde_json::Value::Null));
        provider.respond(methods::GET_TRANSACTION_RECEIPT, Ok(receipt_json(hash, Some(contract), true)));
        let signer = Signer::new(FROM, WalletKind::Injected, provider.clone());

        assert!(signer.transaction_receipt(hash).await.unwrap().is_none());

        let receipt = signer.transaction_receipt(hash).await.unwrap().unwrap();
        assert_eq!(receipt.transaction_hash, hash);
        assert_eq!(receipt.contract_address, Some(contract));
        assert_eq!(
            provider.calls_for(methods::GET_TRANSACTION_RECEIPT)[0],
            json!(["0x00000000000000000000000000000000000000000000000000000000000000aa"])
        );
    }
}
