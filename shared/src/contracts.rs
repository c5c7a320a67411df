//! # Contract Catalog
//!
//! The fixed set of pre-compiled contracts a user can deploy. Each entry keeps
//! its ABI as Solidity JSON and its creation bytecode as `0x`-prefixed hex, the
//! way compiler artifacts ship them; [`ContractArtifact::abi`] and
//! [`ContractArtifact::creation_code`] decode them on demand.

use alloy_json_abi::JsonAbi;
use alloy_primitives::{hex, Bytes};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Catalog key, as used by the contract selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractKey {
    #[default]
    Counter,
    Hello,
    Storage,
}

impl ContractKey {
    pub const ALL: [ContractKey; 3] = [ContractKey::Counter, ContractKey::Hello, ContractKey::Storage];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContractKey::Counter => "counter",
            ContractKey::Hello => "hello",
            ContractKey::Storage => "storage",
        }
    }

    pub fn artifact(&self) -> &'static ContractArtifact {
        match self {
            ContractKey::Counter => &SIMPLE_COUNTER,
            ContractKey::Hello => &HELLO_WORLD,
            ContractKey::Storage => &SIMPLE_STORAGE,
        }
    }
}

impl fmt::Display for ContractKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContractKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("Unknown contract: {}", s))
    }
}

/// A deployable contract: ABI plus creation bytecode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractArtifact {
    pub key: ContractKey,
    pub name: &'static str,
    pub description: &'static str,
    /// Solidity JSON ABI.
    pub json_abi: &'static str,
    /// Creation bytecode, `0x`-prefixed hex.
    pub bytecode: &'static str,
}

impl ContractArtifact {
    pub fn abi(&self) -> serde_json::Result<JsonAbi> {
        serde_json::from_str(self.json_abi)
    }

    /// Pretty-printed JSON ABI, for the ABI viewer.
    pub fn abi_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.abi()?)
    }

    /// Creation bytecode as sent in the transaction `data`.
    pub fn creation_code(&self) -> Result<Bytes, hex::FromHexError> {
        self.bytecode.parse()
    }
}

pub static SIMPLE_COUNTER: ContractArtifact = ContractArtifact {
    key: ContractKey::Counter,
    name: "Simple Counter",
    description: "A simple counter contract with increment function.",
    json_abi: r#"[
        {"inputs":[],"name":"count","outputs":[{"internalType":"uint256","name":"","type":"uint256"}],"stateMutability":"view","type":"function"},
        {"inputs":[],"name":"increment","outputs":[],"stateMutability":"nonpayable","type":"function"}
    ]"#,
    bytecode: "0x608060405234801561001057600080fd5b50610150806100206000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c806306661abd1461003b578063d09de08a14610059575b600080fd5b610043610077565b60405161005091906100a2565b60405180910390f35b61006161007d565b60405161006e91906100a2565b60405180910390f35b60005481565b600160008082825461008a91906100bd565b925050819055565b6000819050919050565b6100a581610092565b82525050565b60006020820190506100c0600083018461009c565b9291505056fea2646970667358221220a1b2c3d4e5f6789012345678901234567890123456789012345678901234567890123464736f6c63430008110033",
};

pub static HELLO_WORLD: ContractArtifact = ContractArtifact {
    key: ContractKey::Hello,
    name: "Hello World",
    description: "A basic Hello World contract that returns 'Hello World'.",
    json_abi: r#"[
        {"inputs":[],"name":"sayHello","outputs":[{"internalType":"string","name":"","type":"string"}],"stateMutability":"pure","type":"function"}
    ]"#,
    bytecode: "0x608060405234801561001057600080fd5b50610100806100206000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c8063ef5fb05b1461003b575b600080fd5b610043610059565b6040516100509190610077565b60405180910390f35b60606040518060400160405280600b81526020017f48656c6c6f20576f726c6400000000000000000000000000000000000000000000815250905090565b6000819050919050565b61008781610074565b82525050565b60006020820190506100a2600083018461007e565b9291505056fea2646970667358221220a1b2c3d4e5f6789012345678901234567890123456789012345678901234567890123464736f6c63430008110033",
};

pub static SIMPLE_STORAGE: ContractArtifact = ContractArtifact {
    key: ContractKey::Storage,
    name: "Simple Storage",
    description: "A simple storage contract with getValue and setValue functions.",
    json_abi: r#"[
        {"inputs":[],"name":"getValue","outputs":[{"internalType":"uint256","name":"","type":"uint256"}],"stateMutability":"view","type":"function"},
        {"inputs":[{"internalType":"uint256","name":"_value","type":"uint256"}],"name":"setValue","outputs":[],"stateMutability":"nonpayable","type":"function"}
    ]"#,
    bytecode: "0x608060405234801561001057600080fd5b50610150806100206000396000f3fe608060405234801561001057600080fd5b50600436106100365760003560e01c8063209652551461003b5780633fa4f24514610059575b600080fd5b610043610077565b60405161005091906100a2565b60405180910390f35b61006161007d565b60405161006e91906100a2565b60405180910390f35b60005481565b600160008082825461008a91906100bd565b925050819055565b6000819050919050565b6100a581610092565b82525050565b60006020820190506100c0600083018461009c565b9291505056fea2646970667358221220a1b2c3d4e5f6789012345678901234567890123456789012345678901234567890123464736f6c63430008110033",
};

/// Every deployable contract, in selector order.
pub static CATALOG: [&ContractArtifact; 3] = [&SIMPLE_COUNTER, &HELLO_WORLD, &SIMPLE_STORAGE];

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_json_abi::StateMutability;

    #[test]
    fn test_key_round_trips_through_str() {
        for key in ContractKey::ALL {
            assert_eq!(key.as_str().parse::<ContractKey>(), Ok(key));
            assert_eq!(key.artifact().key, key);
        }
        assert!("erc20".parse::<ContractKey>().is_err());
    }

    #[test]
    fn test_catalog_order_matches_keys() {
        let keys: Vec<ContractKey> = CATALOG.iter().map(|artifact| artifact.key).collect();
        assert_eq!(keys, ContractKey::ALL.to_vec());
    }

    #[test]
    fn test_catalog_entries_decode() {
        for artifact in CATALOG {
            let code = artifact.creation_code().unwrap();
            assert!(code.starts_with(&[0x60, 0x80, 0x60, 0x40]), "{}", artifact.name);
            assert!(!artifact.abi().unwrap().functions.is_empty(), "{}", artifact.name);
        }
    }

    #[test]
    fn test_abi_decodes_solidity_layout() {
        let abi = SIMPLE_STORAGE.abi().unwrap();
        let set_value = &abi.function("setValue").unwrap()[0];
        assert_eq!(set_value.inputs[0].ty, "uint256");
        assert_eq!(set_value.inputs[0].name, "_value");
        assert_eq!(set_value.state_mutability, StateMutability::NonPayable);
        assert_eq!(abi.function("getValue").unwrap()[0].state_mutability, StateMutability::View);

        let hello = HELLO_WORLD.abi().unwrap();
        assert_eq!(hello.function("sayHello").unwrap()[0].outputs[0].ty, "string");
    }

    #[test]
    fn test_abi_json_for_viewer() {
        let json: serde_json::Value = serde_json::from_str(&SIMPLE_STORAGE.abi_json().unwrap()).unwrap();
        let set_value = json
            .as_array()
            .unwrap()
            .iter()
            .find(|entry| entry["name"] == "setValue")
            .unwrap();
        assert_eq!(set_value["type"], "function");
        assert_eq!(set_value["stateMutability"], "nonpayable");
        assert_eq!(set_value["inputs"][0]["name"], "_value");
    }
}
