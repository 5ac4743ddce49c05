//! The per-network contract registry, mapping human-readable contract names
//! to deployed on-chain addresses.
//!
//! The registry is loaded once per script invocation from a JSON file
//! (one file per network) and is read-only afterwards.

use std::{collections::HashMap, fs::File, io::Read, str::FromStr};

use ethers::abi::Address;
use json::JsonValue;

use crate::errors::ScriptError;

/// The top-level key under which the name -> address map lives
/// in the registry file
pub const CONTRACTS_KEY: &str = "contracts";

/// A read-only mapping from contract names to deployed addresses,
/// populated once from the per-network registry file
#[derive(Clone, Debug, Default)]
pub struct ContractRegistry {
    /// The name -> address map
    contracts: HashMap<String, Address>,
}

impl ContractRegistry {
    /// Load the registry from the JSON file at the given path
    pub fn load(file_path: &str) -> Result<Self, ScriptError> {
        let mut file_contents = String::new();
        File::open(file_path)
            .map_err(|e| ScriptError::ConfigLoad(e.to_string()))?
            .read_to_string(&mut file_contents)
            .map_err(|e| ScriptError::ConfigLoad(e.to_string()))?;

        let parsed_json =
            json::parse(&file_contents).map_err(|e| ScriptError::ConfigLoad(e.to_string()))?;

        Self::from_json(&parsed_json)
    }

    /// Build the registry from a parsed registry file
    pub fn from_json(parsed_json: &JsonValue) -> Result<Self, ScriptError> {
        let entries = &parsed_json[CONTRACTS_KEY];
        if !entries.is_object() {
            return Err(ScriptError::ConfigLoad(format!(
                "registry file is missing the `{}` object",
                CONTRACTS_KEY,
            )));
        }

        let mut contracts = HashMap::new();
        for (name, value) in entries.entries() {
            let address_str = value.as_str().ok_or_else(|| {
                ScriptError::ConfigLoad(format!("address for `{}` is not a string", name))
            })?;
            let address = Address::from_str(address_str)
                .map_err(|e| ScriptError::ConfigLoad(format!("address for `{}`: {}", name, e)))?;

            contracts.insert(name.to_string(), address);
        }

        Ok(ContractRegistry { contracts })
    }

    /// Resolve the deployed address of the named contract, erroring if the
    /// name is absent from the registry
    pub fn address_of(&self, contract_name: &str) -> Result<Address, ScriptError> {
        self.contracts
            .get(contract_name)
            .copied()
            .ok_or_else(|| ScriptError::UnknownContract(contract_name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use ethers::abi::Address;
    use serde_json::json;

    use crate::errors::ScriptError;

    use super::ContractRegistry;

    /// Build a registry from an in-memory registry file
    fn test_registry() -> ContractRegistry {
        let file = json!({
            "contracts": {
                "SOV": "0xEFc78fc7d48b64958315949279Ba181c2114ABBd",
                "multisig": "0x924f5ad34698Fd20c90Fe5D5A8A0abd3b42dc711",
            }
        });
        let parsed = json::parse(&file.to_string()).unwrap();

        ContractRegistry::from_json(&parsed).unwrap()
    }

    #[test]
    fn test_resolves_known_contract() {
        let registry = test_registry();
        let expected: Address = "0xEFc78fc7d48b64958315949279Ba181c2114ABBd"
            .parse()
            .unwrap();

        assert_eq!(registry.address_of("SOV").unwrap(), expected);
    }

    #[test]
    fn test_unknown_contract() {
        let registry = test_registry();

        let res = registry.address_of("LiquidityMiningProxy");
        assert!(matches!(res, Err(ScriptError::UnknownContract(_))));
    }

    #[test]
    fn test_missing_contracts_key() {
        let parsed = json::parse(r#"{"deployments": {}}"#).unwrap();

        let res = ContractRegistry::from_json(&parsed);
        assert!(matches!(res, Err(ScriptError::ConfigLoad(_))));
    }

    #[test]
    fn test_malformed_address() {
        let file = json!({ "contracts": { "SOV": "not-an-address" } });
        let parsed = json::parse(&file.to_string()).unwrap();

        let res = ContractRegistry::from_json(&parsed);
        assert!(matches!(res, Err(ScriptError::ConfigLoad(_))));
    }
}
