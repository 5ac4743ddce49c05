//! Interface descriptions for the administered contracts.
//!
//! Each contract generation (V1, V2) ships its own table of callable
//! function signatures, keyed by the contract's registry name. The tables
//! are the single source of truth for encoding privileged calls; the
//! near-duplicate per-version scripts collapse into one relay parameterized
//! by [`LmVersion`].

use std::{
    collections::HashMap,
    fmt::{self, Display},
    str::FromStr,
};

use ethers::abi::{Function, HumanReadableParser};

use crate::errors::ScriptError;

/// The registry key of the SOV token contract
pub const SOV_KEY: &str = "SOV";

/// The registry key of the multisig wallet gating privileged calls
pub const MULTISIG_KEY: &str = "multisig";

/// The registry key of the V1 liquidity mining proxy
pub const LM_V1_KEY: &str = "LiquidityMiningProxy";

/// The registry key of the V2 liquidity mining proxy
pub const LM_V2_KEY: &str = "LiquidityMiningProxyV2";

/// The registry key of the RBTC wrapper proxy
pub const WRAPPER_KEY: &str = "RBTCWrapperProxy";

/// The registry key of the V2 locked-SOV reward transfer logic contract
pub const LOCKED_SOV_TRANSFER_LOGIC_KEY: &str = "LockedSOVRewardTransferLogic";

/// The registry key of the dummy pool token used to park the
/// unallocated share of reward emission
pub const CONFIG_TOKEN_KEY: &str = "LiquidityMiningConfigToken";

/// The registry keys of the loan tokens which must point at the
/// active liquidity mining contract
pub const LOAN_TOKEN_KEYS: [&str; 5] = ["iDOC", "iUSDT", "iBPro", "iXUSD", "iRBTC"];

/// The registry keys of the AMM pool tokens registered by the
/// `add-pools` command
pub const AMM_POOL_TOKEN_KEYS: [&str; 6] = [
    "(WR)BTC/USDT1",
    "(WR)BTC/USDT2",
    "(WR)BTC/DOC1",
    "(WR)BTC/DOC2",
    "(WR)BTC/BPRO1",
    "(WR)BTC/BPRO2",
];

/// The registry key of the (WR)BTC/MOC pool token
pub const MOC_POOL_TOKEN_KEY: &str = "(WR)BTC/MOC";

/// The liquidity mining contract generation a script targets
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LmVersion {
    /// The original single-reward-token contract
    V1,
    /// The multi-reward-token rewrite
    V2,
}

impl LmVersion {
    /// The registry key of the liquidity mining proxy for this generation
    pub fn lm_key(&self) -> &'static str {
        match self {
            LmVersion::V1 => LM_V1_KEY,
            LmVersion::V2 => LM_V2_KEY,
        }
    }
}

impl Display for LmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LmVersion::V1 => write!(f, "v1"),
            LmVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for LmVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" => Ok(LmVersion::V1),
            "v2" => Ok(LmVersion::V2),
            _ => Err(format!("unknown liquidity mining version: {}", s)),
        }
    }
}

/// The callable functions of a single contract, keyed by function name
#[derive(Clone, Debug)]
pub struct ContractInterface {
    /// The parsed function signatures
    functions: HashMap<String, Function>,
}

impl ContractInterface {
    /// Parse an interface from a list of human-readable function declarations
    fn parse(declarations: &[&str]) -> Self {
        let functions = declarations
            .iter()
            .map(|decl| {
                // The declarations are static tables below, so a parse failure
                // is a programming error caught by the unit tests
                let function = HumanReadableParser::parse_function(decl)
                    .unwrap_or_else(|e| panic!("invalid function declaration `{}`: {}", decl, e));
                (function.name.clone(), function)
            })
            .collect();

        ContractInterface { functions }
    }

    /// Look up a function by name, erroring if the interface does not declare it
    pub fn function(&self, function_name: &str) -> Result<&Function, ScriptError> {
        self.functions
            .get(function_name)
            .ok_or_else(|| ScriptError::UnknownFunction(function_name.to_string()))
    }
}

/// The interface descriptions of every contract a given script generation
/// touches, keyed by the contract's registry name
#[derive(Clone, Debug)]
pub struct InterfaceSet {
    /// The targeted contract generation
    version: LmVersion,
    /// The registry-name -> interface map
    contracts: HashMap<String, ContractInterface>,
}

/// The loan token functions used when rewiring the liquidity mining address
const LOAN_TOKEN_FUNCTIONS: [&str; 1] =
    ["function setLiquidityMiningAddress(address liquidityMiningAddress)"];

/// The SOV token functions used by the transfer scripts
const SOV_FUNCTIONS: [&str; 1] =
    ["function transfer(address recipient, uint256 amount) returns (bool)"];

/// The multisig wallet's proposal entry point
const MULTISIG_FUNCTIONS: [&str; 1] = [
    "function submitTransaction(address destination, uint256 value, bytes data) returns (uint256 transactionId)",
];

/// The V1 liquidity mining functions used by the operator scripts
const LM_V1_FUNCTIONS: [&str; 5] = [
    "function add(address poolToken, uint96 allocationPoint, bool withUpdate)",
    "function update(address poolToken, uint96 allocationPoint, bool withUpdate)",
    "function updateAllPools()",
    "function setWrapper(address wrapper)",
    "function setLockedSOV(address lockedSOV)",
];

/// The V2 liquidity mining functions used by the operator scripts
const LM_V2_FUNCTIONS: [&str; 5] = [
    "function add(address poolToken, address[] rewardTokens, uint96[] allocationPoints, bool withUpdate)",
    "function update(address poolToken, address[] rewardTokens, uint96[] allocationPoints, bool withUpdate)",
    "function updateAllPools()",
    "function setWrapper(address wrapper)",
    "function addRewardToken(address rewardToken, uint256 rewardTokensPerBlock, uint256 startDelayBlocks, address rewardTransferLogic)",
];

/// The V2 reward transfer logic functions used by the operator scripts
const LOCKED_SOV_TRANSFER_LOGIC_FUNCTIONS: [&str; 1] =
    ["function changeLockedSOV(address newLockedSOV)"];

impl InterfaceSet {
    /// Build the interface table for the given contract generation
    pub fn new(version: LmVersion) -> Self {
        let mut contracts = HashMap::new();

        let loan_token = ContractInterface::parse(&LOAN_TOKEN_FUNCTIONS);
        for key in LOAN_TOKEN_KEYS {
            contracts.insert(key.to_string(), loan_token.clone());
        }

        contracts.insert(SOV_KEY.to_string(), ContractInterface::parse(&SOV_FUNCTIONS));
        contracts.insert(
            MULTISIG_KEY.to_string(),
            ContractInterface::parse(&MULTISIG_FUNCTIONS),
        );

        match version {
            LmVersion::V1 => {
                contracts.insert(
                    LM_V1_KEY.to_string(),
                    ContractInterface::parse(&LM_V1_FUNCTIONS),
                );
            }
            LmVersion::V2 => {
                contracts.insert(
                    LM_V2_KEY.to_string(),
                    ContractInterface::parse(&LM_V2_FUNCTIONS),
                );
                contracts.insert(
                    LOCKED_SOV_TRANSFER_LOGIC_KEY.to_string(),
                    ContractInterface::parse(&LOCKED_SOV_TRANSFER_LOGIC_FUNCTIONS),
                );
            }
        }

        InterfaceSet { version, contracts }
    }

    /// The contract generation this table targets
    pub fn version(&self) -> LmVersion {
        self.version
    }

    /// Look up the interface description of the named contract
    pub fn contract(&self, contract_name: &str) -> Result<&ContractInterface, ScriptError> {
        self.contracts.get(contract_name).ok_or_else(|| {
            ScriptError::UnknownContract(format!(
                "no interface description for `{}`",
                contract_name,
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::{sol, SolCall};

    use crate::errors::ScriptError;

    use super::{InterfaceSet, LmVersion, LM_V2_KEY, SOV_KEY};

    sol! {
        function transfer(address recipient, uint256 amount) returns (bool);
        function add(address poolToken, address[] rewardTokens, uint96[] allocationPoints, bool withUpdate) external;
    }

    #[test]
    fn test_transfer_selector_matches_sol_oracle() {
        let interfaces = InterfaceSet::new(LmVersion::V1);
        let function = interfaces
            .contract(SOV_KEY)
            .unwrap()
            .function("transfer")
            .unwrap();

        assert_eq!(function.short_signature(), transferCall::SELECTOR);
    }

    #[test]
    fn test_v2_add_selector_matches_sol_oracle() {
        let interfaces = InterfaceSet::new(LmVersion::V2);
        let function = interfaces
            .contract(LM_V2_KEY)
            .unwrap()
            .function("add")
            .unwrap();

        assert_eq!(function.short_signature(), addCall::SELECTOR);
    }

    #[test]
    fn test_v1_table_excludes_v2_contracts() {
        let interfaces = InterfaceSet::new(LmVersion::V1);

        let res = interfaces.contract(super::LOCKED_SOV_TRANSFER_LOGIC_KEY);
        assert!(matches!(res, Err(ScriptError::UnknownContract(_))));
    }

    #[test]
    fn test_unknown_function() {
        let interfaces = InterfaceSet::new(LmVersion::V1);
        let sov = interfaces.contract(SOV_KEY).unwrap();

        let res = sov.function("mint");
        assert!(matches!(res, Err(ScriptError::UnknownFunction(_))));
    }

    #[test]
    fn test_lm_key_tracks_version() {
        assert_eq!(LmVersion::V1.lm_key(), "LiquidityMiningProxy");
        assert_eq!(LmVersion::V2.lm_key(), "LiquidityMiningProxyV2");
    }
}
