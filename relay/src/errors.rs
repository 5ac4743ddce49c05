//! Definitions of errors that can occur during the execution of the contract management scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the contract management scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error reading the per-network contract registry file
    ConfigLoad(String),
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// A contract name referenced by a script is absent from the registry
    UnknownContract(String),
    /// A function name is absent from the target contract's interface description
    UnknownFunction(String),
    /// The supplied arguments disagree with the function's declared parameters
    ArgumentMismatch(String),
    /// Error constructing calldata for a contract method
    CalldataConstruction(String),
    /// The relay rejected the proposal submission
    Submission(String),
    /// Error calling a contract method
    ContractInteraction(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ConfigLoad(s) => write!(f, "error loading contract registry: {}", s),
            ScriptError::ClientInitialization(s) => {
                write!(f, "error initializing client: {}", s)
            }
            ScriptError::UnknownContract(s) => write!(f, "unknown contract: {}", s),
            ScriptError::UnknownFunction(s) => write!(f, "unknown function: {}", s),
            ScriptError::ArgumentMismatch(s) => write!(f, "argument mismatch: {}", s),
            ScriptError::CalldataConstruction(s) => {
                write!(f, "error constructing calldata: {}", s)
            }
            ScriptError::Submission(s) => write!(f, "error submitting proposal: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
        }
    }
}

impl Error for ScriptError {}
