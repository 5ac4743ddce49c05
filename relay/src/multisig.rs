//! Submission of encoded calls, either as pending proposals on the multisig
//! wallet (the production path) or directly from the operator account
//! (test networks only).

use std::sync::Arc;

use ethers::{
    abi::Token,
    providers::Middleware,
    types::{Bytes, TransactionRequest, U256},
};
use tracing::{info, warn};

use crate::{
    calldata::{build_call, EncodedCall},
    errors::ScriptError,
    interfaces::{InterfaceSet, MULTISIG_KEY},
    registry::ContractRegistry,
};

/// Typed binding for the multisig wallet's proposal entry point
mod bindings {
    use ethers::contract::abigen;

    abigen!(
        MultisigWallet,
        r#"[
            function submitTransaction(address destination, uint256 value, bytes data) public returns (uint256 transactionId)
        ]"#
    );
}

use bindings::MultisigWallet;

/// How a privileged call reaches the target contract
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallMode {
    /// Record the encoded call as a pending proposal on the multisig wallet,
    /// to be approved and executed by the multisig holders
    MultisigRelay,
    /// Send the encoded call directly from the operator account; only
    /// meaningful on test networks where the operator still owns the contracts
    Direct,
}

/// Submit an already-encoded call through the configured mode.
///
/// The multisig records the proposal and owns its approval/execution
/// lifecycle from here on; repeated submissions of the same call produce
/// independent pending proposals.
pub async fn submit_call<M: Middleware>(
    client: Arc<M>,
    registry: &ContractRegistry,
    call: EncodedCall,
    mode: CallMode,
) -> Result<(), ScriptError> {
    match mode {
        CallMode::MultisigRelay => {
            let multisig_address = registry.address_of(MULTISIG_KEY)?;
            let multisig = MultisigWallet::new(multisig_address, client);

            let receipt = multisig
                .submit_transaction(call.to, U256::zero(), Bytes::from(call.data))
                .send()
                .await
                .map_err(|e| ScriptError::Submission(e.to_string()))?
                .await
                .map_err(|e| ScriptError::Submission(e.to_string()))?;

            if let Some(receipt) = receipt {
                info!(
                    "proposal for {:#x} submitted to multisig in tx {:#x}",
                    call.to, receipt.transaction_hash,
                );
            }
        }
        CallMode::Direct => {
            warn!(
                "Sending direct call to {:#x} - THIS SHOULD ONLY BE DONE ON TEST NETWORKS",
                call.to,
            );

            let tx = TransactionRequest::new().to(call.to).data(call.data);
            client
                .send_transaction(tx, None /* block */)
                .await
                .map_err(|e| ScriptError::Submission(e.to_string()))?
                .await
                .map_err(|e| ScriptError::Submission(e.to_string()))?;
        }
    }

    Ok(())
}

/// Encode a call to `function_name` on the named contract and submit it
/// through the configured mode.
///
/// Registry resolution, function lookup, and argument validation all happen
/// before any submission is attempted; a validation failure is a no-op.
pub async fn propose_call<M: Middleware>(
    client: Arc<M>,
    registry: &ContractRegistry,
    interfaces: &InterfaceSet,
    contract_name: &str,
    function_name: &str,
    args: &[Token],
    mode: CallMode,
) -> Result<(), ScriptError> {
    let call = build_call(registry, interfaces, contract_name, function_name, args)?;
    info!(
        "calldata for {}.{}: 0x{}",
        contract_name,
        function_name,
        hex::encode(&call.data),
    );

    submit_call(client, registry, call, mode).await
}
