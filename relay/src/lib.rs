//! Core primitives for administering the Sovryn liquidity mining contracts:
//! the per-network contract registry, the per-version interface description
//! tables, calldata construction, and multisig-relayed submission.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod calldata;
pub mod errors;
pub mod interfaces;
pub mod multisig;
pub mod registry;
