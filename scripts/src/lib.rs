//! Operator scripts for administering the Sovryn liquidity mining contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod constants;
mod solidity;
pub mod utils;
