//! Definitions of CLI arguments and commands for the operator scripts

use clap::{Args, Parser, Subcommand};
use ethers::providers::Middleware;
use relay::{errors::ScriptError, interfaces::LmVersion, multisig::CallMode};

use crate::commands::{
    add_moc_pool, add_pools, add_reward_token, get_lm_address, lm_info, pool_id, set_lm_address,
    set_locked_sov, set_wrapper, transfer_sov, update_pool, ScriptContext,
};

/// The operator scripts CLI
#[derive(Parser)]
pub struct Cli {
    /// Private key of the operator account
    // TODO: Better key management
    #[arg(short, long)]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long)]
    pub rpc_url: String,

    /// Path to the per-network contract registry JSON file
    #[arg(short, long)]
    pub config_path: String,

    /// Send privileged calls directly from the operator account instead of
    /// relaying them through the multisig. Test networks only.
    #[arg(long)]
    pub direct: bool,

    /// The operator command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// The call mode selected by the global flags
    pub fn call_mode(&self) -> CallMode {
        if self.direct {
            CallMode::Direct
        } else {
            CallMode::MultisigRelay
        }
    }
}

/// The operator commands
#[derive(Subcommand)]
pub enum Command {
    /// Point one or all loan tokens at the active liquidity mining proxy
    SetLmAddress(SetLmAddressArgs),
    /// Read the liquidity mining address back from one or all loan tokens
    GetLmAddress(GetLmAddressArgs),
    /// Set the RBTC wrapper proxy on the liquidity mining contract
    SetWrapper(VersionArgs),
    /// Rewire the locked-SOV destination for reward vesting
    SetLockedSov(SetLockedSovArgs),
    /// Register the fixed list of AMM pool tokens, then update all pools
    AddPools(VersionArgs),
    /// Add the (WR)BTC/MOC pool and rebalance the config token's weight
    AddMocPool(VersionArgs),
    /// Change a single pool's allocation weight
    UpdatePool(UpdatePoolArgs),
    /// Register SOV as a reward token on the V2 contract
    AddRewardToken(AddRewardTokenArgs),
    /// Transfer SOV to the liquidity mining contract
    TransferSov(TransferSovArgs),
    /// Read the pool id of a pool token
    PoolId(PoolIdArgs),
    /// Read the pool count and wrapper address
    LmInfo(VersionArgs),
}

impl Command {
    /// Dispatch the parsed command
    pub async fn run(
        self,
        ctx: &ScriptContext<impl Middleware>,
    ) -> Result<(), ScriptError> {
        match self {
            Command::SetLmAddress(args) => set_lm_address(args, ctx).await,
            Command::GetLmAddress(args) => get_lm_address(args, ctx).await,
            Command::SetWrapper(args) => set_wrapper(args, ctx).await,
            Command::SetLockedSov(args) => set_locked_sov(args, ctx).await,
            Command::AddPools(args) => add_pools(args, ctx).await,
            Command::AddMocPool(args) => add_moc_pool(args, ctx).await,
            Command::UpdatePool(args) => update_pool(args, ctx).await,
            Command::AddRewardToken(args) => add_reward_token(args, ctx).await,
            Command::TransferSov(args) => transfer_sov(args, ctx).await,
            Command::PoolId(args) => pool_id(args, ctx).await,
            Command::LmInfo(args) => lm_info(args, ctx).await,
        }
    }
}

/// Arguments shared by commands that only select a contract generation
#[derive(Args)]
pub struct VersionArgs {
    /// The liquidity mining contract generation to target
    #[arg(short, long, default_value = "v1")]
    pub version: LmVersion,
}

/// Point loan tokens at the active liquidity mining proxy
#[derive(Args)]
pub struct SetLmAddressArgs {
    /// The liquidity mining contract generation to target
    #[arg(short, long, default_value = "v1")]
    pub version: LmVersion,

    /// Registry key of a single loan token (e.g. `iDOC`); all loan
    /// tokens when omitted
    #[arg(short, long)]
    pub loan_token: Option<String>,
}

/// Read the liquidity mining address from loan tokens
#[derive(Args)]
pub struct GetLmAddressArgs {
    /// Registry key of a single loan token; all loan tokens when omitted
    #[arg(short, long)]
    pub loan_token: Option<String>,
}

/// Rewire the locked-SOV destination.
///
/// On V1 this calls `setLockedSOV` on the liquidity mining contract; on V2
/// the locked-SOV address lives on the reward transfer logic contract and is
/// changed through `changeLockedSOV`.
#[derive(Args)]
pub struct SetLockedSovArgs {
    /// The liquidity mining contract generation to target
    #[arg(short, long, default_value = "v1")]
    pub version: LmVersion,

    /// The new locked-SOV contract address, in hex
    #[arg(short, long)]
    pub address: String,
}

/// Change a single pool's allocation weight
#[derive(Args)]
pub struct UpdatePoolArgs {
    /// The liquidity mining contract generation to target
    #[arg(short, long, default_value = "v1")]
    pub version: LmVersion,

    /// Registry key of the pool token to update
    #[arg(short, long)]
    pub pool_token: String,

    /// The pool's new allocation point
    #[arg(short, long)]
    pub allocation_point: u64,

    /// Update reward accounting for all pools in the same transaction
    #[arg(long)]
    pub with_update: bool,
}

/// Register SOV as a reward token on the V2 contract
#[derive(Args)]
pub struct AddRewardTokenArgs {
    /// SOV emission per block, in wei
    #[arg(long, default_value_t = crate::constants::SOV_REWARD_PER_BLOCK)]
    pub reward_per_block: u128,

    /// Blocks to wait before reward accrual starts
    #[arg(long, default_value_t = crate::constants::DEFAULT_START_DELAY_BLOCKS)]
    pub start_delay_blocks: u64,
}

/// Transfer SOV to the liquidity mining contract
#[derive(Args)]
pub struct TransferSovArgs {
    /// The liquidity mining contract generation receiving the funds
    #[arg(short, long, default_value = "v1")]
    pub version: LmVersion,

    /// The amount to transfer, in wei
    #[arg(short, long)]
    pub amount: String,
}

/// Read the pool id of a pool token
#[derive(Args)]
pub struct PoolIdArgs {
    /// The liquidity mining contract generation to query
    #[arg(short, long, default_value = "v1")]
    pub version: LmVersion,

    /// Registry key of the pool token to look up
    #[arg(short, long)]
    pub pool_token: String,
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use relay::{interfaces::LmVersion, multisig::CallMode};

    use super::{Cli, Command};

    #[test]
    fn test_multisig_is_the_default_mode() {
        let cli = Cli::parse_from([
            "scripts",
            "--priv-key",
            "0x01",
            "--rpc-url",
            "http://localhost:4444",
            "--config-path",
            "config/rsk-testnet.json",
            "set-wrapper",
        ]);

        assert_eq!(cli.call_mode(), CallMode::MultisigRelay);
        assert!(matches!(cli.command, Command::SetWrapper(_)));
    }

    #[test]
    fn test_version_flag() {
        let cli = Cli::parse_from([
            "scripts",
            "--priv-key",
            "0x01",
            "--rpc-url",
            "http://localhost:4444",
            "--config-path",
            "config/rsk-testnet.json",
            "--direct",
            "add-pools",
            "--version",
            "v2",
        ]);

        assert_eq!(cli.call_mode(), CallMode::Direct);
        match cli.command {
            Command::AddPools(args) => assert_eq!(args.version, LmVersion::V2),
            _ => panic!("wrong command parsed"),
        }
    }
}
