//! Implementations of the operator commands.
//!
//! Every privileged call goes through the relay's `propose_call`; reads use
//! the typed bindings in `solidity.rs` and never touch the multisig.

use std::{str::FromStr, sync::Arc};

use ethers::{
    abi::{Address, Token},
    providers::Middleware,
    types::U256,
};
use relay::{
    errors::ScriptError,
    interfaces::{
        InterfaceSet, LmVersion, AMM_POOL_TOKEN_KEYS, CONFIG_TOKEN_KEY, LOAN_TOKEN_KEYS,
        LOCKED_SOV_TRANSFER_LOGIC_KEY, MOC_POOL_TOKEN_KEY, SOV_KEY, WRAPPER_KEY,
    },
    multisig::{propose_call, CallMode},
    registry::ContractRegistry,
};
use tracing::info;

use crate::{
    cli::{
        AddRewardTokenArgs, GetLmAddressArgs, PoolIdArgs, SetLmAddressArgs, SetLockedSovArgs,
        TransferSovArgs, UpdatePoolArgs, VersionArgs,
    },
    constants::{config_token_allocation_point, ALLOCATION_POINT_DEFAULT},
    solidity::{LiquidityMining, LoanToken},
};

/// Everything a command needs, constructed once at startup and passed by
/// reference into every operation
pub struct ScriptContext<M> {
    /// The RPC client, signing as the operator account
    pub client: Arc<M>,
    /// The per-network contract registry, read-only after load
    pub registry: ContractRegistry,
    /// How privileged calls reach their targets
    pub mode: CallMode,
}

/// Point one or all loan tokens at the active liquidity mining proxy
pub async fn set_lm_address<M: Middleware>(
    args: SetLmAddressArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let lm_address = ctx.registry.address_of(args.version.lm_key())?;

    let targets: Vec<String> = match args.loan_token {
        Some(key) => vec![key],
        None => LOAN_TOKEN_KEYS.iter().map(|k| k.to_string()).collect(),
    };

    for key in targets {
        info!("setting {} liquidity mining address on {}", args.version, key);
        propose_call(
            ctx.client.clone(),
            &ctx.registry,
            &interfaces,
            &key,
            "setLiquidityMiningAddress",
            &[Token::Address(lm_address)],
            ctx.mode,
        )
        .await?;
    }

    Ok(())
}

/// Read the liquidity mining address back from one or all loan tokens
pub async fn get_lm_address<M: Middleware>(
    args: GetLmAddressArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let targets: Vec<String> = match args.loan_token {
        Some(key) => vec![key],
        None => LOAN_TOKEN_KEYS.iter().map(|k| k.to_string()).collect(),
    };

    for key in targets {
        let loan_token = LoanToken::new(ctx.registry.address_of(&key)?, ctx.client.clone());

        let lm_address = loan_token
            .liquidity_mining_address()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        info!("{}: liquidityMiningAddress {:#x}", key, lm_address);
    }

    Ok(())
}

/// Set the RBTC wrapper proxy on the liquidity mining contract
pub async fn set_wrapper<M: Middleware>(
    args: VersionArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let wrapper = ctx.registry.address_of(WRAPPER_KEY)?;

    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        args.version.lm_key(),
        "setWrapper",
        &[Token::Address(wrapper)],
        ctx.mode,
    )
    .await
}

/// Rewire the locked-SOV destination for reward vesting
pub async fn set_locked_sov<M: Middleware>(
    args: SetLockedSovArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let new_locked_sov = Address::from_str(&args.address)
        .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

    // V1 keeps the locked-SOV address on the mining contract itself; V2
    // moved it to the reward transfer logic contract
    let (contract_name, function_name) = match args.version {
        LmVersion::V1 => (args.version.lm_key(), "setLockedSOV"),
        LmVersion::V2 => (LOCKED_SOV_TRANSFER_LOGIC_KEY, "changeLockedSOV"),
    };

    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        contract_name,
        function_name,
        &[Token::Address(new_locked_sov)],
        ctx.mode,
    )
    .await
}

/// Build the version-appropriate argument list for `add`/`update` on the
/// liquidity mining contract
fn pool_weight_args(
    version: LmVersion,
    registry: &ContractRegistry,
    pool_token: Address,
    allocation_point: u64,
    with_update: bool,
) -> Result<Vec<Token>, ScriptError> {
    let args = match version {
        LmVersion::V1 => vec![
            Token::Address(pool_token),
            Token::Uint(U256::from(allocation_point)),
            Token::Bool(with_update),
        ],
        LmVersion::V2 => {
            let sov = registry.address_of(SOV_KEY)?;
            vec![
                Token::Address(pool_token),
                Token::Array(vec![Token::Address(sov)]),
                Token::Array(vec![Token::Uint(U256::from(allocation_point))]),
                Token::Bool(with_update),
            ]
        }
    };

    Ok(args)
}

/// Register the fixed list of AMM pool tokens at the default weight,
/// then update reward accounting for all pools once
pub async fn add_pools<M: Middleware>(
    args: VersionArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let lm_key = args.version.lm_key();

    // withUpdate can stay false while mining has not started yet
    for (i, key) in AMM_POOL_TOKEN_KEYS.iter().enumerate() {
        info!("adding pool {} ({})", i, key);
        let pool_token = ctx.registry.address_of(key)?;
        let call_args = pool_weight_args(
            args.version,
            &ctx.registry,
            pool_token,
            ALLOCATION_POINT_DEFAULT,
            false,
        )?;

        propose_call(
            ctx.client.clone(),
            &ctx.registry,
            &interfaces,
            lm_key,
            "add",
            &call_args,
            ctx.mode,
        )
        .await?;
    }

    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        lm_key,
        "updateAllPools",
        &[],
        ctx.mode,
    )
    .await
}

/// Add the (WR)BTC/MOC pool at the default weight and hand the rest of the
/// emission scale back to the config token
pub async fn add_moc_pool<M: Middleware>(
    args: VersionArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let lm_key = args.version.lm_key();

    let config_token_allocation = config_token_allocation_point();
    info!("ALLOCATION_POINT_CONFIG_TOKEN: {}", config_token_allocation);

    let moc_pool = ctx.registry.address_of(MOC_POOL_TOKEN_KEY)?;
    let add_args = pool_weight_args(
        args.version,
        &ctx.registry,
        moc_pool,
        ALLOCATION_POINT_DEFAULT,
        false,
    )?;
    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        lm_key,
        "add",
        &add_args,
        ctx.mode,
    )
    .await?;

    let config_token = ctx.registry.address_of(CONFIG_TOKEN_KEY)?;
    let update_args = pool_weight_args(
        args.version,
        &ctx.registry,
        config_token,
        config_token_allocation,
        true,
    )?;
    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        lm_key,
        "update",
        &update_args,
        ctx.mode,
    )
    .await
}

/// Change a single pool's allocation weight
pub async fn update_pool<M: Middleware>(
    args: UpdatePoolArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let pool_token = ctx.registry.address_of(&args.pool_token)?;

    let call_args = pool_weight_args(
        args.version,
        &ctx.registry,
        pool_token,
        args.allocation_point,
        args.with_update,
    )?;

    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        args.version.lm_key(),
        "update",
        &call_args,
        ctx.mode,
    )
    .await
}

/// Register SOV as a reward token on the V2 contract, wiring in the
/// locked-SOV reward transfer logic
pub async fn add_reward_token<M: Middleware>(
    args: AddRewardTokenArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(LmVersion::V2);
    let sov = ctx.registry.address_of(SOV_KEY)?;
    let transfer_logic = ctx.registry.address_of(LOCKED_SOV_TRANSFER_LOGIC_KEY)?;

    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        LmVersion::V2.lm_key(),
        "addRewardToken",
        &[
            Token::Address(sov),
            Token::Uint(U256::from(args.reward_per_block)),
            Token::Uint(U256::from(args.start_delay_blocks)),
            Token::Address(transfer_logic),
        ],
        ctx.mode,
    )
    .await
}

/// Transfer SOV to the liquidity mining contract
pub async fn transfer_sov<M: Middleware>(
    args: TransferSovArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let interfaces = InterfaceSet::new(args.version);
    let lm_address = ctx.registry.address_of(args.version.lm_key())?;
    let amount = crate::utils::parse_wei(&args.amount)?;

    propose_call(
        ctx.client.clone(),
        &ctx.registry,
        &interfaces,
        SOV_KEY,
        "transfer",
        &[Token::Address(lm_address), Token::Uint(amount)],
        ctx.mode,
    )
    .await
}

/// Read the pool id of a pool token
pub async fn pool_id<M: Middleware>(
    args: PoolIdArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let lm = LiquidityMining::new(
        ctx.registry.address_of(args.version.lm_key())?,
        ctx.client.clone(),
    );
    let pool_token = ctx.registry.address_of(&args.pool_token)?;

    let id = lm
        .get_pool_id(pool_token)
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    info!("pool id of {}: {}", args.pool_token, id);
    Ok(())
}

/// Read the pool count and wrapper address from the liquidity mining contract
pub async fn lm_info<M: Middleware>(
    args: VersionArgs,
    ctx: &ScriptContext<M>,
) -> Result<(), ScriptError> {
    let lm = LiquidityMining::new(
        ctx.registry.address_of(args.version.lm_key())?,
        ctx.client.clone(),
    );

    let pool_length = lm
        .get_pool_length()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
    let wrapper = lm
        .wrapper()
        .call()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    info!("pool count: {}, wrapper: {:#x}", pool_length, wrapper);
    Ok(())
}
