//! Constants used in the operator scripts

/// The sum of all allocation points across pool tokens, chosen so the scale
/// reads as 100M. A pool's weight is its allocation point divided by this sum.
pub const MAX_ALLOCATION_POINT: u64 = 100_000 * 1000;

/// The allocation point of the (WR)BTC/SOV pool
pub const ALLOCATION_POINT_BTC_SOV: u64 = 30_000;

/// The allocation point of the (WR)BTC/ETH pool
pub const ALLOCATION_POINT_BTC_ETH: u64 = 35_000;

/// The allocation point given to the remaining pools:
/// (WR)BTC/USDT1 | (WR)BTC/USDT2 | (WR)BTC/DOC1 | (WR)BTC/DOC2 |
/// (WR)BTC/BPRO1 | (WR)BTC/BPRO2 | (WR)BTC/MOC
pub const ALLOCATION_POINT_DEFAULT: u64 = 1;

/// The number of pools carrying the default allocation point
pub const NUM_DEFAULT_WEIGHT_POOLS: u64 = 7;

/// SOV reward emission per block, in wei.
///
/// 4.9604 SOV/block * 2880 blocks/day * 7 days = 100001.664, i.e. ~100M
/// per week at the 1000x scale.
pub const SOV_REWARD_PER_BLOCK: u128 = 49_604 * 10u128.pow(14) * 1000;

/// Approximate blocks per day, assuming 30s blocks
pub const BLOCKS_PER_DAY: u64 = 2740;

/// Approximate blocks per hour, assuming 30s blocks
pub const BLOCKS_PER_HOUR: u64 = 114;

/// The default delay before reward accrual starts, in blocks
pub const DEFAULT_START_DELAY_BLOCKS: u64 = 3 * BLOCKS_PER_DAY - 2 * BLOCKS_PER_HOUR;

/// The allocation point parked on the config token: whatever the named pools
/// leave unclaimed of [`MAX_ALLOCATION_POINT`]
pub fn config_token_allocation_point() -> u64 {
    MAX_ALLOCATION_POINT
        - ALLOCATION_POINT_BTC_SOV
        - ALLOCATION_POINT_BTC_ETH
        - ALLOCATION_POINT_DEFAULT * NUM_DEFAULT_WEIGHT_POOLS
}

#[cfg(test)]
mod tests {
    use super::config_token_allocation_point;

    #[test]
    fn test_config_token_allocation_point() {
        // 100M scale minus the SOV, ETH, and seven default-weight pools
        assert_eq!(config_token_allocation_point(), 99_934_993);
    }
}
