//! Typed bindings for the read-only contract views used by the scripts

use ethers::contract::abigen;

abigen!(
    LoanToken,
    r#"[
        function liquidityMiningAddress() external view returns (address)
    ]"#
);

abigen!(
    LiquidityMining,
    r#"[
        function getPoolId(address poolToken) external view returns (uint256)
        function getPoolLength() external view returns (uint256)
        function wrapper() external view returns (address)
    ]"#
);
