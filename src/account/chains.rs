//! Chain identifiers understood by the account service.

pub const ETHEREUM_MAINNET: u64 = 1;
pub const BSC_MAINNET: u64 = 56;
pub const POLYGON_MAINNET: u64 = 137;
pub const BASE_MAINNET: u64 = 8453;
pub const ARBITRUM_MAINNET: u64 = 42161;
pub const SOLANA_MAINNET: u64 = 101;

/// Short display name for a chain id
pub fn chain_name(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        ETHEREUM_MAINNET => Some("Ethereum"),
        BSC_MAINNET => Some("BNB Chain"),
        POLYGON_MAINNET => Some("Polygon"),
        BASE_MAINNET => Some("Base"),
        ARBITRUM_MAINNET => Some("Arbitrum"),
        SOLANA_MAINNET => Some("Solana"),
        _ => None,
    }
}
