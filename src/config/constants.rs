//! Well-known addresses and constants
//!
//! This module centralizes the defaults the tracker ships with: upstream
//! endpoints, timing values, and the excluded wallets of the deployed BSC
//! tracker.

use std::time::Duration;

/// Etherscan v2 multichain API endpoint
pub const ETHERSCAN_V2_API_URL: &str = "https://api.etherscan.io/v2/api";

/// BscScan explorer, used for per-holder token links
pub const BSCSCAN_EXPLORER_URL: &str = "https://bscscan.com";

/// Default cache lifetime for every metric key
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(600);

/// Default minimum spacing between consecutive upstream queries
///
/// The free Etherscan tier allows a handful of calls per second.
pub const DEFAULT_RATE_LIMIT_DELAY: Duration = Duration::from_millis(250);

/// Default per-request HTTP timeout
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Excluded (non-circulating) wallets: `(address, chain, category, description)`
pub const DEFAULT_EXCLUDED_ADDRESSES: &[(&str, &str, &str, &str)] = &[
    (
        "0xa555b81736a9b1376dfcaa3bcbbeb56da4882b11",
        "BSC",
        "ChainGPT Pad IDO Vesting",
        "IDO Round (ref: tokenomics)",
    ),
    (
        "0x7292d76f371dF773d5BAeAe038b4281fF3f33215",
        "BSC",
        "Trust, Zealy, Airdrops",
        "Airdrop Round (ref: tokenomics)",
    ),
    (
        "0x7ae1705cdae974a9dfc165fe01cbeab646ab5296",
        "BSC",
        "TeamFinance Vesting",
        "Liquidity Round (ref: tokenomics)",
    ),
    (
        "0x549d26f0f827a7e13f9f9a7defc30542af754c40",
        "BSC",
        "TeamFinance Vesting",
        "Pre-Seed Round (ref: tokenomics)",
    ),
    (
        "0xab954a5f63e6543f7b7768ce2318d2e8f0c27742",
        "BSC",
        "TeamFinance Vesting",
        "Seed Round (ref: tokenomics)",
    ),
    (
        "0x5af9e219c222670ea308ed028888862e38467eb1",
        "BSC",
        "TeamFinance Vesting",
        "Team Round (ref: tokenomics)",
    ),
    (
        "0x3666749f39bc5e92bdc44b8ef5f63fdb70b7aadc",
        "BSC",
        "TeamFinance Vesting",
        "Advisors Round (ref: tokenomics)",
    ),
    (
        "0x162e2ace8563a62dd4c5e85d775b51275fefb023",
        "BSC",
        "TeamFinance Vesting",
        "Early-Supporters Round (ref: tokenomics)",
    ),
    (
        "0xca2297fd2b8acd4b064ed5a279f7575d0801ddc8",
        "BSC",
        "TeamFinance Vesting",
        "Development & Marketing Round (ref: tokenomics)",
    ),
    (
        "0x9b11579c3f43cbf9a21d1e2dd290c7b76f497224",
        "BSC",
        "TeamFinance Vesting",
        "Ecosystem Incentives Round (ref: tokenomics)",
    ),
    (
        "0xd00332c4c11301d23012d3cd883afa02603476f1",
        "BSC",
        "Decubate Vesting",
        "Misc: KOLs, Airdrops, other (ref: tokenomics)",
    ),
];
