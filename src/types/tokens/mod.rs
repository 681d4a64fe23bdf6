//! Strong types for token-related values
//!
//! # Type Relationships
//!
//! ```text
//! TokenAmount (U256, raw base units)
//!     |
//!     | to_whole_tokens(TokenDecimals)   floor division by 10^decimals
//!     ↓
//! WholeTokens (I256, signed whole tokens)
//! ```

mod amount;
mod decimals;
mod whole;

pub use amount::{ParseTokenAmountError, TokenAmount};
pub use decimals::TokenDecimals;
pub use whole::WholeTokens;
