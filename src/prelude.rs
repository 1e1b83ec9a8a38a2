//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_coinswap::prelude::*;
//! ```

pub use crate::config::{GenesisState, Params};
pub use crate::domain::{
    Address, Amount, Coin, Coins, Decimal, Denom, Input, MsgAddLiquidity, MsgRemoveLiquidity,
    MsgSwapOrder, Output, Pool, PoolId, Rounding, WithdrawnCoins,
};
pub use crate::engine::{Coinswap, PoolInfo};
pub use crate::error::{AmmError, Result};
pub use crate::ledger::{MemoryLedger, MemoryParamStore};
pub use crate::math::CheckedArithmetic;
pub use crate::pools::PoolRegistry;
pub use crate::traits::{Ledger, ParamStore};
