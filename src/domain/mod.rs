//! Fundamental domain value types used throughout the engine.
//!
//! Amounts, decimals, denoms, addresses, coins, pool records, and the
//! request messages.  All types use newtypes with validated constructors
//! to enforce invariants at the edges.

mod address;
mod amount;
mod coin;
mod decimal;
mod denom;
mod msgs;
mod pool;
mod rounding;

pub use address::{Address, ADDRESS_LEN};
pub use amount::Amount;
pub use coin::{Coin, Coins};
pub use decimal::{Decimal, DECIMAL_PRECISION, DECIMAL_SCALE};
pub use denom::{Denom, LPT_PREFIX};
pub use msgs::{
    check_deadline, Input, MsgAddLiquidity, MsgRemoveLiquidity, MsgSwapOrder, Output,
    WithdrawnCoins,
};
pub use pool::{Pool, PoolId};
pub use rounding::Rounding;
