//! Pool registry and the two engines operating on registered pools.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`registry`] | identity derivation, sequence counter, lookups |
//! | [`liquidity`] | proportional add and remove |
//! | [`swap`] | hub-and-spoke exact-input and exact-output trades |

pub mod liquidity;
pub mod registry;
pub mod swap;

#[cfg(test)]
mod proptest_properties;

pub(crate) use liquidity::{add_liquidity, remove_liquidity};
pub use liquidity::{
    bootstrap_deposit, proportional_deposit, proportional_withdrawal, reserves, Deposit, Reserves,
    FEE_COLLECTOR,
};
pub use registry::{lpt_denom, pool_id, reserve_address, PoolRegistry};
pub(crate) use swap::{swap, trade_exact_input_for_output, trade_input_for_exact_output};
pub use swap::{quote_exact_input, quote_exact_output, resolve_pool};
