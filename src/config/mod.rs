//! Engine configuration: validated [`Params`] and the [`GenesisState`]
//! used to bootstrap or export an engine.
//!
//! There are no configuration files or environment variables; the host
//! supplies params through a [`ParamStore`](crate::traits::ParamStore)
//! and persists genesis wherever it likes.

mod genesis;
mod params;

pub use genesis::{GenesisState, INITIAL_SEQUENCE};
pub use params::{Params, DEFAULT_MAX_STANDARD_COIN_PER_POOL, DEFAULT_STANDARD_DENOM};
