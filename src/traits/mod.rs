//! Capabilities the engine consumes from its host.
//!
//! [`Ledger`] moves, mints, and burns balances; [`ParamStore`] supplies
//! validated [`Params`](crate::config::Params).  In-memory implementations
//! of both live in [`ledger`](crate::ledger).

mod ledger;
mod param_store;

pub use ledger::Ledger;
pub use param_store::ParamStore;
