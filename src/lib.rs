//! # Hydra Coinswap
//!
//! Hub-and-spoke coinswap engine: pools between one standard asset and
//! whitelisted counterparty assets, proportional liquidity provision, and
//! constant-product swaps with a fee taken from the input leg.
//!
//! Balances live in a host-supplied [`Ledger`](traits::Ledger);
//! parameters come from a [`ParamStore`](traits::ParamStore).  Every
//! state transition runs all of its checks before issuing the first
//! ledger mutation, so a rejected call has no effect.
//!
//! # Quick Start
//!
//! ```rust
//! use hydra_coinswap::prelude::*;
//!
//! let stake = Denom::new("stake").expect("denom");
//! let btc = Denom::new("btc").expect("denom");
//!
//! // 1. Whitelist btc with a per-swap ceiling
//! let mut caps = Coins::new();
//! caps.insert(btc.clone(), Amount::new(1_000));
//! let params = Params::new(
//!     "0.003".parse().expect("fee"),
//!     Coin::zero(stake.clone()),
//!     Decimal::ZERO,
//!     Amount::new(1_000_000),
//!     caps,
//! )
//! .expect("valid params");
//! let mut engine =
//!     Coinswap::new(stake.clone(), MemoryParamStore::new(params).expect("store")).expect("engine");
//!
//! // 2. Fund an account and seed the pool
//! let alice = Address::module("alice");
//! let mut ledger = MemoryLedger::new();
//! ledger.fund(&alice, &stake, Amount::new(2_000)).expect("fund");
//! ledger.fund(&alice, &btc, Amount::new(1_000)).expect("fund");
//! let add = MsgAddLiquidity {
//!     max_token: Coin::new(btc.clone(), 1_000u128),
//!     exact_standard_amt: Amount::new(1_000),
//!     min_liquidity: Amount::ZERO,
//!     deadline: 100,
//!     sender: alice,
//! };
//! engine.add_liquidity(&mut ledger, &add, 1).expect("pool seeded");
//!
//! // 3. Sell 100 stake for at least 90 btc
//! let order = MsgSwapOrder {
//!     input: Input { address: alice, coin: Coin::new(stake, 100u128) },
//!     output: Output { address: alice, coin: Coin::new(btc, 90u128) },
//!     deadline: 100,
//!     is_buy_order: false,
//! };
//! let received = engine.swap(&mut ledger, &order, 1).expect("swapped");
//! assert_eq!(received, Amount::new(90));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Caller     │  builds MsgAddLiquidity / MsgRemoveLiquidity / MsgSwapOrder
//! └──────┬──────┘
//!        │ &mut Ledger, block_time
//!        ▼
//! ┌─────────────┐
//! │  Coinswap    │  reads Params once, validates, resolves the pool
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │    Pools     │  registry, liquidity engine, swap engine
//! └──────┬──────┘
//!        │ pricing formulas
//!        ▼
//! ┌─────────────┐
//! │ Math/Domain  │  Amount, Decimal, Denom, Coins, 256-bit intermediates
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Value types: [`Amount`](domain::Amount), [`Denom`](domain::Denom), [`Coins`](domain::Coins), messages |
//! | [`math`]   | Checked arithmetic and the constant-product formulas |
//! | [`config`] | [`Params`](config::Params) and [`GenesisState`](config::GenesisState) |
//! | [`pools`]  | [`PoolRegistry`](pools::PoolRegistry), liquidity and swap engines |
//! | [`engine`] | The [`Coinswap`](engine::Coinswap) facade and queries |
//! | [`traits`] | Host capabilities: [`Ledger`](traits::Ledger), [`ParamStore`](traits::ParamStore) |
//! | [`ledger`] | In-memory [`MemoryLedger`](ledger::MemoryLedger) and [`MemoryParamStore`](ledger::MemoryParamStore) |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports |

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod traits;
