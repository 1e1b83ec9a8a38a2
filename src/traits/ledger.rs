//! Balance-keeping capability the engine runs against.
//!
//! [`Ledger`] is supplied by the host runtime.  The engine never holds
//! balances itself: pool reserves are the escrow account's balances and
//! liquidity-token supply is the ledger's total supply of the LPT denom.
//!
//! # Atomicity Contract
//!
//! Every method that takes a [`Coins`] set moves the whole set or
//! nothing.  On `Err` the ledger must be exactly as before the call.
//! The engine performs all of its own checks before the first mutating
//! call, so a ledger error can only come from the ledger itself; rollback
//! of earlier mutations in the same engine call is the host transaction's
//! job.

use crate::domain::{Address, Amount, Coins};
use crate::error::AmmError;

/// Host ledger operations consumed by the engine.
///
/// Mints and burns act directly on the named account: minting liquidity
/// tokens to a depositor is one call, not a mint to a module account
/// followed by a send.
pub trait Ledger {
    /// Moves `coins` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientFunds`] if `from` cannot cover every coin.
    fn transfer(&mut self, from: &Address, to: &Address, coins: &Coins) -> Result<(), AmmError>;

    /// Creates `coins` in `to`'s account, increasing total supply.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if a balance or supply would overflow.
    fn mint(&mut self, to: &Address, coins: &Coins) -> Result<(), AmmError>;

    /// Destroys `coins` held by `from`, decreasing total supply.
    ///
    /// # Errors
    ///
    /// [`AmmError::InsufficientFunds`] if `from` cannot cover every coin.
    fn burn(&mut self, from: &Address, coins: &Coins) -> Result<(), AmmError>;

    /// Balance of `denom` held by `address`.
    fn balance(&self, address: &Address, denom: &str) -> Amount;

    /// Total supply of `denom`.
    fn total_supply(&self, denom: &str) -> Amount;

    /// Every balance `address` may spend.
    fn spendable(&self, address: &Address) -> Coins;
}
