//! Unified error types for the coinswap engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every variant that describes a rejected state transition
//! carries enough context (denom, requested vs. available amount) for the
//! caller to react without re-reading state.

use thiserror::Error;

use crate::domain::Amount;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;

/// Every way an engine call can be rejected.
///
/// A returned error always means the call had no visible effect on the
/// pool registry, and no ledger mutation was issued after the failing
/// check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmmError {
    /// Asset is the standard denom where it must not be, is not
    /// whitelisted, or is malformed.
    #[error("invalid denom: {0}")]
    InvalidDenom(String),

    /// No pool is registered for the given denom.
    #[error("liquidity pool not found: {0}")]
    PoolNotFound(String),

    /// The pool's standard-asset reserve would exceed the global cap.
    #[error("pool standard reserve {reserve} exceeds cap {cap}")]
    PoolCapExceeded {
        /// Standard reserve the operation would reach (or already holds).
        reserve: Amount,
        /// Configured `max_standard_coin_per_pool`.
        cap: Amount,
    },

    /// The non-standard leg of a swap exceeds its per-swap ceiling.
    #[error("swap amount {amount}{denom} exceeds limit {limit}{denom}")]
    SwapLimitExceeded {
        /// Counterparty denom being swapped.
        denom: String,
        /// Settled amount of that denom.
        amount: Amount,
        /// Configured ceiling.
        limit: Amount,
    },

    /// A caller-supplied minimum or maximum bound was violated.
    #[error("slippage exceeded: {bound} bound {expected}, computed {actual}")]
    SlippageExceeded {
        /// Which bound failed (`"min"` or `"max"`) and what it guards.
        bound: &'static str,
        /// The caller's bound.
        expected: Amount,
        /// The amount the engine computed.
        actual: Amount,
    },

    /// A balance or reserve is smaller than required.
    #[error("insufficient funds: required {required}{denom}, available {available}{denom}")]
    InsufficientFunds {
        /// Denom that is short.
        denom: String,
        /// Amount required.
        required: Amount,
        /// Amount available.
        available: Amount,
    },

    /// A pricing precondition failed (zero reserve, or output not below
    /// the output reserve).
    #[error("insufficient reserve: {0}")]
    InsufficientReserve(&'static str),

    /// The request arrived after its deadline.
    #[error("deadline {deadline} expired at block time {block_time}")]
    DeadlineExpired {
        /// Caller-supplied deadline (unix seconds).
        deadline: i64,
        /// Current block time (unix seconds).
        block_time: i64,
    },

    /// A swap must have the standard denom on exactly one side.
    #[error("swap {input} -> {output} must involve the standard denom on exactly one side")]
    MissingStandardDenom {
        /// Input denom.
        input: String,
        /// Output denom.
        output: String,
    },

    /// An address could not be parsed.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Parameters failed validation.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Genesis state failed validation.
    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    /// A quantity is zero or otherwise out of range for the request.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl AmmError {
    /// Shorthand for [`AmmError::InsufficientFunds`].
    pub(crate) fn insufficient(denom: &str, required: Amount, available: Amount) -> Self {
        Self::InsufficientFunds {
            denom: denom.to_owned(),
            required,
            available,
        }
    }
}
