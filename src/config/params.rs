//! Engine parameters: swap fee, pool creation fee, and risk caps.

use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Coin, Coins, Decimal, Denom};
use crate::error::AmmError;

/// Standard denom used when genesis does not name one.
pub const DEFAULT_STANDARD_DENOM: &str = "stake";

/// Default per-pool cap on the standard reserve: 10 000 units at 18 decimals.
pub const DEFAULT_MAX_STANDARD_COIN_PER_POOL: u128 = 10_000 * 1_000_000_000_000_000_000;

/// Global, governance-owned parameters read at the start of every call.
///
/// # Validation
///
/// - `fee` and `tax_rate` lie in `[0, 1)`.
/// - `max_standard_coin_per_pool` is positive.
///
/// Denoms and amounts need no further checks: [`Denom`] is validated on
/// construction and deserialization, and [`Amount`] is unsigned.
///
/// `max_swap_amount` doubles as the asset whitelist: only denoms listed
/// there with a positive ceiling may be pooled or swapped, and the
/// ceiling bounds the non-standard leg of a single swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    fee: Decimal,
    pool_creation_fee: Coin,
    tax_rate: Decimal,
    max_standard_coin_per_pool: Amount,
    max_swap_amount: Coins,
}

impl Params {
    /// Creates and validates a parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidParams`] if any rule above is broken.
    pub fn new(
        fee: Decimal,
        pool_creation_fee: Coin,
        tax_rate: Decimal,
        max_standard_coin_per_pool: Amount,
        max_swap_amount: Coins,
    ) -> Result<Self, AmmError> {
        let params = Self {
            fee,
            pool_creation_fee,
            tax_rate,
            max_standard_coin_per_pool,
            max_swap_amount,
        };
        params.validate()?;
        Ok(params)
    }

    /// Validates all parameter invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidParams`] naming the offending field.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.fee >= Decimal::ONE {
            return Err(AmmError::InvalidParams(format!(
                "fee must be in [0, 1), got {}",
                self.fee
            )));
        }
        if self.tax_rate >= Decimal::ONE {
            return Err(AmmError::InvalidParams(format!(
                "tax rate must be in [0, 1), got {}",
                self.tax_rate
            )));
        }
        if self.max_standard_coin_per_pool.is_zero() {
            return Err(AmmError::InvalidParams(
                "max standard coin per pool must be positive".to_owned(),
            ));
        }
        Ok(())
    }

    /// Swap fee, deducted from the input leg.
    #[must_use]
    pub const fn fee(&self) -> Decimal {
        self.fee
    }

    /// Fee charged to whoever creates a new pool.
    #[must_use]
    pub const fn pool_creation_fee(&self) -> &Coin {
        &self.pool_creation_fee
    }

    /// Tax rate, validated and carried for the host; the engine does not
    /// apply it.
    #[must_use]
    pub const fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    /// Cap on any pool's standard reserve.
    pub const fn max_standard_coin_per_pool(&self) -> Amount {
        self.max_standard_coin_per_pool
    }

    /// The whole whitelist with per-swap ceilings.
    #[must_use]
    pub const fn max_swap_amount(&self) -> &Coins {
        &self.max_swap_amount
    }

    /// Per-swap ceiling for `denom`, or `None` if it is not listed.
    #[must_use]
    pub fn swap_limit(&self, denom: &str) -> Option<Amount> {
        self.max_swap_amount.get(denom)
    }

    /// Returns `true` if `denom` is listed with a positive ceiling.
    #[must_use]
    pub fn is_whitelisted(&self, denom: &str) -> bool {
        self.swap_limit(denom).is_some_and(|cap| cap.is_positive())
    }
}

impl Default for Params {
    /// Fee 0.3%, free pool creation in [`DEFAULT_STANDARD_DENOM`], no tax,
    /// [`DEFAULT_MAX_STANDARD_COIN_PER_POOL`], and an empty whitelist.
    fn default() -> Self {
        Self {
            fee: Decimal::from_raw(3_000_000_000_000_000),
            pool_creation_fee: Coin::zero(Denom::known(DEFAULT_STANDARD_DENOM)),
            tax_rate: Decimal::ZERO,
            max_standard_coin_per_pool: Amount::new(DEFAULT_MAX_STANDARD_COIN_PER_POOL),
            max_swap_amount: Coins::new(),
        }
    }
}
