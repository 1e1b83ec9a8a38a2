//! Requests accepted by the engine's three state transitions.
//!
//! Each message has a stateless [`validate_basic`](MsgSwapOrder::validate_basic)
//! that the transaction boundary may run before the engine sees it; the
//! engine runs it again on entry.

use serde::{Deserialize, Serialize};

use super::{Address, Amount, Coin};
use crate::error::{AmmError, Result};

/// Fails with [`AmmError::DeadlineExpired`] once `block_time` is past
/// `deadline`.  A request whose deadline equals the block time is still
/// accepted.
pub fn check_deadline(deadline: i64, block_time: i64) -> Result<()> {
    if block_time > deadline {
        return Err(AmmError::DeadlineExpired {
            deadline,
            block_time,
        });
    }
    Ok(())
}

fn positive_deadline(deadline: i64) -> Result<()> {
    if deadline <= 0 {
        return Err(AmmError::InvalidQuantity("deadline must be a positive unix time"));
    }
    Ok(())
}

/// Deposit liquidity into the pool of `max_token.denom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAddLiquidity {
    /// Counterparty coin; its amount is the most the sender will deposit.
    pub max_token: Coin,
    /// Standard amount to deposit (capped by the pool's headroom).
    pub exact_standard_amt: Amount,
    /// Fewest liquidity tokens the sender accepts.
    pub min_liquidity: Amount,
    /// Unix time after which the request is void.
    pub deadline: i64,
    /// Depositor; receives the minted liquidity tokens.
    pub sender: Address,
}

impl MsgAddLiquidity {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] for a zero deposit or non-positive deadline.
    /// - [`AmmError::InvalidDenom`] if `max_token` is a liquidity token.
    pub fn validate_basic(&self) -> Result<()> {
        if !self.max_token.is_positive() {
            return Err(AmmError::InvalidQuantity("max token amount must be positive"));
        }
        if self.max_token.denom.is_lpt() {
            return Err(AmmError::InvalidDenom(format!(
                "liquidity token {} cannot be pooled",
                self.max_token.denom
            )));
        }
        if !self.exact_standard_amt.is_positive() {
            return Err(AmmError::InvalidQuantity("standard amount must be positive"));
        }
        positive_deadline(self.deadline)
    }
}

/// Redeem liquidity tokens for a pro-rata share of both reserves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRemoveLiquidity {
    /// Fewest counterparty tokens the sender accepts.
    pub min_token: Amount,
    /// Liquidity tokens to burn; the denom selects the pool.
    pub withdraw_liquidity: Coin,
    /// Fewest standard tokens the sender accepts.
    pub min_standard_amt: Amount,
    /// Unix time after which the request is void.
    pub deadline: i64,
    /// Holder of the liquidity tokens; receives the payout.
    pub sender: Address,
}

impl MsgRemoveLiquidity {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] for a zero withdrawal or non-positive deadline.
    /// - [`AmmError::InvalidDenom`] if the withdrawn denom is not `lpt-{n}`.
    pub fn validate_basic(&self) -> Result<()> {
        if !self.withdraw_liquidity.is_positive() {
            return Err(AmmError::InvalidQuantity("withdraw liquidity must be positive"));
        }
        if !self.withdraw_liquidity.denom.is_lpt() {
            return Err(AmmError::InvalidDenom(format!(
                "{} is not a liquidity token",
                self.withdraw_liquidity.denom
            )));
        }
        positive_deadline(self.deadline)
    }
}

/// The paying side of a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// Account that pays.
    pub address: Address,
    /// Exact amount sold (sell order) or most the payer will spend (buy order).
    pub coin: Coin,
}

/// The receiving side of a swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    /// Account that receives; may differ from the payer.
    pub address: Address,
    /// Fewest tokens accepted (sell order) or exact amount bought (buy order).
    pub coin: Coin,
}

/// A single hub-and-spoke swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSwapOrder {
    /// Paying side.
    pub input: Input,
    /// Receiving side.
    pub output: Output,
    /// Unix time after which the request is void.
    pub deadline: i64,
    /// `true`: exact output, bounded input.  `false`: exact input, bounded output.
    pub is_buy_order: bool,
}

impl MsgSwapOrder {
    /// Stateless checks.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidQuantity`] for zero amounts or a non-positive deadline.
    /// - [`AmmError::InvalidDenom`] for liquidity-token legs or identical denoms.
    pub fn validate_basic(&self) -> Result<()> {
        for coin in [&self.input.coin, &self.output.coin] {
            if !coin.is_positive() {
                return Err(AmmError::InvalidQuantity("swap amounts must be positive"));
            }
            if coin.denom.is_lpt() {
                return Err(AmmError::InvalidDenom(format!(
                    "liquidity token {} cannot be swapped",
                    coin.denom
                )));
            }
        }
        if self.input.coin.denom == self.output.coin.denom {
            return Err(AmmError::InvalidDenom(format!(
                "cannot swap {} for itself",
                self.input.coin.denom
            )));
        }
        positive_deadline(self.deadline)
    }
}

/// Coins paid out by a liquidity withdrawal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawnCoins {
    /// Standard-asset payout.
    pub standard: Coin,
    /// Counterparty payout.
    pub token: Coin,
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Denom;

    fn coin(s: &str, amount: u128) -> Coin {
        let Ok(d) = Denom::new(s) else {
            panic!("valid denom {s}");
        };
        Coin::new(d, amount)
    }

    fn alice() -> Address {
        Address::from_bytes([1u8; 20])
    }

    fn swap(input: Coin, output: Coin) -> MsgSwapOrder {
        MsgSwapOrder {
            input: Input {
                address: alice(),
                coin: input,
            },
            output: Output {
                address: alice(),
                coin: output,
            },
            deadline: 100,
            is_buy_order: false,
        }
    }

    #[test]
    fn deadline_is_inclusive() {
        assert!(check_deadline(100, 100).is_ok());
        assert!(matches!(
            check_deadline(100, 101),
            Err(AmmError::DeadlineExpired {
                deadline: 100,
                block_time: 101
            })
        ));
    }

    #[test]
    fn add_liquidity_rejects_lpt_and_zero() {
        let mut msg = MsgAddLiquidity {
            max_token: coin("btc", 100),
            exact_standard_amt: Amount::new(1),
            min_liquidity: Amount::ZERO,
            deadline: 1,
            sender: alice(),
        };
        assert!(msg.validate_basic().is_ok());
        msg.max_token = coin("lpt-1", 100);
        assert!(matches!(msg.validate_basic(), Err(AmmError::InvalidDenom(_))));
        msg.max_token = coin("btc", 100);
        msg.exact_standard_amt = Amount::ZERO;
        assert!(matches!(msg.validate_basic(), Err(AmmError::InvalidQuantity(_))));
    }

    #[test]
    fn remove_liquidity_requires_lpt() {
        let msg = MsgRemoveLiquidity {
            min_token: Amount::ZERO,
            withdraw_liquidity: coin("btc", 1),
            min_standard_amt: Amount::ZERO,
            deadline: 1,
            sender: alice(),
        };
        assert!(matches!(msg.validate_basic(), Err(AmmError::InvalidDenom(_))));
    }

    #[test]
    fn swap_rejects_same_denom_and_bad_deadline() {
        assert!(swap(coin("btc", 1), coin("stake", 1)).validate_basic().is_ok());
        assert!(swap(coin("btc", 1), coin("btc", 1)).validate_basic().is_err());
        let mut msg = swap(coin("btc", 1), coin("stake", 1));
        msg.deadline = 0;
        assert!(matches!(msg.validate_basic(), Err(AmmError::InvalidQuantity(_))));
    }
}
