//! Proportional liquidity provision and redemption.
//!
//! The pure planners ([`bootstrap_deposit`], [`proportional_deposit`],
//! [`proportional_withdrawal`]) compute amounts from reserves; the
//! executors run every check against the ledger before issuing the first
//! mutation.

use tracing::{debug, info};

use super::registry::PoolRegistry;
use crate::config::Params;
use crate::domain::{
    check_deadline, Address, Amount, Coin, Coins, Denom, MsgAddLiquidity, MsgRemoveLiquidity,
    Pool, Rounding, WithdrawnCoins,
};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::Ledger;

/// Module account receiving pool creation fees.
pub const FEE_COLLECTOR: &str = "fee_collector";

/// A pool's two reserves as held by its escrow account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reserves {
    /// Standard-denom balance.
    pub standard: Amount,
    /// Counterparty-denom balance.
    pub token: Amount,
}

/// Reads a pool's reserves from the ledger.
pub fn reserves<L: Ledger + ?Sized>(ledger: &L, pool: &Pool) -> Reserves {
    Reserves {
        standard: ledger.balance(&pool.escrow_address, pool.standard_denom.as_str()),
        token: ledger.balance(&pool.escrow_address, pool.counterparty_denom.as_str()),
    }
}

/// Amounts moved by one deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deposit {
    /// Standard tokens moved into escrow.
    pub standard: Amount,
    /// Counterparty tokens moved into escrow.
    pub token: Amount,
    /// Liquidity tokens minted to the depositor.
    pub minted: Amount,
}

/// Deposit into a pool with no outstanding liquidity: both amounts are
/// taken as given and the minted supply equals the standard amount.
///
/// # Errors
///
/// [`AmmError::PoolCapExceeded`] if `standard_amt` exceeds `cap`.
pub fn bootstrap_deposit(
    standard_amt: Amount,
    token_amt: Amount,
    cap: Amount,
) -> Result<Deposit, AmmError> {
    if standard_amt > cap {
        return Err(AmmError::PoolCapExceeded {
            reserve: standard_amt,
            cap,
        });
    }
    Ok(Deposit {
        standard: standard_amt,
        token: token_amt,
        minted: standard_amt,
    })
}

/// Deposit into a funded pool at the current reserve ratio.
///
/// The standard leg is clipped to the cap's remaining headroom.  Minted
/// liquidity rounds down and the counterparty leg rounds up (floor + 1),
/// so the pool never loses value to a depositor.
///
/// # Errors
///
/// - [`AmmError::PoolCapExceeded`] if the standard reserve is already at
///   or above `cap`.
/// - [`AmmError::DivisionByZero`] if the standard reserve is zero.
/// - [`AmmError::Overflow`] if a share does not fit in an [`Amount`].
pub fn proportional_deposit(
    reserves: Reserves,
    supply: Amount,
    exact_standard_amt: Amount,
    cap: Amount,
) -> Result<Deposit, AmmError> {
    if reserves.standard >= cap {
        return Err(AmmError::PoolCapExceeded {
            reserve: reserves.standard,
            cap,
        });
    }
    let headroom = cap.safe_sub(&reserves.standard)?;
    let standard = exact_standard_amt.min(headroom);
    let minted = supply.mul_div(&standard, &reserves.standard, Rounding::Down)?;
    let token = reserves
        .token
        .mul_div(&standard, &reserves.standard, Rounding::Down)?
        .safe_add(&Amount::ONE)?;
    Ok(Deposit {
        standard,
        token,
        minted,
    })
}

/// Payout for burning `withdraw` of `supply` liquidity tokens; both legs
/// round down.
///
/// # Errors
///
/// - [`AmmError::InsufficientFunds`] if `withdraw` exceeds `supply`.
/// - [`AmmError::DivisionByZero`] if `supply` is zero.
pub fn proportional_withdrawal(
    withdraw: Amount,
    reserves: Reserves,
    supply: Amount,
    lpt_denom: &str,
) -> Result<Reserves, AmmError> {
    if supply < withdraw {
        return Err(AmmError::insufficient(lpt_denom, withdraw, supply));
    }
    Ok(Reserves {
        standard: withdraw.mul_div(&reserves.standard, &supply, Rounding::Down)?,
        token: withdraw.mul_div(&reserves.token, &supply, Rounding::Down)?,
    })
}

fn at_least(bound: &'static str, min: Amount, actual: Amount) -> Result<(), AmmError> {
    if actual < min {
        return Err(AmmError::SlippageExceeded {
            bound,
            expected: min,
            actual,
        });
    }
    Ok(())
}

fn at_most(bound: &'static str, max: Amount, actual: Amount) -> Result<(), AmmError> {
    if actual > max {
        return Err(AmmError::SlippageExceeded {
            bound,
            expected: max,
            actual,
        });
    }
    Ok(())
}

fn coin_set(coins: &[Coin]) -> Result<Coins, AmmError> {
    let mut set = Coins::new();
    for coin in coins {
        set.add_coin(coin)?;
    }
    Ok(set)
}

/// Adds liquidity, creating the pool on the first deposit for a denom.
pub(crate) fn add_liquidity<L: Ledger + ?Sized>(
    registry: &mut PoolRegistry,
    ledger: &mut L,
    params: &Params,
    standard_denom: &Denom,
    msg: &MsgAddLiquidity,
    block_time: i64,
) -> Result<Coin, AmmError> {
    msg.validate_basic()?;
    check_deadline(msg.deadline, block_time)?;

    let token_denom = &msg.max_token.denom;
    if token_denom == standard_denom {
        return Err(AmmError::InvalidDenom(format!(
            "{token_denom} is the standard denom"
        )));
    }
    if !params.is_whitelisted(token_denom.as_str()) {
        return Err(AmmError::InvalidDenom(format!(
            "{token_denom} is not whitelisted"
        )));
    }

    let (pool, is_new) = match registry.get_pool_by_counterparty(token_denom) {
        Some(pool) => (pool.clone(), false),
        None => (registry.prepare_pool(standard_denom, token_denom)?, true),
    };
    let cap = params.max_standard_coin_per_pool();
    let supply = ledger.total_supply(pool.lpt_denom.as_str());

    let deposit = if is_new || supply.is_zero() {
        let deposit = bootstrap_deposit(msg.exact_standard_amt, msg.max_token.amount, cap)?;
        at_least("min liquidity", msg.min_liquidity, deposit.minted)?;
        deposit
    } else {
        let deposit = proportional_deposit(reserves(&*ledger, &pool), supply, msg.exact_standard_amt, cap)?;
        at_least("min liquidity", msg.min_liquidity, deposit.minted)?;
        at_most("max token", msg.max_token.amount, deposit.token)?;
        deposit
    };
    debug!(
        lpt = %pool.lpt_denom,
        standard = %deposit.standard,
        token = %deposit.token,
        minted = %deposit.minted,
        "add liquidity computed"
    );

    let creation_fee = params.pool_creation_fee();
    let charge_fee = is_new && creation_fee.is_positive();
    let deposits = coin_set(&[
        Coin::new(standard_denom.clone(), deposit.standard),
        Coin::new(token_denom.clone(), deposit.token),
    ])?;
    let mut required = deposits.clone();
    if charge_fee {
        required.add_coin(creation_fee)?;
    }
    ledger.spendable(&msg.sender).ensure_covers(&required)?;

    if charge_fee {
        let fee = coin_set(std::slice::from_ref(creation_fee))?;
        ledger.transfer(&msg.sender, &Address::module(FEE_COLLECTOR), &fee)?;
    }
    ledger.transfer(&msg.sender, &pool.escrow_address, &deposits)?;
    let minted = Coin::new(pool.lpt_denom.clone(), deposit.minted);
    ledger.mint(&msg.sender, &coin_set(std::slice::from_ref(&minted))?)?;
    if is_new {
        registry.insert(pool)?;
    }

    info!(sender = %msg.sender, minted = %minted, "liquidity added");
    Ok(minted)
}

/// Burns liquidity tokens and pays out both reserves pro rata.
pub(crate) fn remove_liquidity<L: Ledger + ?Sized>(
    registry: &PoolRegistry,
    ledger: &mut L,
    msg: &MsgRemoveLiquidity,
    block_time: i64,
) -> Result<WithdrawnCoins, AmmError> {
    msg.validate_basic()?;
    check_deadline(msg.deadline, block_time)?;

    let lpt = msg.withdraw_liquidity.denom.as_str();
    let pool = registry
        .get_pool_by_lpt_denom(lpt)
        .ok_or_else(|| AmmError::PoolNotFound(lpt.to_owned()))?;

    let held = reserves(&*ledger, pool);
    let supply = ledger.total_supply(lpt);
    let withdraw = msg.withdraw_liquidity.amount;
    if held.standard < msg.min_standard_amt {
        return Err(AmmError::insufficient(
            pool.standard_denom.as_str(),
            msg.min_standard_amt,
            held.standard,
        ));
    }
    if held.token < msg.min_token {
        return Err(AmmError::insufficient(
            pool.counterparty_denom.as_str(),
            msg.min_token,
            held.token,
        ));
    }
    let balance = ledger.balance(&msg.sender, lpt);
    if balance < withdraw {
        return Err(AmmError::insufficient(lpt, withdraw, balance));
    }

    let payout = proportional_withdrawal(withdraw, held, supply, lpt)?;
    debug!(
        lpt,
        burned = %withdraw,
        standard = %payout.standard,
        token = %payout.token,
        "remove liquidity computed"
    );
    at_least("min standard", msg.min_standard_amt, payout.standard)?;
    at_least("min token", msg.min_token, payout.token)?;

    let standard = Coin::new(pool.standard_denom.clone(), payout.standard);
    let token = Coin::new(pool.counterparty_denom.clone(), payout.token);
    ledger.burn(&msg.sender, &coin_set(std::slice::from_ref(&msg.withdraw_liquidity))?)?;
    let paid = coin_set(&[standard.clone(), token.clone()])?;
    if !paid.is_empty() {
        ledger.transfer(&pool.escrow_address, &msg.sender, &paid)?;
    }

    info!(sender = %msg.sender, %standard, %token, "liquidity removed");
    Ok(WithdrawnCoins { standard, token })
}
