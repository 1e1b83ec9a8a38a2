//! Hub-and-spoke swaps against a single pool.
//!
//! Every swap has the standard denom on exactly one side; the other side
//! selects the pool.  A sell order fixes the input and bounds the output
//! from below, a buy order fixes the output and bounds the input from
//! above.

use tracing::{debug, info};

use super::liquidity::reserves;
use super::registry::PoolRegistry;
use crate::config::Params;
use crate::domain::{
    check_deadline, Amount, Coin, Coins, Decimal, Denom, Input, MsgSwapOrder, Output, Pool,
};
use crate::error::AmmError;
use crate::math::{price_for_exact_input, price_for_exact_output};
use crate::traits::Ledger;

/// Resolves the pool for a trade between `input` and `output`.
///
/// # Errors
///
/// - [`AmmError::MissingStandardDenom`] unless exactly one side is the
///   standard denom.
/// - [`AmmError::PoolNotFound`] if the counterparty has no pool.
/// - [`AmmError::InvalidDenom`] if the counterparty is not listed in
///   `max_swap_amount`.  A listed denom with a zero ceiling resolves here
///   and is rejected at settlement with [`AmmError::SwapLimitExceeded`].
pub fn resolve_pool<'r>(
    registry: &'r PoolRegistry,
    params: &Params,
    standard_denom: &Denom,
    input: &Denom,
    output: &Denom,
) -> Result<&'r Pool, AmmError> {
    let counterparty = match (input == standard_denom, output == standard_denom) {
        (true, false) => output,
        (false, true) => input,
        _ => {
            return Err(AmmError::MissingStandardDenom {
                input: input.to_string(),
                output: output.to_string(),
            })
        }
    };
    let pool = registry
        .get_pool_by_counterparty(counterparty)
        .ok_or_else(|| AmmError::PoolNotFound(counterparty.to_string()))?;
    if params.swap_limit(counterparty.as_str()).is_none() {
        return Err(AmmError::InvalidDenom(format!(
            "{counterparty} is not whitelisted"
        )));
    }
    Ok(pool)
}

/// Output `pool` pays for selling exactly `input`.
///
/// # Errors
///
/// As [`price_for_exact_input`].
pub fn quote_exact_input<L: Ledger + ?Sized>(
    ledger: &L,
    pool: &Pool,
    fee: Decimal,
    input: &Coin,
    output_denom: &Denom,
) -> Result<Amount, AmmError> {
    let (input_reserve, output_reserve) = directed(ledger, pool, &input.denom, output_denom);
    price_for_exact_input(input.amount, input_reserve, output_reserve, fee)
}

/// Input `pool` charges for buying exactly `output`.
///
/// # Errors
///
/// As [`price_for_exact_output`].
pub fn quote_exact_output<L: Ledger + ?Sized>(
    ledger: &L,
    pool: &Pool,
    fee: Decimal,
    output: &Coin,
    input_denom: &Denom,
) -> Result<Amount, AmmError> {
    let (input_reserve, output_reserve) = directed(ledger, pool, input_denom, &output.denom);
    price_for_exact_output(output.amount, input_reserve, output_reserve, fee)
}

fn directed<L: Ledger + ?Sized>(
    ledger: &L,
    pool: &Pool,
    input_denom: &Denom,
    output_denom: &Denom,
) -> (Amount, Amount) {
    let held = reserves(ledger, pool);
    if input_denom == &pool.standard_denom && output_denom == &pool.counterparty_denom {
        (held.standard, held.token)
    } else {
        (held.token, held.standard)
    }
}

/// Executes a swap order after stateless and deadline checks.
pub(crate) fn swap<L: Ledger + ?Sized>(
    registry: &PoolRegistry,
    ledger: &mut L,
    params: &Params,
    standard_denom: &Denom,
    msg: &MsgSwapOrder,
    block_time: i64,
) -> Result<Amount, AmmError> {
    msg.validate_basic()?;
    check_deadline(msg.deadline, block_time)?;
    if msg.is_buy_order {
        trade_input_for_exact_output(registry, ledger, params, standard_denom, &msg.input, &msg.output)
    } else {
        trade_exact_input_for_output(registry, ledger, params, standard_denom, &msg.input, &msg.output)
    }
}

/// Sells exactly `input.coin`; `output.coin.amount` is the least accepted.
/// Returns the amount received.
pub(crate) fn trade_exact_input_for_output<L: Ledger + ?Sized>(
    registry: &PoolRegistry,
    ledger: &mut L,
    params: &Params,
    standard_denom: &Denom,
    input: &Input,
    output: &Output,
) -> Result<Amount, AmmError> {
    let pool = resolve_pool(registry, params, standard_denom, &input.coin.denom, &output.coin.denom)?;
    let received = quote_exact_input(&*ledger, pool, params.fee(), &input.coin, &output.coin.denom)?;
    debug!(lpt = %pool.lpt_denom, sold = %input.coin, %received, "exact input quoted");
    if received < output.coin.amount {
        return Err(AmmError::SlippageExceeded {
            bound: "min output",
            expected: output.coin.amount,
            actual: received,
        });
    }
    settle(
        ledger,
        params,
        pool,
        input,
        &input.coin,
        output,
        &Coin::new(output.coin.denom.clone(), received),
    )?;
    Ok(received)
}

/// Buys exactly `output.coin`; `input.coin.amount` is the most spent.
/// Returns the amount paid.
pub(crate) fn trade_input_for_exact_output<L: Ledger + ?Sized>(
    registry: &PoolRegistry,
    ledger: &mut L,
    params: &Params,
    standard_denom: &Denom,
    input: &Input,
    output: &Output,
) -> Result<Amount, AmmError> {
    let pool = resolve_pool(registry, params, standard_denom, &input.coin.denom, &output.coin.denom)?;
    let paid = quote_exact_output(&*ledger, pool, params.fee(), &output.coin, &input.coin.denom)?;
    debug!(lpt = %pool.lpt_denom, bought = %output.coin, %paid, "exact output quoted");
    if paid > input.coin.amount {
        return Err(AmmError::SlippageExceeded {
            bound: "max input",
            expected: input.coin.amount,
            actual: paid,
        });
    }
    settle(
        ledger,
        params,
        pool,
        input,
        &Coin::new(input.coin.denom.clone(), paid),
        output,
        &output.coin,
    )?;
    Ok(paid)
}

fn settle<L: Ledger + ?Sized>(
    ledger: &mut L,
    params: &Params,
    pool: &Pool,
    input: &Input,
    sold: &Coin,
    output: &Output,
    bought: &Coin,
) -> Result<(), AmmError> {
    let spoke = if sold.denom == pool.counterparty_denom { sold } else { bought };
    let limit = params
        .swap_limit(spoke.denom.as_str())
        .unwrap_or(Amount::ZERO);
    if spoke.amount > limit {
        return Err(AmmError::SwapLimitExceeded {
            denom: spoke.denom.to_string(),
            amount: spoke.amount,
            limit,
        });
    }
    let available = ledger.balance(&input.address, sold.denom.as_str());
    if available < sold.amount {
        return Err(AmmError::insufficient(sold.denom.as_str(), sold.amount, available));
    }

    let mut paid_in = Coins::new();
    paid_in.add_coin(sold)?;
    let mut paid_out = Coins::new();
    paid_out.add_coin(bought)?;
    ledger.transfer(&input.address, &pool.escrow_address, &paid_in)?;
    if !paid_out.is_empty() {
        ledger.transfer(&pool.escrow_address, &output.address, &paid_out)?;
    }
    info!(
        lpt = %pool.lpt_denom,
        from = %input.address,
        to = %output.address,
        %sold,
        %bought,
        "swap settled"
    );
    Ok(())
}
