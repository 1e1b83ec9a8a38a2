//! Property-based tests using `proptest` for engine invariants.
//!
//! 1. **Curve preservation**: `R_in × R_out` never decreases across a swap.
//! 2. **Rounding direction**: paying an exact-output quote as exact input
//!    yields at least the requested output.
//! 3. **Liquidity conservation**: add then remove never returns more than
//!    was deposited.
//! 4. **Supply/reserve coupling**: a deposit never dilutes existing holders.
//! 5. **Swap conservation**: reserves move by exactly the settled amounts,
//!    payer and recipient balances move by the same amounts, and total
//!    supplies are unchanged.
//! 6. **Pool identity**: ids and escrows are deterministic and distinct.

#![allow(clippy::panic)]

use proptest::prelude::*;

use super::liquidity::{proportional_deposit, reserves, Reserves};
use super::registry::{pool_id, reserve_address};
use crate::config::Params;
use crate::domain::{
    Address, Amount, Coin, Coins, Decimal, Denom, Input, MsgAddLiquidity, MsgRemoveLiquidity,
    MsgSwapOrder, Output,
};
use crate::engine::Coinswap;
use crate::ledger::{MemoryLedger, MemoryParamStore};
use crate::math::{price_for_exact_input, price_for_exact_output};
use crate::traits::Ledger;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const CAP: u128 = 1_000_000_000_000_000_000_000_000_000_000;

fn denom(s: &str) -> Denom {
    let Ok(d) = Denom::new(s) else {
        panic!("valid denom {s}");
    };
    d
}

fn fee_strategy() -> impl Strategy<Value = Decimal> {
    (0u128..50_000_000_000_000_000).prop_map(Decimal::from_raw)
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..1_000_000_000_000_000_000_000
}

fn engine(fee: Decimal) -> Coinswap<MemoryParamStore> {
    let mut caps = Coins::new();
    caps.insert(denom("btc"), Amount::MAX);
    let Ok(params) = Params::new(fee, Coin::zero(denom("stake")), Decimal::ZERO, Amount::new(CAP), caps)
    else {
        panic!("valid params");
    };
    let Ok(store) = MemoryParamStore::new(params) else {
        panic!("valid store");
    };
    let Ok(engine) = Coinswap::new(denom("stake"), store) else {
        panic!("engine");
    };
    engine
}

fn fund(ledger: &mut MemoryLedger, who: &Address, standard: u128, token: u128) {
    let funded = ledger
        .fund(who, &denom("stake"), Amount::new(standard))
        .and_then(|()| ledger.fund(who, &denom("btc"), Amount::new(token)));
    let Ok(()) = funded else {
        panic!("fund");
    };
}

fn add_msg(sender: Address, standard: u128, token: u128) -> MsgAddLiquidity {
    MsgAddLiquidity {
        max_token: Coin::new(denom("btc"), token),
        exact_standard_amt: Amount::new(standard),
        min_liquidity: Amount::ZERO,
        deadline: 1,
        sender,
    }
}

/// Engine with one pool seeded by `lp` at the given reserves.
fn seeded(fee: Decimal, standard: u128, token: u128) -> (Coinswap<MemoryParamStore>, MemoryLedger) {
    let mut engine = engine(fee);
    let mut ledger = MemoryLedger::new();
    let lp = Address::module("lp");
    fund(&mut ledger, &lp, standard, token);
    let Ok(_) = engine.add_liquidity(&mut ledger, &add_msg(lp, standard, token), 0) else {
        panic!("seed pool");
    };
    (engine, ledger)
}

fn pool_reserves(engine: &Coinswap<MemoryParamStore>, ledger: &MemoryLedger) -> Reserves {
    let Some(pool) = engine.registry().get_pool_by_lpt_denom("lpt-1") else {
        panic!("pool exists");
    };
    reserves(ledger, pool)
}

// ---------------------------------------------------------------------------
// Properties 1 and 2: pricing
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_exact_input_preserves_curve(
        ri in reserve_strategy(),
        ro in reserve_strategy(),
        fee in fee_strategy(),
        pct in 1u128..=100,
    ) {
        let input = (ri / 100 * pct).max(1);
        let Ok(out) = price_for_exact_input(Amount::new(input), Amount::new(ri), Amount::new(ro), fee) else {
            return Ok(());
        };
        prop_assert!(out.get() < ro);
        let before = mul_wide(ri, ro);
        let after = mul_wide(ri + input, ro - out.get());
        prop_assert!(after >= before);
    }

    #[test]
    fn prop_exact_output_quote_covers_request(
        ri in reserve_strategy(),
        ro in reserve_strategy(),
        fee in fee_strategy(),
        pct in 1u128..100,
    ) {
        let want = (ro / 100 * pct).max(1);
        let Ok(paid) = price_for_exact_output(Amount::new(want), Amount::new(ri), Amount::new(ro), fee) else {
            return Ok(());
        };
        let Ok(got) = price_for_exact_input(paid, Amount::new(ri), Amount::new(ro), fee) else {
            return Ok(());
        };
        prop_assert!(got.get() >= want, "paid {} yields {} < {}", paid, got, want);
    }
}

/// `a * b` as a `(high, low)` pair, compared lexicographically.
fn mul_wide(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a_hi, a_lo) = (a >> 64, a & MASK);
    let (b_hi, b_lo) = (b >> 64, b & MASK);
    let lo_lo = a_lo * b_lo;
    let hi_lo = a_hi * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_hi = a_hi * b_hi;
    let cross = (lo_lo >> 64) + (hi_lo & MASK) + (lo_hi & MASK);
    let low = (cross << 64) | (lo_lo & MASK);
    let high = hi_hi + (hi_lo >> 64) + (lo_hi >> 64) + (cross >> 64);
    (high, low)
}

// ---------------------------------------------------------------------------
// Properties 3 and 4: liquidity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_add_then_remove_never_profits(
        sr in reserve_strategy(),
        tr in reserve_strategy(),
        deposit in 1u128..1_000_000_000_000_000_000,
    ) {
        let (mut engine, mut ledger) = seeded(Decimal::ZERO, sr, tr);
        let bob = Address::module("bob");
        fund(&mut ledger, &bob, deposit, u128::MAX / 4);
        let before_token = ledger.balance(&bob, "btc");

        let Ok(minted) = engine.add_liquidity(&mut ledger, &add_msg(bob, deposit, u128::MAX / 4), 0) else {
            return Ok(());
        };
        let token_paid = before_token.get() - ledger.balance(&bob, "btc").get();
        let standard_paid = deposit - ledger.balance(&bob, "stake").get();

        let remove = MsgRemoveLiquidity {
            min_token: Amount::ZERO,
            withdraw_liquidity: minted,
            min_standard_amt: Amount::ZERO,
            deadline: 1,
            sender: bob,
        };
        let Ok(out) = engine.remove_liquidity(&mut ledger, &remove, 0) else {
            return Ok(());
        };
        prop_assert!(out.standard.amount.get() <= standard_paid);
        prop_assert!(out.token.amount.get() <= token_paid);
    }

    #[test]
    fn prop_deposit_never_dilutes(
        sr in reserve_strategy(),
        tr in reserve_strategy(),
        supply in reserve_strategy(),
        want in 1u128..1_000_000_000_000_000_000_000,
    ) {
        let held = Reserves { standard: Amount::new(sr), token: Amount::new(tr) };
        let Ok(d) = proportional_deposit(held, Amount::new(supply), Amount::new(want), Amount::new(CAP)) else {
            return Ok(());
        };
        // minted / supply <= standard / sr and token / tr > standard / sr
        prop_assert!(mul_wide(d.minted.get(), sr) <= mul_wide(supply, d.standard.get()));
        prop_assert!(mul_wide(d.token.get(), sr) > mul_wide(tr, d.standard.get()));
        prop_assert!(d.standard.get() <= want);
        prop_assert!(sr + d.standard.get() <= CAP);
    }
}

// ---------------------------------------------------------------------------
// Property 5: swap conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_conserves_balances(
        sr in reserve_strategy(),
        tr in reserve_strategy(),
        fee in fee_strategy(),
        pct in 1u128..100,
        buy in any::<bool>(),
        sell_standard in any::<bool>(),
    ) {
        let (mut engine, mut ledger) = seeded(fee, sr, tr);
        let carol = Address::module("carol");
        let dave = Address::module("dave");
        fund(&mut ledger, &carol, u128::MAX / 4, u128::MAX / 4);
        let (from, to, input_reserve, output_reserve) = if sell_standard {
            ("stake", "btc", sr, tr)
        } else {
            ("btc", "stake", tr, sr)
        };
        let amount = if buy {
            (output_reserve / 100 * pct).max(1)
        } else {
            (input_reserve / 100 * pct).max(1)
        };
        let order = MsgSwapOrder {
            input: Input {
                address: carol,
                coin: Coin::new(denom(from), if buy { u128::MAX / 4 } else { amount }),
            },
            output: Output {
                address: dave,
                coin: Coin::new(denom(to), if buy { amount } else { 1u128 }),
            },
            deadline: 1,
            is_buy_order: buy,
        };
        let supply_before = (ledger.total_supply("stake"), ledger.total_supply("btc"));
        let payer_before = ledger.balance(&carol, from).get();
        let before = pool_reserves(&engine, &ledger);

        let settled = engine.swap(&mut ledger, &order, 0);
        prop_assume!(settled.is_ok(), "swap rejected: {:?}", settled);
        let Ok(settled) = settled else {
            return Ok(());
        };
        let (settled_in, settled_out) = if buy { (settled.get(), amount) } else { (amount, settled.get()) };

        let after = pool_reserves(&engine, &ledger);
        let (in_before, out_before, in_after, out_after) = if sell_standard {
            (before.standard, before.token, after.standard, after.token)
        } else {
            (before.token, before.standard, after.token, after.standard)
        };
        prop_assert_eq!(in_after.get(), in_before.get() + settled_in);
        prop_assert_eq!(out_after.get(), out_before.get() - settled_out);
        prop_assert_eq!(ledger.balance(&carol, from).get(), payer_before - settled_in);
        prop_assert_eq!(ledger.balance(&dave, to).get(), settled_out);
        prop_assert_eq!((ledger.total_supply("stake"), ledger.total_supply("btc")), supply_before);
        prop_assert!(out_after.is_positive());
        prop_assert!(
            mul_wide(after.standard.get(), after.token.get())
                >= mul_wide(before.standard.get(), before.token.get())
        );
    }
}

// ---------------------------------------------------------------------------
// Property 6: pool identity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_pool_identity(a in "[a-z][a-z0-9]{2,15}", b in "[a-z][a-z0-9]{2,15}", s in 1u64..u64::MAX) {
        let (da, db) = (denom(&a), denom(&b));
        prop_assert_eq!(pool_id(&da), pool_id(&da.clone()));
        prop_assert_eq!(pool_id(&da) == pool_id(&db), a == b);
        prop_assert_ne!(reserve_address(&Denom::lpt(s)), reserve_address(&Denom::lpt(s - 1)));
    }
}
