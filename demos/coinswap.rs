//! Hub-and-spoke coinswap example.
//!
//! Demonstrates seeding a pool, quoting and executing both swap kinds,
//! withdrawing liquidity, and exporting genesis.
//!
//! # Run
//!
//! ```bash
//! cargo run --example coinswap
//! ```

use hydra_coinswap::prelude::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Hub-and-spoke Coinswap ===\n");

    // ── 1. Parameters ───────────────────────────────────────────────────
    //    btc is whitelisted with a per-swap ceiling of 1 000 000 units.
    let stake = Denom::new("stake")?;
    let btc = Denom::new("btc")?;
    let mut caps = Coins::new();
    caps.insert(btc.clone(), Amount::new(1_000_000));
    let params = Params::new(
        "0.003".parse()?,
        Coin::zero(stake.clone()),
        Decimal::ZERO,
        Amount::new(10_000_000_000),
        caps,
    )?;
    let mut engine = Coinswap::new(stake.clone(), MemoryParamStore::new(params)?)?;

    // ── 2. Accounts ─────────────────────────────────────────────────────
    let alice = Address::module("alice");
    let bob = Address::module("bob");
    let mut ledger = MemoryLedger::new();
    for who in [&alice, &bob] {
        ledger.fund(who, &stake, Amount::new(50_000_000))?;
        ledger.fund(who, &btc, Amount::new(50_000_000))?;
    }

    // ── 3. Seed the pool ────────────────────────────────────────────────
    let minted = engine.add_liquidity(
        &mut ledger,
        &MsgAddLiquidity {
            max_token: Coin::new(btc.clone(), 4_000_000u128),
            exact_standard_amt: Amount::new(8_000_000),
            min_liquidity: Amount::new(8_000_000),
            deadline: 100,
            sender: alice,
        },
        1,
    )?;
    println!("Alice minted {minted}");
    let info = engine.pool(&ledger, minted.denom.as_str())?;
    println!("Reserves: {} / {}  (escrow {})\n", info.standard, info.token, info.pool.escrow_address);

    // ── 4. Sell stake for btc ───────────────────────────────────────────
    let sell = Coin::new(stake.clone(), 100_000u128);
    let quote = engine.estimate_exact_input(&ledger, &sell, &btc)?;
    let received = engine.swap(
        &mut ledger,
        &MsgSwapOrder {
            input: Input { address: bob, coin: sell.clone() },
            output: Output { address: bob, coin: Coin::new(btc.clone(), quote) },
            deadline: 100,
            is_buy_order: false,
        },
        2,
    )?;
    println!("Bob sold {sell} for {received}{btc} (quoted {quote})");

    // ── 5. Buy exactly 10 000 btc ───────────────────────────────────────
    let want = Coin::new(btc.clone(), 10_000u128);
    let cost = engine.estimate_exact_output(&ledger, &want, &stake)?;
    let paid = engine.swap(
        &mut ledger,
        &MsgSwapOrder {
            input: Input { address: bob, coin: Coin::new(stake.clone(), cost) },
            output: Output { address: bob, coin: want.clone() },
            deadline: 100,
            is_buy_order: true,
        },
        3,
    )?;
    println!("Bob bought {want} for {paid}{stake}\n");

    // ── 6. Withdraw half of Alice's liquidity ───────────────────────────
    let half = Coin::new(minted.denom.clone(), minted.amount.get() / 2);
    let out = engine.remove_liquidity(
        &mut ledger,
        &MsgRemoveLiquidity {
            min_token: Amount::ZERO,
            withdraw_liquidity: half.clone(),
            min_standard_amt: Amount::ZERO,
            deadline: 100,
            sender: alice,
        },
        4,
    )?;
    println!("Alice burned {half} for {} + {}", out.standard, out.token);

    // ── 7. Export genesis ───────────────────────────────────────────────
    let genesis = engine.export_genesis();
    println!(
        "\nGenesis: {} pool(s), next sequence {}",
        genesis.pools.len(),
        genesis.sequence
    );
    for info in engine.pools(&ledger) {
        println!(
            "  {}: {} / {}, supply {}, fee {}",
            info.pool.lpt_denom, info.standard, info.token, info.lpt_supply, info.fee
        );
    }

    println!("\n=== Done ===");
    Ok(())
}
