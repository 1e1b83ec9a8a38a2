//! The [`Coinswap`] facade: owns the registry and the standard denom,
//! reads [`Params`] once per call, and drives the liquidity and swap
//! paths against a caller-supplied [`Ledger`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GenesisState, Params};
use crate::domain::{
    Amount, Coin, Decimal, Denom, Input, MsgAddLiquidity, MsgRemoveLiquidity, MsgSwapOrder,
    Output, Pool, WithdrawnCoins,
};
use crate::error::AmmError;
use crate::pools::{self, PoolRegistry};
use crate::traits::{Ledger, ParamStore};

/// A pool together with its live reserves and liquidity supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    /// The pool record.
    pub pool: Pool,
    /// Standard reserve.
    pub standard: Coin,
    /// Counterparty reserve.
    pub token: Coin,
    /// Outstanding liquidity tokens.
    pub lpt_supply: Coin,
    /// Current swap fee.
    pub fee: Decimal,
}

/// Hub-and-spoke coinswap engine.
///
/// Every state transition takes the ledger by `&mut` and the current block
/// time in unix seconds.  A returned error means no ledger mutation was
/// issued and the registry is unchanged.
///
/// # Examples
///
/// ```
/// use hydra_coinswap::prelude::*;
///
/// let mut caps = Coins::new();
/// caps.insert(Denom::new("btc").expect("denom"), Amount::new(1_000_000));
/// let params = Params::new(
///     "0.003".parse().expect("fee"),
///     Coin::zero(Denom::new("stake").expect("denom")),
///     Decimal::ZERO,
///     Amount::new(1_000_000_000),
///     caps,
/// )
/// .expect("params");
/// let store = MemoryParamStore::new(params).expect("store");
/// let mut engine = Coinswap::new(Denom::new("stake").expect("denom"), store).expect("engine");
///
/// let alice = Address::module("alice");
/// let mut ledger = MemoryLedger::new();
/// ledger.fund(&alice, &Denom::new("stake").expect("denom"), Amount::new(1_000)).expect("fund");
/// ledger.fund(&alice, &Denom::new("btc").expect("denom"), Amount::new(1_000)).expect("fund");
///
/// let msg = MsgAddLiquidity {
///     max_token: Coin::new(Denom::new("btc").expect("denom"), 1_000u128),
///     exact_standard_amt: Amount::new(1_000),
///     min_liquidity: Amount::new(1_000),
///     deadline: 10,
///     sender: alice,
/// };
/// let minted = engine.add_liquidity(&mut ledger, &msg, 1).expect("added");
/// assert_eq!(minted.denom.as_str(), "lpt-1");
/// assert_eq!(minted.amount, Amount::new(1_000));
/// ```
#[derive(Debug, Clone)]
pub struct Coinswap<S: ParamStore> {
    store: S,
    registry: PoolRegistry,
    standard_denom: Denom,
}

impl<S: ParamStore> Coinswap<S> {
    /// Engine with no pools.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidGenesis`] if `standard_denom` is a liquidity token.
    /// - [`AmmError::InvalidParams`] if the stored params are invalid.
    pub fn new(standard_denom: Denom, store: S) -> Result<Self, AmmError> {
        if standard_denom.is_lpt() {
            return Err(AmmError::InvalidGenesis(format!(
                "standard denom {standard_denom} cannot be a liquidity token"
            )));
        }
        store.get().validate()?;
        Ok(Self {
            store,
            registry: PoolRegistry::new(),
            standard_denom,
        })
    }

    /// Validates `state`, writes its params into `store`, and rebuilds the
    /// registry.
    ///
    /// # Errors
    ///
    /// As [`GenesisState::validate`], or whatever `store.set` returns.
    pub fn from_genesis(state: GenesisState, mut store: S) -> Result<Self, AmmError> {
        state.validate()?;
        let GenesisState {
            params,
            standard_denom,
            pools,
            sequence,
        } = state;
        store.set(params)?;
        let registry = PoolRegistry::from_parts(pools, sequence)?;
        debug!(pools = registry.len(), sequence, "engine loaded from genesis");
        Ok(Self {
            store,
            registry,
            standard_denom,
        })
    }

    /// Snapshot that [`from_genesis`](Self::from_genesis) restores exactly.
    #[must_use]
    pub fn export_genesis(&self) -> GenesisState {
        GenesisState {
            params: self.store.get(),
            standard_denom: self.standard_denom.clone(),
            pools: self.registry.pools().cloned().collect(),
            sequence: self.registry.sequence(),
        }
    }

    /// The hub asset.
    #[must_use]
    pub fn standard_denom(&self) -> &Denom {
        &self.standard_denom
    }

    /// Current parameters.
    #[must_use]
    pub fn params(&self) -> Params {
        self.store.get()
    }

    /// Replaces the parameters through the store.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidParams`] if `params` fails validation.
    pub fn set_params(&mut self, params: Params) -> Result<(), AmmError> {
        self.store.set(params)
    }

    /// The pool registry.
    #[must_use]
    pub fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Deposits liquidity, creating the pool on first use.  Returns the
    /// minted liquidity-token coin.
    ///
    /// # Errors
    ///
    /// Any validation, deadline, whitelist, cap, slippage, or balance
    /// failure; see [`AmmError`].
    pub fn add_liquidity<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        msg: &MsgAddLiquidity,
        block_time: i64,
    ) -> Result<Coin, AmmError> {
        let params = self.store.get();
        pools::add_liquidity(
            &mut self.registry,
            ledger,
            &params,
            &self.standard_denom,
            msg,
            block_time,
        )
    }

    /// Burns liquidity tokens for a pro-rata share of both reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::PoolNotFound`] for an unknown liquidity denom.
    /// - [`AmmError::InsufficientFunds`] if reserves, supply, or the
    ///   sender's balance fall short.
    /// - [`AmmError::SlippageExceeded`] if a payout is below its minimum.
    pub fn remove_liquidity<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        msg: &MsgRemoveLiquidity,
        block_time: i64,
    ) -> Result<WithdrawnCoins, AmmError> {
        pools::remove_liquidity(&self.registry, ledger, msg, block_time)
    }

    /// Executes a swap order and returns the settled amount: the output
    /// received for a sell order, the input paid for a buy order.
    ///
    /// # Errors
    ///
    /// Any validation, deadline, routing, pricing, slippage, limit, or
    /// balance failure; see [`AmmError`].
    pub fn swap<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        msg: &MsgSwapOrder,
        block_time: i64,
    ) -> Result<Amount, AmmError> {
        let params = self.store.get();
        pools::swap(&self.registry, ledger, &params, &self.standard_denom, msg, block_time)
    }

    /// Sells exactly `input.coin`, requiring at least `output.coin.amount`
    /// back.  No deadline or stateless message checks are applied.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap), minus validation and deadline.
    pub fn trade_exact_input_for_output<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        input: &Input,
        output: &Output,
    ) -> Result<Amount, AmmError> {
        let params = self.store.get();
        pools::trade_exact_input_for_output(
            &self.registry,
            ledger,
            &params,
            &self.standard_denom,
            input,
            output,
        )
    }

    /// Buys exactly `output.coin`, spending at most `input.coin.amount`.
    /// No deadline or stateless message checks are applied.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap), minus validation and deadline.
    pub fn trade_input_for_exact_output<L: Ledger + ?Sized>(
        &mut self,
        ledger: &mut L,
        input: &Input,
        output: &Output,
    ) -> Result<Amount, AmmError> {
        let params = self.store.get();
        pools::trade_input_for_exact_output(
            &self.registry,
            ledger,
            &params,
            &self.standard_denom,
            input,
            output,
        )
    }

    /// Pool details by liquidity-token denom.
    ///
    /// # Errors
    ///
    /// [`AmmError::PoolNotFound`] if no pool issues `lpt_denom`.
    pub fn pool<L: Ledger + ?Sized>(&self, ledger: &L, lpt_denom: &str) -> Result<PoolInfo, AmmError> {
        let pool = self
            .registry
            .get_pool_by_lpt_denom(lpt_denom)
            .ok_or_else(|| AmmError::PoolNotFound(lpt_denom.to_owned()))?;
        Ok(self.info(ledger, pool, self.store.get().fee()))
    }

    /// Details of every pool in creation order.
    #[must_use]
    pub fn pools<L: Ledger + ?Sized>(&self, ledger: &L) -> Vec<PoolInfo> {
        let fee = self.store.get().fee();
        self.registry
            .pools()
            .map(|pool| self.info(ledger, pool, fee))
            .collect()
    }

    /// Quote for selling exactly `input` for `output_denom`.
    ///
    /// # Errors
    ///
    /// Routing and pricing failures as in [`swap`](Self::swap).
    pub fn estimate_exact_input<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        input: &Coin,
        output_denom: &Denom,
    ) -> Result<Amount, AmmError> {
        let params = self.store.get();
        let pool = pools::resolve_pool(
            &self.registry,
            &params,
            &self.standard_denom,
            &input.denom,
            output_denom,
        )?;
        pools::quote_exact_input(ledger, pool, params.fee(), input, output_denom)
    }

    /// Quote for buying exactly `output` with `input_denom`.
    ///
    /// # Errors
    ///
    /// Routing and pricing failures as in [`swap`](Self::swap).
    pub fn estimate_exact_output<L: Ledger + ?Sized>(
        &self,
        ledger: &L,
        output: &Coin,
        input_denom: &Denom,
    ) -> Result<Amount, AmmError> {
        let params = self.store.get();
        let pool = pools::resolve_pool(
            &self.registry,
            &params,
            &self.standard_denom,
            input_denom,
            &output.denom,
        )?;
        pools::quote_exact_output(ledger, pool, params.fee(), output, input_denom)
    }

    fn info<L: Ledger + ?Sized>(&self, ledger: &L, pool: &Pool, fee: Decimal) -> PoolInfo {
        let held = pools::reserves(ledger, pool);
        PoolInfo {
            pool: pool.clone(),
            standard: Coin::new(pool.standard_denom.clone(), held.standard),
            token: Coin::new(pool.counterparty_denom.clone(), held.token),
            lpt_supply: Coin::new(
                pool.lpt_denom.clone(),
                ledger.total_supply(pool.lpt_denom.as_str()),
            ),
            fee,
        }
    }
}
