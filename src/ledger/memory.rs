//! Map-backed [`Ledger`] and [`ParamStore`].

use std::collections::BTreeMap;

use tracing::trace;

use crate::config::Params;
use crate::domain::{Address, Amount, Coin, Coins, Denom};
use crate::error::AmmError;
use crate::traits::{Ledger, ParamStore};

/// Balances and supplies held in ordered maps.
///
/// Every mutating call computes the full post-state of each touched
/// account first and writes it only if nothing failed, so a rejected
/// multi-coin move leaves no trace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    balances: BTreeMap<Address, Coins>,
    supply: Coins,
}

impl MemoryLedger {
    /// Empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints `amount` of `denom` to `to`; convenience for seeding accounts.
    ///
    /// # Errors
    ///
    /// [`AmmError::Overflow`] if a balance or the supply would overflow.
    pub fn fund(&mut self, to: &Address, denom: &Denom, amount: Amount) -> Result<(), AmmError> {
        let coins: Coins = [Coin::new(denom.clone(), amount)].into_iter().collect();
        self.mint(to, &coins)
    }

    fn debited(&self, from: &Address, coins: &Coins) -> Result<Coins, AmmError> {
        let mut account = self.balances.get(from).cloned().unwrap_or_default();
        for (denom, amount) in coins {
            account.sub_coin(&Coin::new(denom.clone(), *amount))?;
        }
        Ok(account)
    }

    fn credited(&self, to: &Address, coins: &Coins) -> Result<Coins, AmmError> {
        let mut account = self.balances.get(to).cloned().unwrap_or_default();
        for (denom, amount) in coins {
            account.add_coin(&Coin::new(denom.clone(), *amount))?;
        }
        Ok(account)
    }

    fn store(&mut self, address: Address, account: Coins) {
        if account.is_empty() {
            self.balances.remove(&address);
        } else {
            self.balances.insert(address, account);
        }
    }
}

impl Ledger for MemoryLedger {
    fn transfer(&mut self, from: &Address, to: &Address, coins: &Coins) -> Result<(), AmmError> {
        let from_after = self.debited(from, coins)?;
        if from == to {
            return Ok(());
        }
        let to_after = self.credited(to, coins)?;
        self.store(*from, from_after);
        self.store(*to, to_after);
        trace!(%from, %to, %coins, "transfer");
        Ok(())
    }

    fn mint(&mut self, to: &Address, coins: &Coins) -> Result<(), AmmError> {
        let to_after = self.credited(to, coins)?;
        let mut supply_after = self.supply.clone();
        for (denom, amount) in coins {
            supply_after.add_coin(&Coin::new(denom.clone(), *amount))?;
        }
        self.store(*to, to_after);
        self.supply = supply_after;
        trace!(%to, %coins, "mint");
        Ok(())
    }

    fn burn(&mut self, from: &Address, coins: &Coins) -> Result<(), AmmError> {
        let from_after = self.debited(from, coins)?;
        let mut supply_after = self.supply.clone();
        for (denom, amount) in coins {
            supply_after.sub_coin(&Coin::new(denom.clone(), *amount))?;
        }
        self.store(*from, from_after);
        self.supply = supply_after;
        trace!(%from, %coins, "burn");
        Ok(())
    }

    fn balance(&self, address: &Address, denom: &str) -> Amount {
        self.balances
            .get(address)
            .map_or(Amount::ZERO, |account| account.amount_of(denom))
    }

    fn total_supply(&self, denom: &str) -> Amount {
        self.supply.amount_of(denom)
    }

    fn spendable(&self, address: &Address) -> Coins {
        self.balances.get(address).cloned().unwrap_or_default()
    }
}

/// A [`ParamStore`] holding one validated [`Params`] value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryParamStore {
    params: Params,
}

impl MemoryParamStore {
    /// Creates a store after validating `params`.
    ///
    /// # Errors
    ///
    /// [`AmmError::InvalidParams`] if `params` fails validation.
    pub fn new(params: Params) -> Result<Self, AmmError> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl ParamStore for MemoryParamStore {
    fn get(&self) -> Params {
        self.params.clone()
    }

    fn set(&mut self, params: Params) -> Result<(), AmmError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::Decimal;

    fn denom(s: &str) -> Denom {
        let Ok(d) = Denom::new(s) else {
            panic!("valid denom {s}");
        };
        d
    }

    fn coins(pairs: &[(&str, u128)]) -> Coins {
        pairs
            .iter()
            .map(|(d, a)| Coin::new(denom(d), *a))
            .collect()
    }

    fn addr(b: u8) -> Address {
        Address::from_bytes([b; 20])
    }

    fn funded() -> MemoryLedger {
        let mut ledger = MemoryLedger::new();
        let Ok(()) = ledger.mint(&addr(1), &coins(&[("btc", 10), ("stake", 100)])) else {
            panic!("mint");
        };
        ledger
    }

    #[test]
    fn mint_tracks_supply() {
        let ledger = funded();
        assert_eq!(ledger.balance(&addr(1), "btc"), Amount::new(10));
        assert_eq!(ledger.total_supply("stake"), Amount::new(100));
        assert_eq!(ledger.total_supply("eth"), Amount::ZERO);
    }

    #[test]
    fn multi_coin_transfer_is_all_or_nothing() {
        let mut ledger = funded();
        let before = ledger.clone();
        let result = ledger.transfer(&addr(1), &addr(2), &coins(&[("btc", 5), ("stake", 101)]));
        assert!(matches!(result, Err(AmmError::InsufficientFunds { .. })));
        assert_eq!(ledger, before);

        let Ok(()) = ledger.transfer(&addr(1), &addr(2), &coins(&[("btc", 5), ("stake", 100)]))
        else {
            panic!("transfer");
        };
        assert_eq!(ledger.balance(&addr(2), "btc"), Amount::new(5));
        assert_eq!(ledger.spendable(&addr(1)), coins(&[("btc", 5)]));
    }

    #[test]
    fn burn_reduces_supply() {
        let mut ledger = funded();
        let Ok(()) = ledger.burn(&addr(1), &coins(&[("stake", 40)])) else {
            panic!("burn");
        };
        assert_eq!(ledger.total_supply("stake"), Amount::new(60));
        assert!(ledger.burn(&addr(1), &coins(&[("stake", 61)])).is_err());
        assert_eq!(ledger.total_supply("stake"), Amount::new(60));
    }

    #[test]
    fn param_store_rejects_invalid_set() {
        let mut store = MemoryParamStore::default();
        let Ok(bad) = serde_json::from_str::<Params>(
            r#"{"fee":"1.5","pool_creation_fee":{"denom":"stake","amount":"0"},
                "tax_rate":"0","max_standard_coin_per_pool":"1","max_swap_amount":{}}"#,
        ) else {
            panic!("deserialize");
        };
        assert!(store.set(bad).is_err());
        assert_eq!(store.get().fee(), Params::default().fee());
        assert_ne!(store.get().fee(), Decimal::ZERO);
    }
}
