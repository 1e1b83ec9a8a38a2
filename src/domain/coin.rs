//! Single-denom coins and multi-denom coin sets.

use std::collections::btree_map;
use std::collections::BTreeMap;

use core::fmt;

use serde::{Deserialize, Serialize};

use super::{Amount, Denom};
use crate::error::AmmError;

/// An amount of one denom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coin {
    /// Asset name.
    pub denom: Denom,
    /// Quantity in the smallest unit.
    pub amount: Amount,
}

impl Coin {
    /// Creates a coin.
    pub fn new(denom: Denom, amount: impl Into<Amount>) -> Self {
        Self {
            denom,
            amount: amount.into(),
        }
    }

    /// Zero of the given denom.
    pub fn zero(denom: Denom) -> Self {
        Self {
            denom,
            amount: Amount::ZERO,
        }
    }

    /// Returns `true` if the amount is strictly positive.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// A set of coins keyed by denom.
///
/// Each denom appears at most once and iteration order carries no
/// meaning beyond being deterministic.  Arithmetic drops denoms whose
/// amount reaches zero; explicitly inserted zero entries are kept (the
/// swap whitelist uses them).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Coins(BTreeMap<Denom, Amount>);

impl Coins {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets the amount for `denom`, replacing any previous entry.
    pub fn insert(&mut self, denom: Denom, amount: Amount) -> Option<Amount> {
        self.0.insert(denom, amount)
    }

    /// Amount held of `denom`, zero if absent.
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0.get(denom).copied().unwrap_or(Amount::ZERO)
    }

    /// Entry lookup that distinguishes "absent" from "zero".
    #[must_use]
    pub fn get(&self, denom: &str) -> Option<Amount> {
        self.0.get(denom).copied()
    }

    /// Returns `true` if no denom is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of denoms present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(denom, amount)` pairs.
    pub fn iter(&self) -> btree_map::Iter<'_, Denom, Amount> {
        self.0.iter()
    }

    /// Adds a coin in place.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::Overflow`] if the denom's total overflows.
    pub fn add_coin(&mut self, coin: &Coin) -> crate::error::Result<()> {
        if coin.amount.is_zero() {
            return Ok(());
        }
        let current = self.amount_of(coin.denom.as_str());
        let total = current
            .checked_add(&coin.amount)
            .ok_or(AmmError::Overflow("coin set addition overflow"))?;
        self.0.insert(coin.denom.clone(), total);
        Ok(())
    }

    /// Subtracts a coin in place, removing the denom if it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientFunds`] if the set holds less than
    /// `coin.amount`.  The set is unchanged on error.
    pub fn sub_coin(&mut self, coin: &Coin) -> crate::error::Result<()> {
        if coin.amount.is_zero() {
            return Ok(());
        }
        let current = self.amount_of(coin.denom.as_str());
        let rest = current
            .checked_sub(&coin.amount)
            .ok_or_else(|| AmmError::insufficient(coin.denom.as_str(), coin.amount, current))?;
        if rest.is_zero() {
            self.0.remove(coin.denom.as_str());
        } else {
            self.0.insert(coin.denom.clone(), rest);
        }
        Ok(())
    }

    /// Checks that every denom in `required` is covered by `self`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientFunds`] naming the first short denom.
    pub fn ensure_covers(&self, required: &Coins) -> crate::error::Result<()> {
        for (denom, needed) in required.iter() {
            let held = self.amount_of(denom.as_str());
            if held < *needed {
                return Err(AmmError::insufficient(denom.as_str(), *needed, held));
            }
        }
        Ok(())
    }
}

impl FromIterator<Coin> for Coins {
    /// Collects coins, summing duplicates.  Amounts that would overflow
    /// saturate at [`Amount::MAX`].
    fn from_iter<I: IntoIterator<Item = Coin>>(iter: I) -> Self {
        let mut map: BTreeMap<Denom, Amount> = BTreeMap::new();
        for coin in iter {
            let entry = map.entry(coin.denom).or_insert(Amount::ZERO);
            *entry = entry.checked_add(&coin.amount).unwrap_or(Amount::MAX);
        }
        Self(map)
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = (&'a Denom, &'a Amount);
    type IntoIter = btree_map::Iter<'a, Denom, Amount>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denom, amount) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            write!(f, "{amount}{denom}")?;
        }
        Ok(())
    }
}
