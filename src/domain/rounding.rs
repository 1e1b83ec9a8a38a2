//! Explicit rounding direction for integer division.

/// Rounding direction for [`mul_div`](crate::math::CheckedArithmetic::mul_div)
/// quotients.
///
/// Payouts and minted liquidity round [`Down`](Rounding::Down); amounts
/// charged by the pool are floored and then bumped by one.
///
/// # Examples
///
/// ```
/// use hydra_coinswap::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
