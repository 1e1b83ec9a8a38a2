//! 256-bit intermediates for products of two or three `u128` factors.

use crate::domain::{Amount, Rounding};
use crate::error::AmmError;

mod u256 {
    #![allow(clippy::all, clippy::pedantic, missing_docs)]

    uint::construct_uint! {
        /// 256-bit unsigned integer for intermediate products.
        pub struct U256(4);
    }
}

pub(crate) use u256::U256;

/// Widens an amount.
pub(crate) fn wide(amount: Amount) -> U256 {
    U256::from(amount.get())
}

/// Narrows back to an amount.
///
/// # Errors
///
/// Returns [`AmmError::Overflow`] with `context` if `value` needs more
/// than 128 bits.
pub(crate) fn narrow(value: U256, context: &'static str) -> Result<Amount, AmmError> {
    if value.bits() > 128 {
        return Err(AmmError::Overflow(context));
    }
    Ok(Amount::new(value.low_u128()))
}

/// Checked 256-bit product.
pub(crate) fn mul(a: U256, b: U256, context: &'static str) -> Result<U256, AmmError> {
    a.checked_mul(b).ok_or(AmmError::Overflow(context))
}

/// Division with explicit rounding.
pub(crate) fn div(n: U256, d: U256, rounding: Rounding) -> Result<U256, AmmError> {
    if d.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let q = n / d;
    if rounding.is_up() && !(n % d).is_zero() {
        return Ok(q + U256::one());
    }
    Ok(q)
}

/// `a * b / d` with a 256-bit product.
pub(crate) fn mul_div(a: Amount, b: Amount, d: Amount, rounding: Rounding) -> Result<Amount, AmmError> {
    // a * b < 2^256 for any two u128 factors, so the product cannot fail.
    let product = mul(wide(a), wide(b), "mul_div product overflow")?;
    let q = div(product, wide(d), rounding)?;
    narrow(q, "mul_div quotient overflow")
}
