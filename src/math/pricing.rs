//! Constant-product pricing with the fee taken from the input leg.
//!
//! Both formulas keep `input_reserve × output_reserve` non-decreasing
//! across a swap and round in the pool's favour: the exact-input quote
//! is floored, the exact-output quote is floored and then bumped by one.
//!
//! ```text
//! f   = (1 − fee) × 10^18
//! out = ⌊ in·f·R_out / (R_in·10^18 + in·f) ⌋
//! in  = ⌊ R_in·out·10^18 / ((R_out − out)·f) ⌋ + 1
//! ```
//!
//! Intermediates are 256-bit; a quote that does not fit back into an
//! [`Amount`] is an [`AmmError::Overflow`].

use super::wide::{self, U256};
use crate::domain::{Amount, Decimal, Rounding, DECIMAL_SCALE};
use crate::error::AmmError;

fn fee_factor(fee: Decimal) -> Result<U256, AmmError> {
    match fee.complement() {
        Some(f) if !f.is_zero() => Ok(U256::from(f.raw())),
        _ => Err(AmmError::InvalidParams(format!("fee {fee} must be below 1"))),
    }
}

/// Output received for selling exactly `input_amt`.
///
/// # Examples
///
/// ```
/// use hydra_coinswap::domain::{Amount, Decimal};
/// use hydra_coinswap::math::price_for_exact_input;
///
/// let fee: Decimal = "0.003".parse().expect("decimal");
/// let out = price_for_exact_input(
///     Amount::new(100), Amount::new(1_000), Amount::new(1_000), fee,
/// ).expect("priced");
/// assert_eq!(out, Amount::new(90));
/// ```
///
/// # Errors
///
/// - [`AmmError::InsufficientReserve`] if either reserve is zero.
/// - [`AmmError::InvalidParams`] if `fee >= 1`.
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits.
pub fn price_for_exact_input(
    input_amt: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
    fee: Decimal,
) -> Result<Amount, AmmError> {
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(AmmError::InsufficientReserve("pool has a zero reserve"));
    }
    let f = fee_factor(fee)?;

    let effective_input = wide::mul(wide::wide(input_amt), f, "fee-adjusted input overflow")?;
    let numerator = wide::mul(
        effective_input,
        wide::wide(output_reserve),
        "exact-input numerator overflow",
    )?;
    let scaled_reserve = wide::mul(
        wide::wide(input_reserve),
        U256::from(DECIMAL_SCALE),
        "scaled input reserve overflow",
    )?;
    let denominator = scaled_reserve
        .checked_add(effective_input)
        .ok_or(AmmError::Overflow("exact-input denominator overflow"))?;

    let out = wide::div(numerator, denominator, Rounding::Down)?;
    wide::narrow(out, "exact-input quote overflow")
}

/// Input required to buy exactly `output_amt`.
///
/// # Examples
///
/// ```
/// use hydra_coinswap::domain::{Amount, Decimal};
/// use hydra_coinswap::math::price_for_exact_output;
///
/// let fee: Decimal = "0.003".parse().expect("decimal");
/// let paid = price_for_exact_output(
///     Amount::new(100), Amount::new(1_000), Amount::new(1_000), fee,
/// ).expect("priced");
/// assert_eq!(paid, Amount::new(112));
/// ```
///
/// # Errors
///
/// - [`AmmError::InsufficientReserve`] if a reserve is zero or
///   `output_amt` is zero or not below `output_reserve`.
/// - [`AmmError::InvalidParams`] if `fee >= 1`.
/// - [`AmmError::Overflow`] if an intermediate exceeds 256 bits.
pub fn price_for_exact_output(
    output_amt: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
    fee: Decimal,
) -> Result<Amount, AmmError> {
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(AmmError::InsufficientReserve("pool has a zero reserve"));
    }
    if output_amt.is_zero() || output_amt >= output_reserve {
        return Err(AmmError::InsufficientReserve(
            "requested output must be positive and below the output reserve",
        ));
    }
    let f = fee_factor(fee)?;

    let numerator = wide::mul(
        wide::mul(
            wide::wide(input_reserve),
            wide::wide(output_amt),
            "exact-output numerator overflow",
        )?,
        U256::from(DECIMAL_SCALE),
        "exact-output numerator overflow",
    )?;
    let remaining = U256::from(output_reserve.get() - output_amt.get());
    let denominator = wide::mul(remaining, f, "exact-output denominator overflow")?;

    let paid = wide::div(numerator, denominator, Rounding::Down)?
        .checked_add(U256::one())
        .ok_or(AmmError::Overflow("exact-output quote overflow"))?;
    wide::narrow(paid, "exact-output quote overflow")
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn fee(s: &str) -> Decimal {
        let Ok(d) = s.parse() else {
            panic!("valid decimal");
        };
        d
    }

    fn exact_in(a: u128, ri: u128, ro: u128, f: &str) -> Result<Amount, AmmError> {
        price_for_exact_input(Amount::new(a), Amount::new(ri), Amount::new(ro), fee(f))
    }

    fn exact_out(a: u128, ri: u128, ro: u128, f: &str) -> Result<Amount, AmmError> {
        price_for_exact_output(Amount::new(a), Amount::new(ri), Amount::new(ro), fee(f))
    }

    #[test]
    fn exact_input_reference_value() {
        assert_eq!(exact_in(100, 1_000, 1_000, "0.003"), Ok(Amount::new(90)));
    }

    #[test]
    fn exact_output_reference_value() {
        assert_eq!(exact_out(100, 1_000, 1_000, "0.003"), Ok(Amount::new(112)));
    }

    #[test]
    fn zero_fee_matches_plain_curve() {
        // 1000 * 100 / (1000 + 100) = 90.9 -> 90
        assert_eq!(exact_in(100, 1_000, 1_000, "0"), Ok(Amount::new(90)));
        // 1000 * 100 / 900 = 111.1 -> 111 + 1
        assert_eq!(exact_out(100, 1_000, 1_000, "0"), Ok(Amount::new(112)));
        // exact division still adds one
        assert_eq!(exact_out(500, 1_000, 1_000, "0"), Ok(Amount::new(1_001)));
    }

    #[test]
    fn zero_reserves_rejected() {
        assert!(matches!(
            exact_in(1, 0, 1_000, "0.003"),
            Err(AmmError::InsufficientReserve(_))
        ));
        assert!(matches!(
            exact_in(1, 1_000, 0, "0.003"),
            Err(AmmError::InsufficientReserve(_))
        ));
        assert!(matches!(
            exact_out(1, 0, 1_000, "0.003"),
            Err(AmmError::InsufficientReserve(_))
        ));
    }

    #[test]
    fn exact_output_must_stay_below_reserve() {
        assert!(matches!(
            exact_out(1_000, 1_000, 1_000, "0.003"),
            Err(AmmError::InsufficientReserve(_))
        ));
        assert!(matches!(
            exact_out(0, 1_000, 1_000, "0.003"),
            Err(AmmError::InsufficientReserve(_))
        ));
    }

    #[test]
    fn fee_of_one_rejected() {
        assert!(matches!(
            exact_in(1, 1_000, 1_000, "1"),
            Err(AmmError::InvalidParams(_))
        ));
    }

    #[test]
    fn large_reserves_do_not_overflow() {
        let r = 10u128.pow(30);
        let Ok(out) = exact_in(10u128.pow(27), r, r, "0.003") else {
            panic!("expected Ok");
        };
        assert!(out.get() > 0 && out.get() < 10u128.pow(27));
    }

    #[test]
    fn output_round_trip_never_undercharges() {
        // Buying what an exact-input sale yields must cost at most the sale.
        let Ok(out) = exact_in(5_000, 80_000, 120_000, "0.003") else {
            panic!("expected Ok");
        };
        let Ok(paid) = exact_out(out.get(), 80_000, 120_000, "0.003") else {
            panic!("expected Ok");
        };
        assert!(paid.get() <= 5_000);
        // Selling one unit less than the quote yields no more than `out`.
        let Ok(short) = exact_in(paid.get() - 1, 80_000, 120_000, "0.003") else {
            panic!("expected Ok");
        };
        assert!(short <= out);
    }
}
