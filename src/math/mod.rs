//! Arithmetic for the engine: checked amount math, rounding, and the
//! constant-product pricing formulas.
//!
//! Products of reserves and amounts are computed in 256 bits and narrowed
//! back to [`Amount`](crate::domain::Amount) with an explicit overflow
//! error.

mod checked;
mod pricing;
mod wide;

pub use checked::CheckedArithmetic;
pub use pricing::{price_for_exact_input, price_for_exact_output};
