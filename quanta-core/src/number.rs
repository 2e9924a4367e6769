//! Precision-safe float arithmetic
//!
//! Unit factors are combined with binary doubles. A naive `0.1 * 0.1` gives
//! `0.010000000000000002`; the helpers here count the decimal digits of each
//! operand and round the result back to that many digits, so factor
//! combinations keep the decimal value a human would expect.

use crate::error::{QuantityError, Result};

/// Upper bound on [`fraction_digits`]; past 308 `10^n` is infinite anyway
pub const MAX_FRACTION_DIGITS: u32 = 400;

/// Number of times `value` must be multiplied by ten to become integral
///
/// The count follows the binary value, so `0.1` gives 1 but `-0.000773`
/// gives 19. Non-finite values have none.
pub fn fraction_digits(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    let mut shifted = value;
    let mut digits = 0;
    while shifted % 1.0 != 0.0 && digits < MAX_FRACTION_DIGITS {
        shifted *= 10.0;
        digits += 1;
    }
    digits
}

/// `10^exp` as a double, infinite past the float range
pub fn pow10(exp: u32) -> f64 {
    10f64.powf(exp as f64)
}

/// Round half toward positive infinity (`2.5 -> 3`, `-2.5 -> -2`)
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round `value` half-up to `decimals` fractional digits
///
/// Falls back to the input when the shifted value leaves the finite range.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = pow10(decimals);
    let shifted = value * factor;
    if !factor.is_finite() || !shifted.is_finite() {
        return value;
    }
    round_half_up(shifted) / factor
}

/// Multiply two doubles, rounding the product to the combined digit count
/// of the operands
pub fn mul_safe(lhs: f64, rhs: f64) -> f64 {
    let digits = fraction_digits(lhs) + fraction_digits(rhs);
    let product = lhs * rhs;
    if digits == 0 {
        product
    } else {
        round_to(product, digits)
    }
}

/// Divide two doubles, shifting the divisor to an integer first
///
/// Fails with `DivideByZero` when `den` is zero.
pub fn div_safe(num: f64, den: f64) -> Result<f64> {
    if den == 0.0 {
        return Err(QuantityError::DivideByZero);
    }
    let factor = pow10(fraction_digits(den));
    if !factor.is_finite() {
        return Ok(num / den);
    }
    let inverse = factor / (factor * den);
    Ok(mul_safe(num, inverse))
}

/// Render a scalar the way quantity text prints numbers
///
/// Plain decimal notation between `1e-6` and `1e21`, exponent notation
/// outside that range.
pub fn format_scalar(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if value.is_finite() && (magnitude >= 1e21 || magnitude < 1e-6) {
        format!("{:e}", value)
    } else {
        format!("{}", value)
    }
}
