//! Compound interest projection

use rust_decimal::Decimal;

use super::result::{Error, Result};

/// Longest projection horizon accepted, in years
pub const MAX_YEARS: u32 = 100;

/// Project `principal * (1 + rate)^years`, rounded to cents
///
/// `annual_rate` is a fraction (0.05 for 5%). Only whole years are supported.
pub fn compound(principal: Decimal, annual_rate: Decimal, years: u32) -> Result<Decimal> {
    if annual_rate.is_sign_negative() && !annual_rate.is_zero() {
        return Err(Error::validation("interest rate cannot be negative"));
    }
    if years > MAX_YEARS {
        return Err(Error::validation(format!(
            "projection horizon cannot exceed {} years",
            MAX_YEARS
        )));
    }

    let factor = Decimal::ONE + annual_rate;
    let mut value = principal;
    for _ in 0..years {
        value = value
            .checked_mul(factor)
            .ok_or_else(|| Error::validation("projected balance overflows"))?;
    }
    Ok(value.round_dp(2))
}
