//! Conversions between pence (what the backend stores) and pounds (what
//! people type and read).

use rust_decimal::{Decimal, prelude::ToPrimitive};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceError {
    #[error("Enter an amount like 7.50")]
    Invalid,
    #[error("Amount cannot be negative")]
    Negative,
    #[error("Amount can have at most two decimal places")]
    TooPrecise,
}

/// Format an amount in pence as pounds, e.g. `750` -> `"£7.50"`.
pub fn format_pence(pence: i64) -> String {
    format!("£{}", Decimal::new(pence, 2))
}

/// Parse a pounds amount typed by a person into pence.
///
/// Accepts an optional leading `£`. Zero is allowed; callers decide whether
/// a zero amount means anything.
pub fn parse_pounds(input: &str) -> Result<i64, PriceError> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('£').unwrap_or(trimmed).trim();
    let amount =
        Decimal::from_str(trimmed).map_err(|_| PriceError::Invalid)?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative);
    }
    if amount.normalize().scale() > 2 {
        return Err(PriceError::TooPrecise);
    }
    (amount * Decimal::ONE_HUNDRED)
        .trunc()
        .to_i64()
        .ok_or(PriceError::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_pence_as_pounds() {
        assert_eq!(format_pence(750), "£7.50");
        assert_eq!(format_pence(1200), "£12.00");
        assert_eq!(format_pence(5), "£0.05");
    }

    #[test]
    fn parses_pounds() {
        assert_eq!(parse_pounds("7.5"), Ok(750));
        assert_eq!(parse_pounds(" £12 "), Ok(1200));
        assert_eq!(parse_pounds("0"), Ok(0));
        assert_eq!(parse_pounds("3.10"), Ok(310));
    }

    #[test]
    fn rejects_bad_amounts() {
        assert_eq!(parse_pounds(""), Err(PriceError::Invalid));
        assert_eq!(parse_pounds("abc"), Err(PriceError::Invalid));
        assert_eq!(parse_pounds("-1"), Err(PriceError::Negative));
        assert_eq!(parse_pounds("1.005"), Err(PriceError::TooPrecise));
    }
}
