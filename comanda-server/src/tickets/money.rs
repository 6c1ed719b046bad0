//! Money arithmetic
//!
//! Prices cross the API as `f64` but all arithmetic runs on [`Decimal`];
//! floats are converted once at the boundary and results rounded to two
//! decimals, half away from zero. Summation order can then never change a
//! total.

use rust_decimal::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};

use super::{TicketError, TicketResult};

/// Convert an API-edge float into an exact decimal
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert back to the API-edge float after rounding
pub fn to_f64(value: Decimal) -> f64 {
    round2(value).to_f64().unwrap_or_default()
}

/// Round to 2dp, midpoint away from zero
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// quantity × unit price, exact
pub fn line_total(price: f64, quantity: i32) -> Decimal {
    to_decimal(price) * Decimal::from(quantity)
}

/// Reject cart lines the kitchen could not cook or the bill could not price
pub fn validate_line(name: &str, quantity: i32, price: f64) -> TicketResult<()> {
    if name.trim().is_empty() {
        return Err(TicketError::Validation("Item name must not be empty".into()));
    }
    if quantity <= 0 {
        return Err(TicketError::Validation(format!(
            "Item '{name}' has non-positive quantity {quantity}"
        )));
    }
    if price < 0.0 || !price.is_finite() {
        return Err(TicketError::Validation(format!(
            "Item '{name}' has invalid price {price}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2_half_up() {
        assert_eq!(to_f64(to_decimal(2.005)), 2.01);
        assert_eq!(to_f64(to_decimal(2.004)), 2.0);
    }

    #[test]
    fn test_line_total_exact() {
        // 0.1 * 3 drifts in f64; not in Decimal
        assert_eq!(to_f64(line_total(0.1, 3)), 0.3);
    }

    #[test]
    fn test_validate_line() {
        assert!(validate_line("Pizza", 1, 250.0).is_ok());
        assert!(validate_line("", 1, 1.0).is_err());
        assert!(validate_line("Pizza", 0, 1.0).is_err());
        assert!(validate_line("Pizza", -2, 1.0).is_err());
        assert!(validate_line("Pizza", 1, -1.0).is_err());
        assert!(validate_line("Pizza", 1, f64::NAN).is_err());
    }
}
