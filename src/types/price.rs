//! Fixed-point price tick utilities.
//!
//! ## Overview
//!
//! Prices in matchbook are discrete tick counts stored as `u32`. The tick is
//! the smallest representable price increment: one hundredth of a unit, so
//! a price of `50.25` is `5_025` ticks.
//!
//! ## Why Fixed-Point?
//!
//! Floating-point arithmetic can produce different results on different
//! hardware, breaking determinism. Tick counts ensure identical results
//! everywhere, and give the book a dense, bounded key space for price
//! indexing.
//!
//! ## Price Range
//!
//! The representable range is `0 < price < MAX_PRICE` (10,000,000 ticks,
//! i.e. up to 100,000.00). Out-of-range prices are a caller precondition
//! violation, rejected at the submission boundary.
//!
//! ## Examples
//!
//! ```
//! use matchbook::types::price::{to_ticks, from_ticks};
//!
//! let price = to_ticks("50.25").unwrap();
//! assert_eq!(price, 5_025);
//!
//! assert_eq!(from_ticks(price), "50.25");
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Exclusive upper bound of the representable price range, in ticks.
pub const MAX_PRICE: u32 = 10_000_000;

/// Ticks per whole price unit: 10^2, two decimal places.
pub const TICK_SCALE: u32 = 100;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal string to a tick count.
///
/// Returns `None` if parsing fails, the value is negative, or the result
/// falls outside the representable range.
///
/// # Example
///
/// ```
/// use matchbook::types::price::to_ticks;
///
/// assert_eq!(to_ticks("1.00"), Some(100));
/// assert_eq!(to_ticks("50.25"), Some(5_025));
/// assert_eq!(to_ticks("0.01"), Some(1));
/// assert_eq!(to_ticks("-1"), None);
/// ```
pub fn to_ticks(s: &str) -> Option<u32> {
    let decimal = Decimal::from_str(s).ok()?;
    decimal_to_ticks(decimal)
}

/// Convert a `Decimal` to a tick count.
///
/// Values are rounded to the nearest tick. Returns `None` for negative
/// values and values at or above [`MAX_PRICE`] ticks.
pub fn decimal_to_ticks(d: Decimal) -> Option<u32> {
    if d.is_sign_negative() {
        return None;
    }

    let scaled = d.checked_mul(Decimal::from(TICK_SCALE))?;
    let rounded = scaled.round_dp(0);
    let ticks = rounded.to_u32()?;

    if ticks >= MAX_PRICE {
        return None;
    }
    Some(ticks)
}

/// Convert a tick count to a `Decimal`.
pub fn ticks_to_decimal(ticks: u32) -> Decimal {
    Decimal::from(ticks) / Decimal::from(TICK_SCALE)
}

/// Convert a tick count to a string with two decimal places.
///
/// # Example
///
/// ```
/// use matchbook::types::price::from_ticks;
///
/// assert_eq!(from_ticks(100), "1.00");
/// assert_eq!(from_ticks(5_025), "50.25");
/// ```
pub fn from_ticks(ticks: u32) -> String {
    format!("{:.2}", ticks_to_decimal(ticks))
}

/// Check that a tick count is a valid limit price.
///
/// Valid prices are positive and below [`MAX_PRICE`].
#[inline]
pub fn in_range(ticks: u32) -> bool {
    ticks > 0 && ticks < MAX_PRICE
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(MAX_PRICE, 10_000_000);
        assert_eq!(TICK_SCALE, 100);
    }

    #[test]
    fn test_to_ticks_basic() {
        assert_eq!(to_ticks("1.00"), Some(100));
        assert_eq!(to_ticks("1"), Some(100));
        assert_eq!(to_ticks("0.5"), Some(50));
        assert_eq!(to_ticks("0.01"), Some(1));
        assert_eq!(to_ticks("50.25"), Some(5_025));
        assert_eq!(to_ticks("99999.99"), Some(9_999_999));
    }

    #[test]
    fn test_to_ticks_edge_cases() {
        assert_eq!(to_ticks("0"), Some(0));

        // Negative values should return None
        assert_eq!(to_ticks("-1.0"), None);

        // At or above the bound should return None
        assert_eq!(to_ticks("100000.00"), None);
        assert_eq!(to_ticks("123456789"), None);

        // Invalid strings should return None
        assert_eq!(to_ticks("abc"), None);
        assert_eq!(to_ticks(""), None);
    }

    #[test]
    fn test_to_ticks_rounds_sub_tick() {
        assert_eq!(to_ticks("1.004"), Some(100));
        assert_eq!(to_ticks("1.006"), Some(101));
    }

    #[test]
    fn test_from_ticks() {
        assert_eq!(from_ticks(100), "1.00");
        assert_eq!(from_ticks(50), "0.50");
        assert_eq!(from_ticks(1), "0.01");
        assert_eq!(from_ticks(5_025), "50.25");
        assert_eq!(from_ticks(0), "0.00");
    }

    #[test]
    fn test_roundtrip() {
        let values = ["1.00", "0.50", "50.25", "0.01", "99999.99"];

        for s in values {
            let ticks = to_ticks(s).unwrap();
            assert_eq!(from_ticks(ticks), s, "Roundtrip failed for {}", s);
        }
    }

    #[test]
    fn test_in_range() {
        assert!(!in_range(0));
        assert!(in_range(1));
        assert!(in_range(MAX_PRICE - 1));
        assert!(!in_range(MAX_PRICE));
        assert!(!in_range(u32::MAX));
    }
}
