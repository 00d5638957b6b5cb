//! Rounding and formatting helpers shared by the analytics calculators

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Round half away from zero to `dp` decimal places
pub fn round_dp(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole number of currency units
pub fn round_to_i64(value: Decimal) -> i64 {
    round_dp(value, 0).to_i64().unwrap_or(0)
}

/// Format with exactly `dp` decimal places (e.g., "0.00", "999.0")
pub fn format_dp(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, round_dp(value, dp))
}

/// Percent change from `from` to `to`; zero when `from` is zero
pub fn percent_change(from: Decimal, to: Decimal) -> Decimal {
    if from.is_zero() {
        return Decimal::ZERO;
    }
    (to - from) / from * Decimal::ONE_HUNDRED
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_round_dp_midpoint() {
        assert_eq!(round_dp(dec!(1.265), 2), dec!(1.27));
        assert_eq!(round_dp(dec!(-1.265), 2), dec!(-1.27));
        assert_eq!(round_dp(dec!(9.4), 0), dec!(9));
    }

    #[test]
    fn test_round_to_i64() {
        assert_eq!(round_to_i64(dec!(61666.666666)), 61667);
        assert_eq!(round_to_i64(dec!(-0.4)), 0);
    }

    #[test]
    fn test_format_dp_pads_zeros() {
        assert_eq!(format_dp(Decimal::ZERO, 2), "0.00");
        assert_eq!(format_dp(dec!(999), 1), "999.0");
        assert_eq!(format_dp(dec!(25.41215703), 2), "25.41");
        assert_eq!(format_dp(dec!(-6.212), 2), "-6.21");
    }

    #[test]
    fn test_percent_change_zero_base() {
        assert_eq!(percent_change(Decimal::ZERO, dec!(100)), Decimal::ZERO);
        assert_eq!(percent_change(dec!(100), dec!(110)), dec!(10));
    }
}
