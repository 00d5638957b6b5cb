//! Price dynamics from a property's price history
//!
//! The series is ordered most recent first, as returned by
//! `AnalyticsRepository::find_price_history`.

use rust_decimal::{Decimal, MathematicalOps};

use super::number_format::{percent_change, round_dp};

/// Maximum number of history points considered (one year of daily data)
pub const MAX_HISTORY_POINTS: u64 = 365;

/// Index of the point treated as "three months ago"
const THREE_MONTHS_INDEX: usize = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceDynamics {
    pub price_change_1y: Decimal,
    pub price_change_3m: Decimal,
    /// Coefficient of variation in percent
    pub price_volatility: Decimal,
}

/// Calculate price changes and volatility, rounded to 2 decimal places
///
/// Fewer than two points is not an error: all metrics are zero.
pub fn calculate_price_dynamics(prices: &[Decimal]) -> PriceDynamics {
    if prices.len() < 2 {
        return PriceDynamics::default();
    }

    let newest = prices[0];
    let oldest = prices[prices.len() - 1];
    let three_months_ago = prices[THREE_MONTHS_INDEX.min(prices.len() - 1)];

    PriceDynamics {
        price_change_1y: round_dp(percent_change(oldest, newest), 2),
        price_change_3m: round_dp(percent_change(three_months_ago, newest), 2),
        price_volatility: round_dp(coefficient_of_variation(prices), 2),
    }
}

/// Population standard deviation over mean, in percent
fn coefficient_of_variation(prices: &[Decimal]) -> Decimal {
    let count = Decimal::from(prices.len());
    let mean = prices.iter().copied().sum::<Decimal>() / count;
    if mean.is_zero() {
        return Decimal::ZERO;
    }

    // Deviations relative to the mean stay small for any listing price
    let relative_variance = prices
        .iter()
        .map(|price| {
            let deviation = *price / mean - Decimal::ONE;
            deviation * deviation
        })
        .sum::<Decimal>()
        / count;

    let relative_std_dev = relative_variance.sqrt().unwrap_or(Decimal::ZERO);
    (relative_std_dev * Decimal::ONE_HUNDRED).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_and_single_point() {
        assert_eq!(calculate_price_dynamics(&[]), PriceDynamics::default());

        let single = calculate_price_dynamics(&[dec!(10000000)]);
        assert_eq!(single.price_change_1y, Decimal::ZERO);
        assert_eq!(single.price_change_3m, Decimal::ZERO);
        assert_eq!(single.price_volatility, Decimal::ZERO);
    }

    #[test]
    fn test_two_points() {
        // Newest first: grew from 100 to 110
        let dynamics = calculate_price_dynamics(&[dec!(110), dec!(100)]);
        assert_eq!(dynamics.price_change_1y, dec!(10));
        // Short series: the 3m point is the oldest available
        assert_eq!(dynamics.price_change_3m, dec!(10));
        // mean 105, std 5 → 4.76%
        assert_eq!(dynamics.price_volatility, dec!(4.76));
    }

    #[test]
    fn test_three_month_point_uses_index_90() {
        let mut prices = vec![dec!(120)];
        prices.extend(std::iter::repeat_n(dec!(110), 89));
        prices.push(dec!(100)); // index 90
        prices.extend(std::iter::repeat_n(dec!(80), 100));

        let dynamics = calculate_price_dynamics(&prices);
        assert_eq!(dynamics.price_change_3m, dec!(20));
        assert_eq!(dynamics.price_change_1y, dec!(50));
    }

    #[test]
    fn test_flat_series_has_no_volatility() {
        let prices = vec![dec!(5000000); 30];
        let dynamics = calculate_price_dynamics(&prices);
        assert_eq!(dynamics.price_change_1y, Decimal::ZERO);
        assert_eq!(dynamics.price_volatility, Decimal::ZERO);
    }

    #[test]
    fn test_extreme_prices_do_not_overflow() {
        let dynamics = calculate_price_dynamics(&[dec!(9000000000000000), dec!(1)]);
        // mean ≈ 4.5e15, both points deviate from it by ~100%
        assert_eq!(dynamics.price_volatility, dec!(100));
        assert!(dynamics.price_change_1y > dec!(1000000000000000));

        let top = dec!(9999999999999999.99);
        let dynamics = calculate_price_dynamics(&[top, dec!(0.01), top, dec!(0.01)]);
        assert_eq!(dynamics.price_volatility, dec!(100));
    }

    #[test]
    fn test_zero_oldest_price_does_not_divide() {
        let dynamics = calculate_price_dynamics(&[dec!(100), Decimal::ZERO]);
        assert_eq!(dynamics.price_change_1y, Decimal::ZERO);
    }
}
