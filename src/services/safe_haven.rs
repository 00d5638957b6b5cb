//! Capital preservation ("safe haven") scenario

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal_macros::dec;

use super::number_format::round_dp;

const MIN_SCORE: i32 = 1;
const MAX_SCORE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SafeHaven {
    /// 1..=10
    pub safe_haven_score: i32,
    /// 0..=100, 2dp
    pub capital_preservation_index: Decimal,
    /// 1..=10
    pub liquidity_score: i32,
}

/// Combine volatility and class liquidity into a 1..=10 score
pub fn calculate_safe_haven(price_volatility: Decimal, class_liquidity: i32) -> SafeHaven {
    let preservation = (Decimal::ONE_HUNDRED - price_volatility * dec!(2))
        .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
    let liquidity = class_liquidity.clamp(MIN_SCORE, MAX_SCORE);

    let weighted =
        (preservation * dec!(0.4) + Decimal::from(liquidity) * dec!(10) * dec!(0.6)) / dec!(10);
    let score = round_dp(weighted, 0)
        .to_i32()
        .unwrap_or(MIN_SCORE)
        .clamp(MIN_SCORE, MAX_SCORE);

    SafeHaven {
        safe_haven_score: score,
        capital_preservation_index: round_dp(preservation, 2),
        liquidity_score: liquidity,
    }
}
