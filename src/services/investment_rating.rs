//! Letter rating, risk level and recommended strategy
//!
//! Consumes the rounded outputs of the scenario calculators.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Investment rating, ordered worst to best
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InvestmentRating {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl InvestmentRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentRating::C => "C",
            InvestmentRating::CPlus => "C+",
            InvestmentRating::B => "B",
            InvestmentRating::BPlus => "B+",
            InvestmentRating::A => "A",
            InvestmentRating::APlus => "A+",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "C" => Some(InvestmentRating::C),
            "C+" => Some(InvestmentRating::CPlus),
            "B" => Some(InvestmentRating::B),
            "B+" => Some(InvestmentRating::BPlus),
            "A" => Some(InvestmentRating::A),
            "A+" => Some(InvestmentRating::APlus),
            _ => None,
        }
    }

    fn from_average(avg: Decimal) -> Self {
        if avg >= dec!(15) {
            InvestmentRating::APlus
        } else if avg >= dec!(12) {
            InvestmentRating::A
        } else if avg >= dec!(10) {
            InvestmentRating::BPlus
        } else if avg >= dec!(8) {
            InvestmentRating::B
        } else if avg >= dec!(6) {
            InvestmentRating::CPlus
        } else {
            InvestmentRating::C
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Rental,
    Flip,
    Hold,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Rental => "rental",
            Strategy::Flip => "flip",
            Strategy::Hold => "hold",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RatingInput {
    pub rental_roi: Decimal,
    pub flip_roi: Decimal,
    pub safe_haven_score: i32,
    pub price_volatility: Decimal,
    pub liquidity_score: i32,
    pub price_forecast_3y: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvestmentVerdict {
    pub investment_rating: InvestmentRating,
    pub risk_level: RiskLevel,
    pub recommended_strategy: Strategy,
}

pub fn investment_rating(input: &RatingInput) -> InvestmentRating {
    let avg = (input.rental_roi + input.flip_roi + Decimal::from(input.safe_haven_score)) / dec!(3);
    InvestmentRating::from_average(avg)
}

pub fn risk_level(input: &RatingInput) -> RiskLevel {
    let risk_score = input.price_volatility * dec!(0.7)
        + Decimal::from(10 - input.liquidity_score) * dec!(0.3);

    if risk_score <= dec!(3) {
        RiskLevel::Low
    } else if risk_score <= dec!(6) {
        RiskLevel::Moderate
    } else {
        RiskLevel::High
    }
}

pub fn recommended_strategy(input: &RatingInput) -> Strategy {
    if input.flip_roi > input.rental_roi && input.flip_roi > dec!(15) {
        Strategy::Flip
    } else if input.rental_roi > dec!(8) {
        Strategy::Rental
    } else if input.price_forecast_3y > dec!(10) {
        Strategy::Hold
    } else {
        Strategy::Rental
    }
}

pub fn synthesize(input: &RatingInput) -> InvestmentVerdict {
    InvestmentVerdict {
        investment_rating: investment_rating(input),
        risk_level: risk_level(input),
        recommended_strategy: recommended_strategy(input),
    }
}
