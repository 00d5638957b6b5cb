//! Three-year price forecast adjusted for nearby infrastructure

use rust_decimal::Decimal;

use super::coefficients::assumptions::{
    DEFAULT_PROJECT_IMPACT, DEVELOPMENT_RISK, MAX_INFRASTRUCTURE_IMPACT,
};
use super::number_format::round_dp;

#[derive(Debug, Clone)]
pub struct PriceForecastInput {
    /// Regional annual growth in percent
    pub base_growth_percent: Decimal,
    /// Impact coefficients of completed projects in the property's region
    pub project_impacts: Vec<Option<Decimal>>,
    pub has_coordinates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceForecast {
    pub price_forecast_3y: Decimal,
    pub infrastructure_impact_score: Decimal,
    pub development_risk_score: Decimal,
}

/// Sum of project impacts, capped at 0.30
pub fn infrastructure_impact(project_impacts: &[Option<Decimal>]) -> Decimal {
    project_impacts
        .iter()
        .map(|impact| impact.unwrap_or(DEFAULT_PROJECT_IMPACT))
        .sum::<Decimal>()
        .min(MAX_INFRASTRUCTURE_IMPACT)
}

pub fn calculate_price_forecast(input: &PriceForecastInput) -> PriceForecast {
    let base_growth = input.base_growth_percent / Decimal::ONE_HUNDRED;
    let impact = if input.has_coordinates {
        infrastructure_impact(&input.project_impacts)
    } else {
        Decimal::ZERO
    };

    let adjusted_growth = base_growth * (Decimal::ONE + impact - DEVELOPMENT_RISK);
    let factor = Decimal::ONE + adjusted_growth;
    let forecast = (factor * factor * factor - Decimal::ONE) * Decimal::ONE_HUNDRED;

    PriceForecast {
        price_forecast_3y: round_dp(forecast, 2),
        infrastructure_impact_score: round_dp(impact, 2),
        development_risk_score: DEVELOPMENT_RISK,
    }
}
