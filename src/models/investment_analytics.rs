//! Investment analytics request/response models
//!
//! Decimal outputs are sent as fixed-precision strings ("0.00", "999.0")
//! so clients never see float rounding artifacts.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entities::investment_analytics;
use crate::services::investment_analytics::BatchCalculation;
use crate::services::number_format::format_dp;

/// Maximum number of property ids accepted by the batch endpoint
pub const MAX_BATCH_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentAnalyticsResponse {
    pub id: i64,
    pub property_id: i32,
    pub price_change_1y: String,
    pub price_change_3m: String,
    pub price_volatility: String,
    pub rental_yield: String,
    pub rental_income_monthly: i64,
    pub rental_roi_annual: String,
    pub rental_payback_years: String,
    pub flip_potential_profit: i64,
    pub flip_roi: String,
    pub flip_timeframe_months: i32,
    pub renovation_cost_estimate: i64,
    pub safe_haven_score: i32,
    pub capital_preservation_index: String,
    pub liquidity_score: i32,
    pub price_forecast_3y: String,
    pub infrastructure_impact_score: String,
    pub development_risk_score: String,
    pub investment_rating: String,
    pub risk_level: String,
    pub recommended_strategy: String,
    pub calculated_at: DateTime<FixedOffset>,
}

impl From<investment_analytics::Model> for InvestmentAnalyticsResponse {
    fn from(model: investment_analytics::Model) -> Self {
        Self {
            id: model.id,
            property_id: model.property_id,
            price_change_1y: format_dp(model.price_change_1y, 2),
            price_change_3m: format_dp(model.price_change_3m, 2),
            price_volatility: format_dp(model.price_volatility, 2),
            rental_yield: format_dp(model.rental_yield, 2),
            rental_income_monthly: model.rental_income_monthly,
            rental_roi_annual: format_dp(model.rental_roi_annual, 2),
            rental_payback_years: format_dp(model.rental_payback_years, 1),
            flip_potential_profit: model.flip_potential_profit,
            flip_roi: format_dp(model.flip_roi, 2),
            flip_timeframe_months: model.flip_timeframe_months,
            renovation_cost_estimate: model.renovation_cost_estimate,
            safe_haven_score: model.safe_haven_score,
            capital_preservation_index: format_dp(model.capital_preservation_index, 2),
            liquidity_score: model.liquidity_score,
            price_forecast_3y: format_dp(model.price_forecast_3y, 2),
            infrastructure_impact_score: format_dp(model.infrastructure_impact_score, 2),
            development_risk_score: format_dp(model.development_risk_score, 2),
            investment_rating: model.investment_rating,
            risk_level: model.risk_level,
            recommended_strategy: model.recommended_strategy,
            calculated_at: model.calculated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsHistoryQuery {
    /// Maximum number of rows (default: 20, max: 100)
    pub limit: Option<u64>,
}

impl AnalyticsHistoryQuery {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(limit) = self.limit {
            if limit < 1 {
                return Err("limit must be at least 1".to_string());
            }
            if limit > 100 {
                return Err("limit cannot exceed 100".to_string());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsHistoryResponse {
    pub property_id: i32,
    pub items: Vec<InvestmentAnalyticsResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalyticsRequest {
    pub property_ids: Vec<i32>,
}

impl BatchAnalyticsRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.property_ids.is_empty() {
            return Err("propertyIds cannot be empty".to_string());
        }
        if self.property_ids.len() > MAX_BATCH_SIZE {
            return Err(format!("propertyIds cannot exceed {} entries", MAX_BATCH_SIZE));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchItemStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItemResponse {
    pub property_id: i32,
    pub status: BatchItemStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<InvestmentAnalyticsResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<BatchCalculation> for BatchItemResponse {
    fn from(item: BatchCalculation) -> Self {
        match item.result {
            Ok(model) => Self {
                property_id: item.property_id,
                status: BatchItemStatus::Success,
                data: Some(model.into()),
                error: None,
            },
            Err(e) => Self {
                property_id: item.property_id,
                status: BatchItemStatus::Error,
                data: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchAnalyticsResponse {
    pub results: Vec<BatchItemResponse>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchAnalyticsResponse {
    pub fn from_calculations(calculations: Vec<BatchCalculation>) -> Self {
        let results: Vec<BatchItemResponse> = calculations.into_iter().map(Into::into).collect();
        let failed = results
            .iter()
            .filter(|r| r.status == BatchItemStatus::Error)
            .count();

        Self {
            succeeded: results.len() - failed,
            failed,
            results,
        }
    }
}
