//! SeaORM Entity for persisted investment analytics
//!
//! Insert-only history: each calculation adds a row and readers take the
//! newest one per property.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "investment_analytics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub property_id: i32,
    /// Percent change from the oldest history point (2dp)
    #[sea_orm(column_name = "price_change_1y", column_type = "Decimal(Some((24, 2)))")]
    pub price_change_1y: Decimal,
    #[sea_orm(column_name = "price_change_3m", column_type = "Decimal(Some((24, 2)))")]
    pub price_change_3m: Decimal,
    /// Coefficient of variation of the price series, in percent
    #[sea_orm(column_type = "Decimal(Some((24, 2)))")]
    pub price_volatility: Decimal,
    #[sea_orm(column_type = "Decimal(Some((24, 2)))")]
    pub rental_yield: Decimal,
    pub rental_income_monthly: i64,
    #[sea_orm(column_type = "Decimal(Some((24, 2)))")]
    pub rental_roi_annual: Decimal,
    /// 999.0 when the property never pays back
    #[sea_orm(column_type = "Decimal(Some((24, 1)))")]
    pub rental_payback_years: Decimal,
    pub flip_potential_profit: i64,
    #[sea_orm(column_type = "Decimal(Some((24, 2)))")]
    pub flip_roi: Decimal,
    pub flip_timeframe_months: i32,
    pub renovation_cost_estimate: i64,
    pub safe_haven_score: i32,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub capital_preservation_index: Decimal,
    pub liquidity_score: i32,
    #[sea_orm(column_name = "price_forecast_3y", column_type = "Decimal(Some((12, 2)))")]
    pub price_forecast_3y: Decimal,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub infrastructure_impact_score: Decimal,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub development_risk_score: Decimal,
    /// C, C+, B, B+, A or A+
    pub investment_rating: String,
    /// low, moderate or high
    pub risk_level: String,
    /// rental, flip or hold
    pub recommended_strategy: String,
    pub calculated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
