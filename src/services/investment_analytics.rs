//! Investment Analytics Service
//!
//! Loads a property with its region, class, cost structure, price history
//! and regional infrastructure projects, runs the scenario calculators and
//! stores the result as a new `investment_analytics` row.
//!
//! Reads go through a TTL: the newest row is served while it is younger than
//! the configured TTL (24 hours by default), otherwise a fresh calculation
//! is made. Underlying data changes do not invalidate a row early.

use chrono::{DateTime, Duration, Utc};
use futures_util::stream::{self, StreamExt};
use rust_decimal::Decimal;
use sea_orm::{DbErr, Set};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::entities::investment_analytics;
use crate::services::analytics_repository::{AnalyticsRepository, PropertySnapshot};
use crate::services::coefficients::{CoefficientTables, RegionalCostStructure};
use crate::services::flip_scenario::{FlipScenario, FlipScenarioInput, calculate_flip_scenario};
use crate::services::investment_rating::{InvestmentVerdict, RatingInput, synthesize};
use crate::services::price_dynamics::{MAX_HISTORY_POINTS, PriceDynamics, calculate_price_dynamics};
use crate::services::price_forecast::{PriceForecast, PriceForecastInput, calculate_price_forecast};
use crate::services::rental_scenario::{
    RentalScenario, RentalScenarioInput, calculate_rental_scenario,
};
use crate::services::safe_haven::{SafeHaven, calculate_safe_haven};

pub const DEFAULT_TTL_HOURS: i64 = 24;
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;
pub const DEFAULT_HISTORY_LIMIT: u64 = 20;
pub const MAX_HISTORY_LIMIT: u64 = 100;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Property {property_id} not found")]
    NotFound { property_id: i32 },
    #[error("Database error: {0}")]
    Database(String),
}

impl From<DbErr> for AnalyticsError {
    fn from(err: DbErr) -> Self {
        AnalyticsError::Database(err.to_string())
    }
}

/// Everything the calculators need for one property
#[derive(Debug, Clone)]
pub struct AnalyticsInputs {
    pub snapshot: PropertySnapshot,
    pub costs: RegionalCostStructure,
    /// Most recent first
    pub price_series: Vec<Decimal>,
    pub project_impacts: Vec<Option<Decimal>>,
}

/// Calculator outputs before persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputedAnalytics {
    pub dynamics: PriceDynamics,
    pub rental: RentalScenario,
    pub flip: FlipScenario,
    pub safe_haven: SafeHaven,
    pub forecast: PriceForecast,
    pub verdict: InvestmentVerdict,
}

impl ComputedAnalytics {
    fn into_active_model(
        self,
        property_id: i32,
        calculated_at: DateTime<Utc>,
    ) -> investment_analytics::ActiveModel {
        investment_analytics::ActiveModel {
            property_id: Set(property_id),
            price_change_1y: Set(self.dynamics.price_change_1y),
            price_change_3m: Set(self.dynamics.price_change_3m),
            price_volatility: Set(self.dynamics.price_volatility),
            rental_yield: Set(self.rental.rental_yield),
            rental_income_monthly: Set(self.rental.rental_income_monthly),
            rental_roi_annual: Set(self.rental.rental_roi_annual),
            rental_payback_years: Set(self.rental.rental_payback_years),
            flip_potential_profit: Set(self.flip.flip_potential_profit),
            flip_roi: Set(self.flip.flip_roi),
            flip_timeframe_months: Set(self.flip.flip_timeframe_months),
            renovation_cost_estimate: Set(self.flip.renovation_cost_estimate),
            safe_haven_score: Set(self.safe_haven.safe_haven_score),
            capital_preservation_index: Set(self.safe_haven.capital_preservation_index),
            liquidity_score: Set(self.safe_haven.liquidity_score),
            price_forecast_3y: Set(self.forecast.price_forecast_3y),
            infrastructure_impact_score: Set(self.forecast.infrastructure_impact_score),
            development_risk_score: Set(self.forecast.development_risk_score),
            investment_rating: Set(self.verdict.investment_rating.as_str().to_string()),
            risk_level: Set(self.verdict.risk_level.as_str().to_string()),
            recommended_strategy: Set(self.verdict.recommended_strategy.as_str().to_string()),
            calculated_at: Set(calculated_at.fixed_offset()),
            ..Default::default()
        }
    }
}

/// Run every calculator over fully resolved inputs
///
/// Pure: no I/O, no clock, no randomness.
pub fn compute_analytics(
    inputs: &AnalyticsInputs,
    tables: &CoefficientTables,
) -> ComputedAnalytics {
    let property = &inputs.snapshot.property;
    let region = inputs.snapshot.region.name.as_str();
    let class = inputs.snapshot.property_class.name.as_str();

    let dynamics = calculate_price_dynamics(&inputs.price_series);

    let rental = calculate_rental_scenario(&RentalScenarioInput {
        price: property.price,
        area: property.area,
        annual_yield_percent: tables.rental_yield(region),
        costs: inputs.costs,
    });

    let flip = calculate_flip_scenario(&FlipScenarioInput {
        price: property.price,
        area: property.area,
        renovation_cost_per_sqm: tables.renovation_cost_per_sqm(class),
        value_increase_percent: tables.value_increase_percent(class),
    });

    let safe_haven = calculate_safe_haven(dynamics.price_volatility, tables.liquidity_score(class));

    let forecast = calculate_price_forecast(&PriceForecastInput {
        base_growth_percent: tables.growth_rate(region),
        project_impacts: inputs.project_impacts.clone(),
        has_coordinates: inputs.snapshot.has_coordinates(),
    });

    let verdict = synthesize(&RatingInput {
        rental_roi: rental.rental_roi_annual,
        flip_roi: flip.flip_roi,
        safe_haven_score: safe_haven.safe_haven_score,
        price_volatility: dynamics.price_volatility,
        liquidity_score: safe_haven.liquidity_score,
        price_forecast_3y: forecast.price_forecast_3y,
    });

    ComputedAnalytics {
        dynamics,
        rental,
        flip,
        safe_haven,
        forecast,
        verdict,
    }
}

/// Outcome of one id in a batch
#[derive(Debug)]
pub struct BatchCalculation {
    pub property_id: i32,
    pub result: Result<investment_analytics::Model, AnalyticsError>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RefreshStats {
    pub candidates: usize,
    pub refreshed: usize,
    pub failed: usize,
}

/// Investment analytics orchestrator
pub struct InvestmentAnalyticsService {
    repository: Arc<dyn AnalyticsRepository>,
    tables: Arc<CoefficientTables>,
    ttl: Duration,
    batch_concurrency: usize,
}

impl InvestmentAnalyticsService {
    pub fn new(repository: Arc<dyn AnalyticsRepository>, tables: CoefficientTables) -> Self {
        Self {
            repository,
            tables: Arc::new(tables),
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn repository(&self) -> &Arc<dyn AnalyticsRepository> {
        &self.repository
    }

    /// Load and resolve everything needed for one property
    pub async fn load_inputs(&self, property_id: i32) -> Result<AnalyticsInputs, AnalyticsError> {
        let snapshot = self
            .repository
            .find_property(property_id)
            .await?
            .ok_or(AnalyticsError::NotFound { property_id })?;

        let cost_row = self
            .repository
            .find_latest_regional_costs(
                snapshot.property.region_id,
                snapshot.property.property_class_id,
            )
            .await?;
        if cost_row.is_none() {
            debug!(
                property_id = property_id,
                region = %snapshot.region.name,
                class = %snapshot.property_class.name,
                "No regional costs found, using defaults"
            );
        }
        let costs = RegionalCostStructure::resolve(cost_row.as_ref());

        let price_series: Vec<Decimal> = self
            .repository
            .find_price_history(property_id, MAX_HISTORY_POINTS)
            .await?
            .iter()
            .filter_map(|point| point.value())
            .collect();

        let project_impacts = if snapshot.has_coordinates() {
            self.repository
                .find_completed_infrastructure_projects(snapshot.property.region_id)
                .await?
                .into_iter()
                .map(|project| project.impact_coefficient)
                .collect()
        } else {
            vec![]
        };

        Ok(AnalyticsInputs {
            snapshot,
            costs,
            price_series,
            project_impacts,
        })
    }

    /// Calculate and persist analytics for a property
    pub async fn calculate_full_analytics(
        &self,
        property_id: i32,
    ) -> Result<investment_analytics::Model, AnalyticsError> {
        self.calculate_full_analytics_at(property_id, Utc::now()).await
    }

    pub async fn calculate_full_analytics_at(
        &self,
        property_id: i32,
        now: DateTime<Utc>,
    ) -> Result<investment_analytics::Model, AnalyticsError> {
        let inputs = self.load_inputs(property_id).await?;
        let computed = compute_analytics(&inputs, &self.tables);

        let saved = self
            .repository
            .insert_analytics(computed.into_active_model(property_id, now))
            .await?;

        info!(
            property_id = property_id,
            history_points = inputs.price_series.len(),
            rating = %saved.investment_rating,
            risk = %saved.risk_level,
            strategy = %saved.recommended_strategy,
            "Investment analytics calculated"
        );

        Ok(saved)
    }

    /// Newest analytics for a property, recalculated when missing or stale
    pub async fn get_analytics_by_property_id(
        &self,
        property_id: i32,
    ) -> Result<investment_analytics::Model, AnalyticsError> {
        self.get_analytics_by_property_id_at(property_id, Utc::now()).await
    }

    pub async fn get_analytics_by_property_id_at(
        &self,
        property_id: i32,
        now: DateTime<Utc>,
    ) -> Result<investment_analytics::Model, AnalyticsError> {
        match self.repository.find_latest_analytics(property_id).await? {
            Some(latest) if !self.is_stale(&latest, now) => {
                debug!(
                    property_id = property_id,
                    analytics_id = latest.id,
                    "Serving cached analytics"
                );
                Ok(latest)
            }
            Some(latest) => {
                info!(
                    property_id = property_id,
                    calculated_at = %latest.calculated_at,
                    "Analytics are stale, recalculating"
                );
                self.calculate_full_analytics_at(property_id, now).await
            }
            None => {
                info!(property_id = property_id, "No analytics yet, calculating");
                self.calculate_full_analytics_at(property_id, now).await
            }
        }
    }

    pub fn is_stale(&self, analytics: &investment_analytics::Model, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(analytics.calculated_at) > self.ttl
    }

    /// Calculate each id independently; one failure never aborts the rest
    ///
    /// Results come back in input order.
    pub async fn batch_calculate_analytics(&self, property_ids: &[i32]) -> Vec<BatchCalculation> {
        self.batch_calculate_analytics_at(property_ids, Utc::now()).await
    }

    pub async fn batch_calculate_analytics_at(
        &self,
        property_ids: &[i32],
        now: DateTime<Utc>,
    ) -> Vec<BatchCalculation> {
        let results: Vec<BatchCalculation> = stream::iter(property_ids.iter().copied())
            .map(|property_id| async move {
                let result = self.calculate_full_analytics_at(property_id, now).await;
                if let Err(e) = &result {
                    warn!(
                        property_id = property_id,
                        error = %e,
                        "Batch calculation failed for property"
                    );
                }
                BatchCalculation { property_id, result }
            })
            .buffered(self.batch_concurrency)
            .collect()
            .await;

        let failed = results.iter().filter(|r| r.result.is_err()).count();
        info!(
            total = results.len(),
            succeeded = results.len() - failed,
            failed = failed,
            "Batch analytics calculation completed"
        );

        results
    }

    /// Persisted analytics for a property, newest first
    pub async fn get_analytics_history(
        &self,
        property_id: i32,
        limit: Option<u64>,
    ) -> Result<Vec<investment_analytics::Model>, AnalyticsError> {
        if self.repository.find_property(property_id).await?.is_none() {
            return Err(AnalyticsError::NotFound { property_id });
        }

        let limit = limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_HISTORY_LIMIT);

        Ok(self
            .repository
            .find_analytics_history(property_id, limit)
            .await?)
    }

    /// Recalculate every property whose newest analytics are missing or stale
    pub async fn refresh_stale_analytics(&self) -> Result<RefreshStats, AnalyticsError> {
        self.refresh_stale_analytics_at(Utc::now()).await
    }

    pub async fn refresh_stale_analytics_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<RefreshStats, AnalyticsError> {
        let candidates = self
            .repository
            .find_property_ids_needing_refresh(now - self.ttl)
            .await?;

        if candidates.is_empty() {
            debug!("No stale analytics to refresh");
            return Ok(RefreshStats::default());
        }

        let results = self.batch_calculate_analytics_at(&candidates, now).await;
        let failed = results.iter().filter(|r| r.result.is_err()).count();

        Ok(RefreshStats {
            candidates: candidates.len(),
            refreshed: results.len() - failed,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{properties, property_classes, regions};
    use crate::services::investment_rating::{InvestmentRating, RiskLevel, Strategy};
    use rust_decimal_macros::dec;

    fn inputs(region: &str, class: &str, latitude: Option<f64>) -> AnalyticsInputs {
        AnalyticsInputs {
            snapshot: PropertySnapshot {
                property: properties::Model {
                    id: 1,
                    title: "Квартира".to_string(),
                    price: dec!(10000000),
                    area: dec!(50),
                    latitude,
                    longitude: latitude.map(|_| 37.61),
                    region_id: 1,
                    property_class_id: 2,
                    created_at: None,
                },
                region: regions::Model {
                    id: 1,
                    name: region.to_string(),
                },
                property_class: property_classes::Model {
                    id: 2,
                    name: class.to_string(),
                },
            },
            costs: RegionalCostStructure::default(),
            price_series: vec![],
            project_impacts: vec![],
        }
    }

    #[test]
    fn test_moscow_standard_reference_scenario() {
        let computed = compute_analytics(
            &inputs("Москва", "Стандарт", Some(55.75)),
            &CoefficientTables::default(),
        );

        assert_eq!(computed.rental.rental_income_monthly, 61667);
        assert_eq!(computed.rental.rental_roi_annual, dec!(-6.21));
        assert_eq!(computed.rental.rental_payback_years, dec!(999));
        assert_eq!(computed.flip.flip_roi, dec!(1.27));
        assert_eq!(computed.safe_haven.safe_haven_score, 9);
        assert_eq!(computed.forecast.price_forecast_3y, dec!(25.41));
        assert_eq!(computed.verdict.investment_rating, InvestmentRating::C);
        assert_eq!(computed.verdict.risk_level, RiskLevel::Low);
        assert_eq!(computed.verdict.recommended_strategy, Strategy::Hold);
    }

    #[test]
    fn test_unmapped_region_and_class() {
        let computed = compute_analytics(
            &inputs("Тест-Сити", "Премиум", None),
            &CoefficientTables::default(),
        );

        // 10,000,000 × 6.6% ÷ 12
        assert_eq!(computed.rental.rental_income_monthly, 55000);
        assert_eq!(computed.safe_haven.liquidity_score, 5);
        // default 8% growth, same as Moscow
        assert_eq!(computed.forecast.price_forecast_3y, dec!(25.41));
    }

    #[test]
    fn test_injected_tables_change_results() {
        let tables = CoefficientTables::default().with_rental_yield("Москва", dec!(12));
        let computed = compute_analytics(&inputs("Москва", "Стандарт", None), &tables);
        assert_eq!(computed.rental.rental_income_monthly, 100000);
    }

    #[test]
    fn test_compute_is_deterministic() {
        let mut fixture = inputs("Сочи", "Элит", Some(43.6));
        fixture.price_series = vec![dec!(11000000), dec!(10500000), dec!(9800000)];
        fixture.project_impacts = vec![Some(dec!(0.1)), None];

        let tables = CoefficientTables::default();
        assert_eq!(compute_analytics(&fixture, &tables), compute_analytics(&fixture, &tables));
    }

    #[test]
    fn test_error_display() {
        let err = AnalyticsError::NotFound { property_id: 42 };
        assert_eq!(err.to_string(), "Property 42 not found");

        let err: AnalyticsError = DbErr::Custom("boom".to_string()).into();
        assert!(err.to_string().contains("Database error"));
    }
}
