//! Data store seam for investment analytics
//!
//! `InvestmentAnalyticsService` only talks to storage through
//! [`AnalyticsRepository`]. Production uses [`SeaOrmAnalyticsRepository`];
//! tests plug in an in-memory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, Order, QueryFilter,
    QueryOrder, QuerySelect, Select,
};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::entities::{
    infrastructure_projects, investment_analytics, price_history, properties, property_classes,
    regional_costs, regions,
    prelude::{
        InfrastructureProjects, InvestmentAnalytics, PriceHistory, Properties, PropertyClasses,
        RegionalCosts, Regions,
    },
};
use crate::services::investment_rating::InvestmentRating;
use crate::services::marker_clustering::{BoundingBox, MarkerPoint};

/// Property joined with its region and class
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnapshot {
    pub property: properties::Model,
    pub region: regions::Model,
    pub property_class: property_classes::Model,
}

impl PropertySnapshot {
    pub fn has_coordinates(&self) -> bool {
        self.property.latitude.is_some() && self.property.longitude.is_some()
    }
}

#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    /// Property with region and class, `None` if the id does not exist
    async fn find_property(&self, property_id: i32) -> Result<Option<PropertySnapshot>, DbErr>;

    /// Cost row with the latest year for (region, class)
    async fn find_latest_regional_costs(
        &self,
        region_id: i32,
        property_class_id: i32,
    ) -> Result<Option<regional_costs::Model>, DbErr>;

    /// Up to `limit` history points, most recent first
    async fn find_price_history(
        &self,
        property_id: i32,
        limit: u64,
    ) -> Result<Vec<price_history::Model>, DbErr>;

    /// Projects in the region that have a completion date
    async fn find_completed_infrastructure_projects(
        &self,
        region_id: i32,
    ) -> Result<Vec<infrastructure_projects::Model>, DbErr>;

    async fn insert_analytics(
        &self,
        analytics: investment_analytics::ActiveModel,
    ) -> Result<investment_analytics::Model, DbErr>;

    async fn find_latest_analytics(
        &self,
        property_id: i32,
    ) -> Result<Option<investment_analytics::Model>, DbErr>;

    /// Newest first
    async fn find_analytics_history(
        &self,
        property_id: i32,
        limit: u64,
    ) -> Result<Vec<investment_analytics::Model>, DbErr>;

    /// Properties with coordinates inside the box, with their latest rating
    async fn find_properties_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<MarkerPoint>, DbErr>;

    /// Properties with no analytics calculated at or after `fresh_since`
    async fn find_property_ids_needing_refresh(
        &self,
        fresh_since: DateTime<Utc>,
    ) -> Result<Vec<i32>, DbErr>;
}

/// Rating of the newest analytics row per property
///
/// Same ordering as `find_latest_analytics`: `calculated_at`, then `id`.
fn latest_ratings_query(property_ids: Vec<i32>) -> Select<InvestmentAnalytics> {
    InvestmentAnalytics::find()
        .select_only()
        .column(investment_analytics::Column::PropertyId)
        .column(investment_analytics::Column::InvestmentRating)
        .distinct_on([investment_analytics::Column::PropertyId])
        .filter(investment_analytics::Column::PropertyId.is_in(property_ids))
        .order_by(investment_analytics::Column::PropertyId, Order::Asc)
        .order_by(investment_analytics::Column::CalculatedAt, Order::Desc)
        .order_by(investment_analytics::Column::Id, Order::Desc)
}

/// Postgres-backed repository
#[derive(Clone)]
pub struct SeaOrmAnalyticsRepository {
    db: DatabaseConnection,
}

impl SeaOrmAnalyticsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AnalyticsRepository for SeaOrmAnalyticsRepository {
    async fn find_property(&self, property_id: i32) -> Result<Option<PropertySnapshot>, DbErr> {
        let Some(property) = Properties::find_by_id(property_id).one(&self.db).await? else {
            return Ok(None);
        };

        let region = Regions::find_by_id(property.region_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Region {} referenced by property {} is missing",
                    property.region_id, property_id
                ))
            })?;

        let property_class = PropertyClasses::find_by_id(property.property_class_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!(
                    "Property class {} referenced by property {} is missing",
                    property.property_class_id, property_id
                ))
            })?;

        Ok(Some(PropertySnapshot {
            property,
            region,
            property_class,
        }))
    }

    async fn find_latest_regional_costs(
        &self,
        region_id: i32,
        property_class_id: i32,
    ) -> Result<Option<regional_costs::Model>, DbErr> {
        RegionalCosts::find()
            .filter(regional_costs::Column::RegionId.eq(region_id))
            .filter(regional_costs::Column::PropertyClassId.eq(property_class_id))
            .order_by(regional_costs::Column::Year, Order::Desc)
            .one(&self.db)
            .await
    }

    async fn find_price_history(
        &self,
        property_id: i32,
        limit: u64,
    ) -> Result<Vec<price_history::Model>, DbErr> {
        PriceHistory::find()
            .filter(price_history::Column::PropertyId.eq(property_id))
            .order_by(price_history::Column::DateRecorded, Order::Desc)
            .limit(limit)
            .all(&self.db)
            .await
    }

    async fn find_completed_infrastructure_projects(
        &self,
        region_id: i32,
    ) -> Result<Vec<infrastructure_projects::Model>, DbErr> {
        InfrastructureProjects::find()
            .filter(infrastructure_projects::Column::RegionId.eq(region_id))
            .filter(infrastructure_projects::Column::CompletionDate.is_not_null())
            .all(&self.db)
            .await
    }

    async fn insert_analytics(
        &self,
        analytics: investment_analytics::ActiveModel,
    ) -> Result<investment_analytics::Model, DbErr> {
        analytics.insert(&self.db).await
    }

    async fn find_latest_analytics(
        &self,
        property_id: i32,
    ) -> Result<Option<investment_analytics::Model>, DbErr> {
        InvestmentAnalytics::find()
            .filter(investment_analytics::Column::PropertyId.eq(property_id))
            .order_by(investment_analytics::Column::CalculatedAt, Order::Desc)
            .order_by(investment_analytics::Column::Id, Order::Desc)
            .one(&self.db)
            .await
    }

    async fn find_analytics_history(
        &self,
        property_id: i32,
        limit: u64,
    ) -> Result<Vec<investment_analytics::Model>, DbErr> {
        InvestmentAnalytics::find()
            .filter(investment_analytics::Column::PropertyId.eq(property_id))
            .order_by(investment_analytics::Column::CalculatedAt, Order::Desc)
            .order_by(investment_analytics::Column::Id, Order::Desc)
            .limit(limit)
            .all(&self.db)
            .await
    }

    async fn find_properties_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<MarkerPoint>, DbErr> {
        let mut query = Properties::find()
            .filter(properties::Column::Latitude.between(bounds.south, bounds.north));

        query = if bounds.crosses_antimeridian() {
            query.filter(
                properties::Column::Longitude
                    .gte(bounds.west)
                    .or(properties::Column::Longitude.lte(bounds.east)),
            )
        } else {
            query.filter(properties::Column::Longitude.between(bounds.west, bounds.east))
        };

        let rows = query.all(&self.db).await?;
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids: Vec<i32> = rows.iter().map(|p| p.id).collect();

        let latest: Vec<(i32, String)> = latest_ratings_query(ids)
            .into_tuple()
            .all(&self.db)
            .await?;

        let ratings: HashMap<i32, InvestmentRating> = latest
            .into_iter()
            .filter_map(|(property_id, rating)| {
                InvestmentRating::from_str(&rating).map(|rating| (property_id, rating))
            })
            .collect();

        let points: Vec<MarkerPoint> = rows
            .into_iter()
            .filter_map(|p| {
                Some(MarkerPoint {
                    property_id: p.id,
                    latitude: p.latitude?,
                    longitude: p.longitude?,
                    price: p.price,
                    investment_rating: ratings.get(&p.id).copied(),
                })
            })
            .collect();

        debug!(count = points.len(), "Loaded map markers in bounds");
        Ok(points)
    }

    async fn find_property_ids_needing_refresh(
        &self,
        fresh_since: DateTime<Utc>,
    ) -> Result<Vec<i32>, DbErr> {
        let all_ids: Vec<i32> = Properties::find()
            .select_only()
            .column(properties::Column::Id)
            .order_by(properties::Column::Id, Order::Asc)
            .into_tuple()
            .all(&self.db)
            .await?;

        let fresh_ids: HashSet<i32> = InvestmentAnalytics::find()
            .select_only()
            .column(investment_analytics::Column::PropertyId)
            .filter(investment_analytics::Column::CalculatedAt.gte(fresh_since.fixed_offset()))
            .distinct()
            .into_tuple::<i32>()
            .all(&self.db)
            .await?
            .into_iter()
            .collect();

        Ok(all_ids
            .into_iter()
            .filter(|id| !fresh_ids.contains(id))
            .collect())
    }
}
