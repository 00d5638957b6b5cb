#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{DbErr, Set, TryIntoModel};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use realty_analytics_backend::AppState;
use realty_analytics_backend::entities::{
    infrastructure_projects, investment_analytics, price_history, properties, property_classes,
    regional_costs, regions,
};
use realty_analytics_backend::services::analytics_repository::{
    AnalyticsRepository, PropertySnapshot,
};
use realty_analytics_backend::services::coefficients::CoefficientTables;
use realty_analytics_backend::services::investment_analytics::InvestmentAnalyticsService;
use realty_analytics_backend::services::investment_rating::InvestmentRating;
use realty_analytics_backend::services::marker_clustering::{BoundingBox, MarkerPoint};

pub const MOSCOW: i32 = 1;
pub const SOCHI: i32 = 2;
pub const TEST_CITY: i32 = 3;

pub const STANDARD: i32 = 1;
pub const ELITE: i32 = 2;
pub const PREMIUM: i32 = 3;

#[derive(Default)]
struct Store {
    regions: Vec<regions::Model>,
    classes: Vec<property_classes::Model>,
    properties: Vec<properties::Model>,
    regional_costs: Vec<regional_costs::Model>,
    price_history: Vec<price_history::Model>,
    projects: Vec<infrastructure_projects::Model>,
    analytics: Vec<investment_analytics::Model>,
    failing_property_ids: HashSet<i32>,
}

/// In-memory stand-in for Postgres
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    store: Arc<Mutex<Store>>,
}

pub fn ts(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

impl InMemoryRepository {
    /// Regions Москва/Сочи/Тест-Сити and classes Стандарт/Элит/Премиум
    pub fn with_reference_data() -> Self {
        let repo = Self::default();
        {
            let mut store = repo.store.lock().unwrap();
            for (id, name) in [(MOSCOW, "Москва"), (SOCHI, "Сочи"), (TEST_CITY, "Тест-Сити")] {
                store.regions.push(regions::Model { id, name: name.to_string() });
            }
            for (id, name) in [(STANDARD, "Стандарт"), (ELITE, "Элит"), (PREMIUM, "Премиум")] {
                store.classes.push(property_classes::Model { id, name: name.to_string() });
            }
        }
        repo
    }

    pub fn add_property(
        &self,
        id: i32,
        price: Decimal,
        area: Decimal,
        region_id: i32,
        property_class_id: i32,
        coordinates: Option<(f64, f64)>,
    ) {
        self.store.lock().unwrap().properties.push(properties::Model {
            id,
            title: format!("Объект {}", id),
            price,
            area,
            latitude: coordinates.map(|c| c.0),
            longitude: coordinates.map(|c| c.1),
            region_id,
            property_class_id,
            created_at: None,
        });
    }

    /// Moscow, Стандарт, 10,000,000 for 50 sqm
    pub fn add_reference_property(&self, id: i32) {
        self.add_property(id, dec!(10000000), dec!(50), MOSCOW, STANDARD, Some((55.75, 37.61)));
    }

    pub fn add_regional_costs(&self, row: regional_costs::Model) {
        self.store.lock().unwrap().regional_costs.push(row);
    }

    pub fn add_price_point(
        &self,
        property_id: i32,
        price: Option<Decimal>,
        price_per_sqm: Option<Decimal>,
        recorded: DateTime<Utc>,
    ) {
        let mut store = self.store.lock().unwrap();
        let id = store.price_history.len() as i64 + 1;
        store.price_history.push(price_history::Model {
            id,
            property_id,
            price,
            price_per_sqm,
            date_recorded: recorded.fixed_offset(),
        });
    }

    pub fn add_project(
        &self,
        region_id: i32,
        completion_date: Option<NaiveDate>,
        impact: Option<Decimal>,
    ) {
        let mut store = self.store.lock().unwrap();
        let id = store.projects.len() as i32 + 1;
        store.projects.push(infrastructure_projects::Model {
            id,
            region_id,
            name: format!("Проект {}", id),
            completion_date,
            impact_coefficient: impact,
        });
    }

    /// Make every read for this property fail with a database error
    pub fn fail_reads_for(&self, property_id: i32) {
        self.store.lock().unwrap().failing_property_ids.insert(property_id);
    }

    pub fn analytics_count(&self, property_id: i32) -> usize {
        self.store
            .lock()
            .unwrap()
            .analytics
            .iter()
            .filter(|a| a.property_id == property_id)
            .count()
    }
}

#[async_trait]
impl AnalyticsRepository for InMemoryRepository {
    async fn find_property(&self, property_id: i32) -> Result<Option<PropertySnapshot>, DbErr> {
        let store = self.store.lock().unwrap();
        if store.failing_property_ids.contains(&property_id) {
            return Err(DbErr::Custom("connection reset".to_string()));
        }

        let Some(property) = store.properties.iter().find(|p| p.id == property_id).cloned() else {
            return Ok(None);
        };
        let region = store
            .regions
            .iter()
            .find(|r| r.id == property.region_id)
            .cloned()
            .ok_or_else(|| DbErr::RecordNotFound("region".to_string()))?;
        let property_class = store
            .classes
            .iter()
            .find(|c| c.id == property.property_class_id)
            .cloned()
            .ok_or_else(|| DbErr::RecordNotFound("property class".to_string()))?;

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
        let store = self.store.lock().unwrap();
        Ok(store
            .regional_costs
            .iter()
            .filter(|c| c.region_id == region_id && c.property_class_id == property_class_id)
            .max_by_key(|c| c.year)
            .cloned())
    }

    async fn find_price_history(
        &self,
        property_id: i32,
        limit: u64,
    ) -> Result<Vec<price_history::Model>, DbErr> {
        let store = self.store.lock().unwrap();
        let mut points: Vec<price_history::Model> = store
            .price_history
            .iter()
            .filter(|p| p.property_id == property_id)
            .cloned()
            .collect();
        points.sort_by(|a, b| b.date_recorded.cmp(&a.date_recorded));
        points.truncate(limit as usize);
        Ok(points)
    }

    async fn find_completed_infrastructure_projects(
        &self,
        region_id: i32,
    ) -> Result<Vec<infrastructure_projects::Model>, DbErr> {
        let store = self.store.lock().unwrap();
        Ok(store
            .projects
            .iter()
            .filter(|p| p.region_id == region_id && p.completion_date.is_some())
            .cloned()
            .collect())
    }

    async fn insert_analytics(
        &self,
        mut analytics: investment_analytics::ActiveModel,
    ) -> Result<investment_analytics::Model, DbErr> {
        let mut store = self.store.lock().unwrap();
        analytics.id = Set(store.analytics.len() as i64 + 1);
        let model = analytics.try_into_model()?;
        store.analytics.push(model.clone());
        Ok(model)
    }

    async fn find_latest_analytics(
        &self,
        property_id: i32,
    ) -> Result<Option<investment_analytics::Model>, DbErr> {
        let store = self.store.lock().unwrap();
        Ok(store
            .analytics
            .iter()
            .filter(|a| a.property_id == property_id)
            .max_by_key(|a| (a.calculated_at, a.id))
            .cloned())
    }

    async fn find_analytics_history(
        &self,
        property_id: i32,
        limit: u64,
    ) -> Result<Vec<investment_analytics::Model>, DbErr> {
        let store = self.store.lock().unwrap();
        let mut rows: Vec<investment_analytics::Model> = store
            .analytics
            .iter()
            .filter(|a| a.property_id == property_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| (b.calculated_at, b.id).cmp(&(a.calculated_at, a.id)));
        rows.truncate(limit as usize);
        Ok(rows)
    }

    async fn find_properties_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<MarkerPoint>, DbErr> {
        let store = self.store.lock().unwrap();

        let mut latest: HashMap<i32, &investment_analytics::Model> = HashMap::new();
        for row in &store.analytics {
            let newer = latest.get(&row.property_id).is_none_or(|current| {
                (row.calculated_at, row.id) > (current.calculated_at, current.id)
            });
            if newer {
                latest.insert(row.property_id, row);
            }
        }

        Ok(store
            .properties
            .iter()
            .filter_map(|p| {
                let (latitude, longitude) = (p.latitude?, p.longitude?);
                bounds.contains(latitude, longitude).then(|| MarkerPoint {
                    property_id: p.id,
                    latitude,
                    longitude,
                    price: p.price,
                    investment_rating: latest
                        .get(&p.id)
                        .and_then(|a| InvestmentRating::from_str(&a.investment_rating)),
                })
            })
            .collect())
    }

    async fn find_property_ids_needing_refresh(
        &self,
        fresh_since: DateTime<Utc>,
    ) -> Result<Vec<i32>, DbErr> {
        let store = self.store.lock().unwrap();
        let fresh: HashSet<i32> = store
            .analytics
            .iter()
            .filter(|a| a.calculated_at >= fresh_since)
            .map(|a| a.property_id)
            .collect();

        let mut ids: Vec<i32> = store
            .properties
            .iter()
            .map(|p| p.id)
            .filter(|id| !fresh.contains(id))
            .collect();
        ids.sort_unstable();
        Ok(ids)
    }
}

pub fn build_service(repo: &InMemoryRepository) -> InvestmentAnalyticsService {
    InvestmentAnalyticsService::new(Arc::new(repo.clone()), CoefficientTables::default())
}

pub fn build_app_state(repo: &InMemoryRepository) -> AppState {
    AppState {
        analytics: Arc::new(build_service(repo)),
    }
}
