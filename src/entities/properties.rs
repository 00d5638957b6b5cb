//! SeaORM Entity for property listings
//!
//! Read-only input for analytics calculations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// Listing price in whole currency units
    #[sea_orm(column_type = "Decimal(Some((18, 2)))")]
    pub price: Decimal,
    /// Total area in square meters
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub area: Decimal,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub region_id: i32,
    pub property_class_id: i32,
    pub created_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
