//! `SeaORM` Entity for regional_costs table
//!
//! One operating cost structure per (region, property class, year).
//! Null columns are filled from defaults by the analytics service.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "regional_costs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub region_id: i32,
    pub property_class_id: i32,
    pub year: i32,
    /// Annual property tax as a fraction of price (0.001 = 0.1%)
    #[sea_orm(column_type = "Decimal(Some((8, 5)))", nullable)]
    pub tax_rate: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub maintenance_cost_per_sqm: Option<Decimal>,
    /// Monthly utility cost per square meter
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub utility_cost_per_sqm: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub management_fee_percent: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub insurance_cost_per_sqm: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))", nullable)]
    pub repair_reserve_percent: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
