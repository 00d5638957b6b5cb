//! `SeaORM` Entity for infrastructure_projects table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "infrastructure_projects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub region_id: i32,
    pub name: String,
    /// Projects without a completion date do not affect forecasts
    pub completion_date: Option<Date>,
    /// Additive growth uplift (default 0.05 when null)
    #[sea_orm(column_type = "Decimal(Some((6, 4)))", nullable)]
    pub impact_coefficient: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
