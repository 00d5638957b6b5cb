//! SeaORM Entity for property price history

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "price_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub property_id: i32,
    /// Full listing price at the time of recording
    #[sea_orm(column_type = "Decimal(Some((18, 2)))", nullable)]
    pub price: Option<Decimal>,
    /// Price per square meter, used when `price` is missing
    #[sea_orm(column_type = "Decimal(Some((14, 2)))", nullable)]
    pub price_per_sqm: Option<Decimal>,
    pub date_recorded: DateTimeWithTimeZone,
}

impl Model {
    /// Value of this point for dynamics calculations
    pub fn value(&self) -> Option<Decimal> {
        self.price.or(self.price_per_sqm)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
