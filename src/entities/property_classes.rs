//! `SeaORM` Entity for property_classes table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "property_classes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Эконом, Стандарт, Комфорт, Бизнес or Элит
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
