use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_regions::Regions;
use super::m20261001_000002_create_property_classes::PropertyClasses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Properties::Price).decimal_len(18, 2).not_null())
                    .col(ColumnDef::new(Properties::Area).decimal_len(10, 2).not_null())
                    .col(ColumnDef::new(Properties::Latitude).double().null())
                    .col(ColumnDef::new(Properties::Longitude).double().null())
                    .col(ColumnDef::new(Properties::RegionId).integer().not_null())
                    .col(ColumnDef::new(Properties::PropertyClassId).integer().not_null())
                    .col(
                        ColumnDef::new(Properties::CreatedAt)
                            .timestamp_with_time_zone()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_region")
                            .from(Properties::Table, Properties::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_property_class")
                            .from(Properties::Table, Properties::PropertyClassId)
                            .to(PropertyClasses::Table, PropertyClasses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Map viewport queries filter on coordinates
        manager
            .create_index(
                Index::create()
                    .name("idx_properties_coordinates")
                    .table(Properties::Table)
                    .col(Properties::Latitude)
                    .col(Properties::Longitude)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Properties {
    Table,
    Id,
    Title,
    Price,
    Area,
    Latitude,
    Longitude,
    RegionId,
    PropertyClassId,
    CreatedAt,
}
