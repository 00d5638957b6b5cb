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
                    .table(RegionalCosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RegionalCosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RegionalCosts::RegionId).integer().not_null())
                    .col(ColumnDef::new(RegionalCosts::PropertyClassId).integer().not_null())
                    .col(ColumnDef::new(RegionalCosts::Year).integer().not_null())
                    .col(ColumnDef::new(RegionalCosts::TaxRate).decimal_len(8, 5).null())
                    .col(
                        ColumnDef::new(RegionalCosts::MaintenanceCostPerSqm)
                            .decimal_len(12, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(RegionalCosts::UtilityCostPerSqm).decimal_len(12, 2).null())
                    .col(
                        ColumnDef::new(RegionalCosts::ManagementFeePercent)
                            .decimal_len(6, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RegionalCosts::InsuranceCostPerSqm)
                            .decimal_len(12, 2)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RegionalCosts::RepairReservePercent)
                            .decimal_len(6, 2)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_regional_costs_region")
                            .from(RegionalCosts::Table, RegionalCosts::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_regional_costs_property_class")
                            .from(RegionalCosts::Table, RegionalCosts::PropertyClassId)
                            .to(PropertyClasses::Table, PropertyClasses::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One cost structure per (region, class, year)
        manager
            .create_index(
                Index::create()
                    .name("idx_regional_costs_region_class_year")
                    .table(RegionalCosts::Table)
                    .col(RegionalCosts::RegionId)
                    .col(RegionalCosts::PropertyClassId)
                    .col(RegionalCosts::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RegionalCosts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum RegionalCosts {
    Table,
    Id,
    RegionId,
    PropertyClassId,
    Year,
    TaxRate,
    MaintenanceCostPerSqm,
    UtilityCostPerSqm,
    ManagementFeePercent,
    InsuranceCostPerSqm,
    RepairReservePercent,
}
