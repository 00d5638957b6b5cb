use sea_orm_migration::prelude::*;

use super::m20261001_000003_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PriceHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PriceHistory::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PriceHistory::PropertyId).integer().not_null())
                    .col(ColumnDef::new(PriceHistory::Price).decimal_len(18, 2).null())
                    .col(ColumnDef::new(PriceHistory::PricePerSqm).decimal_len(14, 2).null())
                    .col(
                        ColumnDef::new(PriceHistory::DateRecorded)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_price_history_property")
                            .from(PriceHistory::Table, PriceHistory::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Composite index for (property_id, date_recorded DESC) scans
        manager
            .create_index(
                Index::create()
                    .name("idx_price_history_property_date")
                    .table(PriceHistory::Table)
                    .col(PriceHistory::PropertyId)
                    .col((PriceHistory::DateRecorded, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PriceHistory::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum PriceHistory {
    Table,
    Id,
    PropertyId,
    Price,
    PricePerSqm,
    DateRecorded,
}
