use sea_orm_migration::prelude::*;

use super::m20261001_000003_create_properties::Properties;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Insert-only: every calculation adds a row, readers take the newest
        manager
            .create_table(
                Table::create()
                    .table(InvestmentAnalytics::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InvestmentAnalytics::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InvestmentAnalytics::PropertyId).integer().not_null())
                    .col(
                        ColumnDef::new(InvestmentAnalytics::PriceChange1y)
                            .decimal_len(24, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::PriceChange3m)
                            .decimal_len(24, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::PriceVolatility)
                            .decimal_len(24, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::RentalYield)
                            .decimal_len(24, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::RentalIncomeMonthly)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::RentalRoiAnnual)
                            .decimal_len(24, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::RentalPaybackYears)
                            .decimal_len(24, 1)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::FlipPotentialProfit)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvestmentAnalytics::FlipRoi).decimal_len(24, 2).not_null())
                    .col(
                        ColumnDef::new(InvestmentAnalytics::FlipTimeframeMonths)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::RenovationCostEstimate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvestmentAnalytics::SafeHavenScore).integer().not_null())
                    .col(
                        ColumnDef::new(InvestmentAnalytics::CapitalPreservationIndex)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvestmentAnalytics::LiquidityScore).integer().not_null())
                    .col(
                        ColumnDef::new(InvestmentAnalytics::PriceForecast3y)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::InfrastructureImpactScore)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::DevelopmentRiskScore)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::InvestmentRating)
                            .string_len(4)
                            .not_null(),
                    )
                    .col(ColumnDef::new(InvestmentAnalytics::RiskLevel).string_len(16).not_null())
                    .col(
                        ColumnDef::new(InvestmentAnalytics::RecommendedStrategy)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InvestmentAnalytics::CalculatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(SimpleExpr::Keyword(Keyword::CurrentTimestamp)),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_investment_analytics_property")
                            .from(InvestmentAnalytics::Table, InvestmentAnalytics::PropertyId)
                            .to(Properties::Table, Properties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Latest-row lookups: (property_id, calculated_at DESC)
        manager
            .create_index(
                Index::create()
                    .name("idx_investment_analytics_property_time")
                    .table(InvestmentAnalytics::Table)
                    .col(InvestmentAnalytics::PropertyId)
                    .col((InvestmentAnalytics::CalculatedAt, IndexOrder::Desc))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InvestmentAnalytics::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InvestmentAnalytics {
    Table,
    Id,
    PropertyId,
    #[iden = "price_change_1y"]
    PriceChange1y,
    #[iden = "price_change_3m"]
    PriceChange3m,
    PriceVolatility,
    RentalYield,
    RentalIncomeMonthly,
    RentalRoiAnnual,
    RentalPaybackYears,
    FlipPotentialProfit,
    FlipRoi,
    FlipTimeframeMonths,
    RenovationCostEstimate,
    SafeHavenScore,
    CapitalPreservationIndex,
    LiquidityScore,
    #[iden = "price_forecast_3y"]
    PriceForecast3y,
    InfrastructureImpactScore,
    DevelopmentRiskScore,
    InvestmentRating,
    RiskLevel,
    RecommendedStrategy,
    CalculatedAt,
}
