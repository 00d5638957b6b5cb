use sea_orm_migration::prelude::*;

use super::m20261001_000001_create_regions::Regions;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(InfrastructureProjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InfrastructureProjects::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(InfrastructureProjects::RegionId).integer().not_null())
                    .col(ColumnDef::new(InfrastructureProjects::Name).string_len(255).not_null())
                    .col(ColumnDef::new(InfrastructureProjects::CompletionDate).date().null())
                    .col(
                        ColumnDef::new(InfrastructureProjects::ImpactCoefficient)
                            .decimal_len(6, 4)
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_infrastructure_projects_region")
                            .from(InfrastructureProjects::Table, InfrastructureProjects::RegionId)
                            .to(Regions::Table, Regions::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_infrastructure_projects_region")
                    .table(InfrastructureProjects::Table)
                    .col(InfrastructureProjects::RegionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(InfrastructureProjects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum InfrastructureProjects {
    Table,
    Id,
    RegionId,
    Name,
    CompletionDate,
    ImpactCoefficient,
}
