use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Class names drive renovation cost and liquidity lookups
        manager
            .create_table(
                Table::create()
                    .table(PropertyClasses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PropertyClasses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PropertyClasses::Name)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PropertyClasses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum PropertyClasses {
    Table,
    Id,
    Name,
}
