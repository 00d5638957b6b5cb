pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_regions;
mod m20261001_000002_create_property_classes;
mod m20261001_000003_create_properties;
mod m20261001_000004_create_price_history;
mod m20261001_000005_create_regional_costs;
mod m20261001_000006_create_infrastructure_projects;
mod m20261002_000001_create_investment_analytics;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_regions::Migration),
            Box::new(m20261001_000002_create_property_classes::Migration),
            Box::new(m20261001_000003_create_properties::Migration),
            Box::new(m20261001_000004_create_price_history::Migration),
            Box::new(m20261001_000005_create_regional_costs::Migration),
            Box::new(m20261001_000006_create_infrastructure_projects::Migration),
            Box::new(m20261002_000001_create_investment_analytics::Migration),
        ]
    }
}
