//! `SeaORM` entity prelude

pub use super::infrastructure_projects::Entity as InfrastructureProjects;
pub use super::investment_analytics::Entity as InvestmentAnalytics;
pub use super::price_history::Entity as PriceHistory;
pub use super::properties::Entity as Properties;
pub use super::property_classes::Entity as PropertyClasses;
pub use super::regional_costs::Entity as RegionalCosts;
pub use super::regions::Entity as Regions;
