pub mod error;
pub mod investment_analytics;
pub mod map;
