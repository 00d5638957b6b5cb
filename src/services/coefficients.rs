//! Coefficient tables for investment analytics
//!
//! Region-keyed and class-keyed lookups are resolved here, once, so the
//! calculators only ever see plain numbers. Tables are immutable after
//! construction and injected into `InvestmentAnalyticsService`; tests can
//! build their own with [`CoefficientTables::with_rental_yield`] and friends.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

use crate::entities::regional_costs;

/// Property class names
pub mod classes {
    pub const ECONOMY: &str = "Эконом";
    pub const STANDARD: &str = "Стандарт";
    pub const COMFORT: &str = "Комфорт";
    pub const BUSINESS: &str = "Бизнес";
    pub const ELITE: &str = "Элит";
}

/// Flat scenario assumptions
pub mod assumptions {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Buy + sell transaction costs as a fraction of price
    pub const FLIP_TRANSACTION_COST_RATE: Decimal = dec!(0.06);
    /// Holding period of the flip scenario
    pub const FLIP_TIMEFRAME_MONTHS: i32 = 8;
    pub const DEVELOPMENT_RISK: Decimal = dec!(0.02);
    /// Impact of a completed project with no explicit coefficient
    pub const DEFAULT_PROJECT_IMPACT: Decimal = dec!(0.05);
    pub const MAX_INFRASTRUCTURE_IMPACT: Decimal = dec!(0.30);
}

pub const DEFAULT_RENTAL_YIELD_PERCENT: Decimal = dec!(6.6);
pub const DEFAULT_GROWTH_RATE_PERCENT: Decimal = dec!(8);
pub const DEFAULT_RENOVATION_COST_PER_SQM: Decimal = dec!(25000);
pub const DEFAULT_VALUE_INCREASE_PERCENT: Decimal = dec!(20);
pub const DEFAULT_LIQUIDITY_SCORE: i32 = 5;

/// Annual gross rental yield by region, in percent
const RENTAL_YIELDS: &[(&str, Decimal)] = &[
    ("Москва", dec!(7.4)),
    ("Санкт-Петербург", dec!(6.8)),
    ("Новосибирск", dec!(8.2)),
    ("Екатеринбург", dec!(8.0)),
    ("Казань", dec!(7.9)),
    ("Краснодар", dec!(7.6)),
    ("Сочи", dec!(6.2)),
    ("Хабаровск", dec!(8.9)),
    ("Владивосток", dec!(8.5)),
    ("Калининград", dec!(7.1)),
];

/// Expected annual price growth by region, in percent
const GROWTH_RATES: &[(&str, Decimal)] = &[
    ("Москва", dec!(8)),
    ("Санкт-Петербург", dec!(9)),
    ("Новосибирск", dec!(7)),
    ("Екатеринбург", dec!(7.5)),
    ("Казань", dec!(10)),
    ("Краснодар", dec!(11)),
    ("Сочи", dec!(13)),
    ("Хабаровск", dec!(6)),
    ("Владивосток", dec!(7)),
    ("Калининград", dec!(9)),
];

const RENOVATION_COSTS_PER_SQM: &[(&str, Decimal)] = &[
    (classes::ECONOMY, dec!(15000)),
    (classes::STANDARD, dec!(25000)),
    (classes::COMFORT, dec!(35000)),
    (classes::BUSINESS, dec!(50000)),
    (classes::ELITE, dec!(80000)),
];

/// Resale value uplift after renovation, in percent of price
const VALUE_INCREASE_PERCENTS: &[(&str, Decimal)] = &[
    (classes::ECONOMY, dec!(15)),
    (classes::STANDARD, dec!(20)),
    (classes::COMFORT, dec!(25)),
    (classes::BUSINESS, dec!(30)),
    (classes::ELITE, dec!(35)),
];

const LIQUIDITY_SCORES: &[(&str, i32)] = &[
    (classes::ECONOMY, 8),
    (classes::STANDARD, 9),
    (classes::COMFORT, 7),
    (classes::BUSINESS, 6),
    (classes::ELITE, 4),
];

fn to_map<V: Copy>(entries: &[(&str, V)]) -> HashMap<String, V> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

/// Immutable lookup tables keyed by region or property class name
#[derive(Debug, Clone)]
pub struct CoefficientTables {
    rental_yields: HashMap<String, Decimal>,
    growth_rates: HashMap<String, Decimal>,
    renovation_costs_per_sqm: HashMap<String, Decimal>,
    value_increase_percents: HashMap<String, Decimal>,
    liquidity_scores: HashMap<String, i32>,
}

impl Default for CoefficientTables {
    fn default() -> Self {
        Self {
            rental_yields: to_map(RENTAL_YIELDS),
            growth_rates: to_map(GROWTH_RATES),
            renovation_costs_per_sqm: to_map(RENOVATION_COSTS_PER_SQM),
            value_increase_percents: to_map(VALUE_INCREASE_PERCENTS),
            liquidity_scores: to_map(LIQUIDITY_SCORES),
        }
    }
}

impl CoefficientTables {
    pub fn with_rental_yield(mut self, region: &str, percent: Decimal) -> Self {
        self.rental_yields.insert(region.to_string(), percent);
        self
    }

    pub fn with_growth_rate(mut self, region: &str, percent: Decimal) -> Self {
        self.growth_rates.insert(region.to_string(), percent);
        self
    }

    pub fn with_renovation_cost(mut self, class: &str, per_sqm: Decimal) -> Self {
        self.renovation_costs_per_sqm.insert(class.to_string(), per_sqm);
        self
    }

    pub fn with_value_increase(mut self, class: &str, percent: Decimal) -> Self {
        self.value_increase_percents.insert(class.to_string(), percent);
        self
    }

    pub fn with_liquidity_score(mut self, class: &str, score: i32) -> Self {
        self.liquidity_scores.insert(class.to_string(), score);
        self
    }

    /// Annual rental yield in percent (6.6 for unmapped regions)
    pub fn rental_yield(&self, region: &str) -> Decimal {
        self.rental_yields
            .get(region)
            .copied()
            .unwrap_or(DEFAULT_RENTAL_YIELD_PERCENT)
    }

    /// Annual price growth in percent (8 for unmapped regions)
    pub fn growth_rate(&self, region: &str) -> Decimal {
        self.growth_rates
            .get(region)
            .copied()
            .unwrap_or(DEFAULT_GROWTH_RATE_PERCENT)
    }

    pub fn renovation_cost_per_sqm(&self, class: &str) -> Decimal {
        self.renovation_costs_per_sqm
            .get(class)
            .copied()
            .unwrap_or(DEFAULT_RENOVATION_COST_PER_SQM)
    }

    pub fn value_increase_percent(&self, class: &str) -> Decimal {
        self.value_increase_percents
            .get(class)
            .copied()
            .unwrap_or(DEFAULT_VALUE_INCREASE_PERCENT)
    }

    /// Liquidity on a 1..=10 scale (5 for unmapped classes)
    pub fn liquidity_score(&self, class: &str) -> i32 {
        self.liquidity_scores
            .get(class)
            .copied()
            .unwrap_or(DEFAULT_LIQUIDITY_SCORE)
    }
}

/// Fully populated operating cost structure for a (region, class) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionalCostStructure {
    /// Annual tax as a fraction of price
    pub tax_rate: Decimal,
    /// Annual maintenance per sqm
    pub maintenance_cost_per_sqm: Decimal,
    /// Monthly utilities per sqm
    pub utility_cost_per_sqm: Decimal,
    pub management_fee_percent: Decimal,
    /// Annual insurance per sqm
    pub insurance_cost_per_sqm: Decimal,
    pub repair_reserve_percent: Decimal,
}

impl Default for RegionalCostStructure {
    fn default() -> Self {
        Self {
            tax_rate: dec!(0.001),
            maintenance_cost_per_sqm: dec!(1000),
            utility_cost_per_sqm: dec!(2000),
            management_fee_percent: dec!(8),
            insurance_cost_per_sqm: dec!(100),
            repair_reserve_percent: dec!(5),
        }
    }
}

impl RegionalCostStructure {
    /// Fill every missing value (or a missing row) from the defaults
    pub fn resolve(row: Option<&regional_costs::Model>) -> Self {
        let defaults = Self::default();
        let Some(row) = row else {
            return defaults;
        };

        Self {
            tax_rate: row.tax_rate.unwrap_or(defaults.tax_rate),
            maintenance_cost_per_sqm: row
                .maintenance_cost_per_sqm
                .unwrap_or(defaults.maintenance_cost_per_sqm),
            utility_cost_per_sqm: row
                .utility_cost_per_sqm
                .unwrap_or(defaults.utility_cost_per_sqm),
            management_fee_percent: row
                .management_fee_percent
                .unwrap_or(defaults.management_fee_percent),
            insurance_cost_per_sqm: row
                .insurance_cost_per_sqm
                .unwrap_or(defaults.insurance_cost_per_sqm),
            repair_reserve_percent: row
                .repair_reserve_percent
                .unwrap_or(defaults.repair_reserve_percent),
        }
    }
}
