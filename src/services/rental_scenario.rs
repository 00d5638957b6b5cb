//! Long-term rental scenario: income net of regional operating costs

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::coefficients::RegionalCostStructure;
use super::number_format::{round_dp, round_to_i64};

/// Payback reported when net income is not positive
pub const NEVER_PAYS_BACK_YEARS: Decimal = dec!(999);

const MONTHS_PER_YEAR: Decimal = dec!(12);

#[derive(Debug, Clone, Copy)]
pub struct RentalScenarioInput {
    pub price: Decimal,
    pub area: Decimal,
    /// Gross annual yield for the region, in percent
    pub annual_yield_percent: Decimal,
    pub costs: RegionalCostStructure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalScenario {
    /// Net yield, equal to `rental_roi_annual`
    pub rental_yield: Decimal,
    pub rental_income_monthly: i64,
    pub rental_roi_annual: Decimal,
    /// Rounded to 1 decimal place
    pub rental_payback_years: Decimal,
    pub net_annual_income: Decimal,
}

/// Annual operating expenses of a rented property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RentalExpenses {
    pub annual_tax: Decimal,
    pub maintenance: Decimal,
    pub utilities: Decimal,
    pub management_fee: Decimal,
    pub insurance: Decimal,
    pub repair_reserve: Decimal,
}

impl RentalExpenses {
    pub fn total(&self) -> Decimal {
        self.annual_tax
            + self.maintenance
            + self.utilities
            + self.management_fee
            + self.insurance
            + self.repair_reserve
    }
}

fn expenses(input: &RentalScenarioInput, annual_rental: Decimal) -> RentalExpenses {
    let costs = &input.costs;
    RentalExpenses {
        annual_tax: input.price * costs.tax_rate,
        maintenance: costs.maintenance_cost_per_sqm * input.area,
        utilities: costs.utility_cost_per_sqm * input.area * MONTHS_PER_YEAR,
        management_fee: annual_rental * costs.management_fee_percent / Decimal::ONE_HUNDRED,
        insurance: costs.insurance_cost_per_sqm * input.area,
        repair_reserve: annual_rental * costs.repair_reserve_percent / Decimal::ONE_HUNDRED,
    }
}

pub fn calculate_rental_scenario(input: &RentalScenarioInput) -> RentalScenario {
    let annual_rental = input.price * input.annual_yield_percent / Decimal::ONE_HUNDRED;
    let monthly_rental = annual_rental / MONTHS_PER_YEAR;

    let net_annual_income = annual_rental - expenses(input, annual_rental).total();

    let roi = if input.price.is_zero() {
        Decimal::ZERO
    } else {
        net_annual_income / input.price * Decimal::ONE_HUNDRED
    };

    let payback_years = if net_annual_income <= Decimal::ZERO {
        NEVER_PAYS_BACK_YEARS
    } else {
        input.price / net_annual_income
    };

    let roi = round_dp(roi, 2);
    RentalScenario {
        rental_yield: roi,
        rental_income_monthly: round_to_i64(monthly_rental),
        rental_roi_annual: roi,
        rental_payback_years: round_dp(payback_years, 1),
        net_annual_income,
    }
}
