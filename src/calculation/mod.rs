//! Calculation logic for the Family Benefit Engine.
//!
//! This module contains the per-child rate adjustment, the Benefit A and
//! Benefit B engines, the closed-form threshold solver, rent assistance, the
//! advisory household review, the combined family entitlement and the
//! payment-versus-income sweep.

mod benefit_a;
mod benefit_b;
mod child_rates;
mod family_entitlement;
mod household_review;
mod income_sweep;
mod money;
mod rent_assistance;
mod threshold_solver;

pub use benefit_a::{calculate_benefit_a, method_1_rate, method_2_rate};
pub use benefit_b::calculate_benefit_b;
pub use child_rates::{
    ChildRateResult, ChildRateTotals, adjusted_child_rates, calculate_child_rates,
    total_child_rates,
};
pub use family_entitlement::{CalculationOptions, calculate_family_entitlement};
pub use household_review::{HIGH_INCOME_WARNING_LEVEL, review_household};
pub use income_sweep::income_sweep;
pub use money::{annualise, round_money};
pub use rent_assistance::calculate_rent_assistance;
pub use threshold_solver::{solve_benefit_a_thresholds, solve_benefit_b_thresholds};
