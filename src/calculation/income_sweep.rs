//! Payment-versus-income sweep.
//!
//! Recomputes both benefits across a range of primary incomes, holding the
//! rest of the household fixed. Useful for charting how payments taper.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{Household, SweepPoint};

use super::benefit_a::calculate_benefit_a;
use super::benefit_b::calculate_benefit_b;
use super::family_entitlement::CalculationOptions;

/// Sweeps the primary income from `start` to `end` inclusive in `step` increments.
///
/// # Errors
///
/// Returns `CalculationError` if `step` is not positive, if `start` is greater
/// than `end`, or if `start` is negative.
///
/// # Example
///
/// ```
/// use family_benefit_engine::calculation::{income_sweep, CalculationOptions};
/// use family_benefit_engine::config::RateTable;
/// use family_benefit_engine::models::{Child, Household};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default_2024_25();
/// let household = Household::single(Decimal::ZERO, vec![Child::new(3).unwrap()]).unwrap();
///
/// let points = income_sweep(
///     &household,
///     &table,
///     Decimal::ZERO,
///     Decimal::from(150_000),
///     Decimal::from(10_000),
///     CalculationOptions::default(),
/// )
/// .unwrap();
/// assert_eq!(points.len(), 16);
/// ```
pub fn income_sweep(
    household: &Household,
    table: &RateTable,
    start: Decimal,
    end: Decimal,
    step: Decimal,
    options: CalculationOptions,
) -> EngineResult<Vec<SweepPoint>> {
    if step <= Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("sweep step must be positive, got {}", step),
        });
    }
    if start > end {
        return Err(EngineError::CalculationError {
            message: format!("sweep start {} is greater than end {}", start, end),
        });
    }
    if start < Decimal::ZERO {
        return Err(EngineError::CalculationError {
            message: format!("sweep start cannot be negative, got {}", start),
        });
    }

    let incomes = std::iter::successors(Some(start), |income| Some(*income + step))
        .take_while(|income| *income <= end);

    let mut points = Vec::new();
    for income in incomes {
        let point_household = household.clone().with_primary_income(income)?;
        let benefit_a = calculate_benefit_a(&point_household, table);
        let benefit_b =
            calculate_benefit_b(&point_household, table, options.include_energy_supplement);
        points.push(SweepPoint {
            income,
            benefit_a_fortnightly: benefit_a.amounts.fortnightly_rate,
            benefit_a_annual: benefit_a.amounts.annual_total,
            benefit_b_fortnightly: benefit_b.amounts.fortnightly_rate,
            benefit_b_annual: benefit_b.amounts.annual_total,
        });
    }

    debug!(points = points.len(), %start, %end, %step, "Income sweep complete");
    Ok(points)
}
