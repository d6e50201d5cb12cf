//! Monetary rounding and annualisation helpers.
//!
//! Taper arithmetic is carried out at full `Decimal` precision. Rounding to
//! cents happens only when a result is produced.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::RateTable;

/// Rounds a dollar amount to cents, halves away from zero.
///
/// # Examples
///
/// ```
/// use family_benefit_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_money(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds an income up to the next cent.
pub(crate) fn round_income_up(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::ToPositiveInfinity)
}

/// Converts an unrounded fortnightly rate to a rounded annual amount.
pub fn annualise(fortnightly: Decimal, table: &RateTable) -> Decimal {
    round_money(fortnightly * table.annualisation_factor())
}

/// Fortnightly reduction for annual income above a threshold.
///
/// Returns zero when `income` does not exceed `threshold`.
pub(crate) fn taper_reduction(
    income: Decimal,
    threshold: Decimal,
    taper: Decimal,
    table: &RateTable,
) -> Decimal {
    if income <= threshold {
        return Decimal::ZERO;
    }
    (income - threshold) * taper / table.annualisation_factor()
}

/// Annual income above `threshold` needed to taper away `fortnightly_amount`.
///
/// Returns `None` for a zero taper, which never reduces anything.
pub(crate) fn income_to_exhaust(
    fortnightly_amount: Decimal,
    threshold: Decimal,
    taper: Decimal,
    table: &RateTable,
) -> Option<Decimal> {
    if taper.is_zero() {
        return None;
    }
    Some(threshold + fortnightly_amount * table.annualisation_factor() / taper)
}
