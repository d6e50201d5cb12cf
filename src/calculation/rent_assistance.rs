//! Rent assistance paid with Benefit A.

use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::models::RentAssistanceResult;

use super::money::{annualise, round_money};

/// Calculates rent assistance for a fortnightly rent.
///
/// Pays the contribution rate on rent above the threshold, up to the maximum.
/// Returns `None` when the rate table has no rent assistance schedule.
pub fn calculate_rent_assistance(
    fortnightly_rent: Decimal,
    table: &RateTable,
) -> Option<RentAssistanceResult> {
    let rates = table.rent_assistance.as_ref()?;

    let rate = if fortnightly_rent > rates.threshold {
        ((fortnightly_rent - rates.threshold) * rates.contribution_rate).min(rates.maximum)
    } else {
        Decimal::ZERO
    };

    Some(RentAssistanceResult {
        fortnightly_rent,
        fortnightly_rate: round_money(rate),
        annual_amount: annualise(rate, table),
    })
}
