//! Whole-of-family entitlement.
//!
//! Runs the household review, both benefit engines and rent assistance, and
//! combines their totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RateTable;
use crate::models::{FamilyEntitlement, Household};

use super::benefit_a::calculate_benefit_a;
use super::benefit_b::calculate_benefit_b;
use super::household_review::review_household;
use super::money::round_money;
use super::rent_assistance::calculate_rent_assistance;

/// Caller options for a combined calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalculationOptions {
    /// Add the Benefit B energy supplement to its annual total.
    #[serde(default)]
    pub include_energy_supplement: bool,
}

/// Calculates every benefit a household is entitled to.
///
/// Review warnings are copied into the Benefit A audit trace as well as the
/// top-level `warnings` list.
///
/// # Example
///
/// ```
/// use family_benefit_engine::calculation::{calculate_family_entitlement, CalculationOptions};
/// use family_benefit_engine::config::RateTable;
/// use family_benefit_engine::models::{Child, Household};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default_2024_25();
/// let household = Household::single(Decimal::from(50_000), vec![Child::new(5).unwrap()]).unwrap();
///
/// let entitlement = calculate_family_entitlement(&household, &table, CalculationOptions::default());
/// assert_eq!(entitlement.combined_fortnightly, Decimal::new(35378, 2));
/// ```
pub fn calculate_family_entitlement(
    household: &Household,
    table: &RateTable,
    options: CalculationOptions,
) -> FamilyEntitlement {
    let warnings = review_household(household);

    let mut benefit_a = calculate_benefit_a(household, table);
    benefit_a.audit_trace.warnings.extend(warnings.iter().cloned());
    let benefit_b = calculate_benefit_b(household, table, options.include_energy_supplement);
    let rent_assistance = household
        .fortnightly_rent()
        .and_then(|rent| calculate_rent_assistance(rent, table));

    let (rent_fortnightly, rent_annual) = rent_assistance
        .as_ref()
        .map_or((Decimal::ZERO, Decimal::ZERO), |ra| {
            (ra.fortnightly_rate, ra.annual_amount)
        });

    let combined_fortnightly = round_money(
        benefit_a.amounts.fortnightly_rate + benefit_b.amounts.fortnightly_rate + rent_fortnightly,
    );
    let combined_annual_total = round_money(
        benefit_a.amounts.annual_total + benefit_b.amounts.annual_total + rent_annual,
    );

    debug!(
        combined_fortnightly = %combined_fortnightly,
        combined_annual_total = %combined_annual_total,
        warnings = warnings.len(),
        "Family entitlement calculated"
    );

    FamilyEntitlement {
        benefit_a,
        benefit_b,
        rent_assistance,
        combined_fortnightly,
        combined_annual_total,
        warnings,
    }
}
