//! Per-child Benefit A rate adjustment.
//!
//! Each child starts from the maximum and base rates for their age band. The
//! maintenance action cap and compliance penalties are then applied, in that
//! order, before the rates are summed into family totals.

use rust_decimal::Decimal;

use crate::config::{CompliancePenaltyStyle, RateTable};
use crate::models::{AuditStep, Child, ChildAgeBand, ChildContribution};

/// The result of adjusting one child's rates, including the audit step.
#[derive(Debug, Clone)]
pub struct ChildRateResult {
    /// The child's adjusted rates.
    pub contribution: ChildContribution,
    /// The audit step recording the adjustment.
    pub audit_step: AuditStep,
}

/// Family totals across every child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRateTotals {
    /// Sum of adjusted maximum rates.
    pub maximum_rate: Decimal,
    /// Sum of adjusted base rates.
    pub base_rate: Decimal,
}

/// Adjusts a child's band rates for the maintenance cap and penalties.
///
/// Without the audit step; the threshold solver uses this directly.
///
/// - If the maintenance action requirement is unmet, the maximum rate is
///   capped at the base rate.
/// - Each unmet compliance requirement then reduces both rates, either by the
///   flat penalty amount (floored at zero) or by half, depending on the table's
///   penalty style.
pub fn adjusted_child_rates(child: &Child, table: &RateTable) -> ChildContribution {
    let band = ChildAgeBand::for_age(child.age());
    let band_maximum = table.benefit_a.max_rates.for_band(band);
    let band_base = table.benefit_a.base_rates.for_band(band);

    let maintenance_capped = !child.maintenance_action_met() && band_maximum > band_base;
    let capped_maximum = if child.maintenance_action_met() {
        band_maximum
    } else {
        band_maximum.min(band_base)
    };

    let unmet = child.unmet_requirements();
    let (maximum_rate, base_rate) = match table.variant.compliance_penalty {
        CompliancePenaltyStyle::FlatAmount => {
            let penalty = table.compliance_penalty * Decimal::from(unmet);
            (
                (capped_maximum - penalty).max(Decimal::ZERO),
                (band_base - penalty).max(Decimal::ZERO),
            )
        }
        CompliancePenaltyStyle::HalfRate => {
            let factor = (0..unmet).fold(Decimal::ONE, |acc, _| acc * Decimal::new(5, 1));
            (capped_maximum * factor, band_base * factor)
        }
    };

    ChildContribution {
        age: child.age(),
        age_band: band,
        maximum_rate,
        base_rate,
        maintenance_capped,
        unmet_requirements: unmet,
        penalty: capped_maximum - maximum_rate,
    }
}

/// Adjusts a child's rates and records the adjustment as an audit step.
///
/// `child_number` is the child's 1-based position in the household and only
/// appears in the audit text.
pub fn calculate_child_rates(
    child: &Child,
    child_number: usize,
    table: &RateTable,
    step_number: u32,
) -> ChildRateResult {
    let contribution = adjusted_child_rates(child, table);
    let band_maximum = table.benefit_a.max_rates.for_band(contribution.age_band);
    let band_base = table.benefit_a.base_rates.for_band(contribution.age_band);

    let mut notes = Vec::new();
    if contribution.maintenance_capped {
        notes.push(format!(
            "maintenance action not met, maximum capped at base ${}",
            band_base
        ));
    }
    if contribution.unmet_requirements > 0 {
        notes.push(format!(
            "{} compliance requirement(s) unmet, maximum reduced by ${}",
            contribution.unmet_requirements,
            contribution.penalty.round_dp(2)
        ));
    }
    let reasoning = if notes.is_empty() {
        format!(
            "Child {} aged {}: {:?} rates apply unchanged (max ${}, base ${})",
            child_number, contribution.age, contribution.age_band, band_maximum, band_base
        )
    } else {
        format!(
            "Child {} aged {}: {}",
            child_number,
            contribution.age,
            notes.join("; ")
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "child_rate_adjustment".to_string(),
        rule_name: "Child Rate Adjustment".to_string(),
        policy_ref: "FAA Sch 1 Pt 2 Div 2".to_string(),
        input: serde_json::json!({
            "child_number": child_number,
            "age": contribution.age,
            "band_maximum_rate": band_maximum.to_string(),
            "band_base_rate": band_base.to_string(),
            "immunisation_met": child.immunisation_met(),
            "health_check_met": child.health_check_met(),
            "maintenance_action_met": child.maintenance_action_met(),
            "penalty_style": table.variant.compliance_penalty,
        }),
        output: serde_json::json!({
            "maximum_rate": contribution.maximum_rate.normalize().to_string(),
            "base_rate": contribution.base_rate.normalize().to_string(),
            "maintenance_capped": contribution.maintenance_capped,
            "unmet_requirements": contribution.unmet_requirements,
            "penalty": contribution.penalty.normalize().to_string(),
        }),
        reasoning,
    };

    ChildRateResult {
        contribution,
        audit_step,
    }
}

/// Sums adjusted rates across children.
pub fn total_child_rates(contributions: &[ChildContribution]) -> ChildRateTotals {
    contributions.iter().fold(
        ChildRateTotals {
            maximum_rate: Decimal::ZERO,
            base_rate: Decimal::ZERO,
        },
        |totals, child| ChildRateTotals {
            maximum_rate: totals.maximum_rate + child.maximum_rate,
            base_rate: totals.base_rate + child.base_rate,
        },
    )
}
