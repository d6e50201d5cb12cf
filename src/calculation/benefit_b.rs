//! Benefit B (per-family secondary-earner benefit) engine.
//!
//! The standard rate depends only on the youngest child's age. Single parents
//! are paid it in full below the primary income limit. Couples are tested on
//! the higher earner against the same limit, then tapered on the lower
//! earner's income above the secondary free area.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RateTable;
use crate::models::{
    AuditStep, AuditTrace, BenefitBResult, Household, PaymentAmounts, YoungestChildBand,
    ZeroReason,
};

use super::money::{annualise, round_money, taper_reduction};

const BENEFIT_B_REF: &str = "FAA Sch 1 Pt 4";

/// Calculates Benefit B for a household.
///
/// When `include_energy_supplement` is set and a rate is payable, the
/// annualised energy supplement is added to `annual_total`.
///
/// # Example
///
/// ```
/// use family_benefit_engine::calculation::calculate_benefit_b;
/// use family_benefit_engine::config::RateTable;
/// use family_benefit_engine::models::{Child, Household, ZeroReason};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default_2024_25();
/// let household = Household::couple(
///     Decimal::from(90_000),
///     Decimal::ZERO,
///     vec![Child::new(14).unwrap()],
/// )
/// .unwrap();
///
/// let result = calculate_benefit_b(&household, &table, false);
/// assert_eq!(result.zero_reason, Some(ZeroReason::CoupleYoungestChildTooOld));
/// ```
pub fn calculate_benefit_b(
    household: &Household,
    table: &RateTable,
    include_energy_supplement: bool,
) -> BenefitBResult {
    debug!(
        partnered = household.partnered(),
        primary_income = %household.primary_income(),
        secondary_income = %household.secondary_income(),
        "Calculating Benefit B"
    );

    let Some(youngest) = household.youngest_child_age() else {
        return nil_result(
            ZeroReason::NoChildren,
            Decimal::ZERO,
            None,
            vec![AuditStep {
                step_number: 1,
                rule_id: "benefit_b_eligibility".to_string(),
                rule_name: "Benefit B Eligibility".to_string(),
                policy_ref: BENEFIT_B_REF.to_string(),
                input: serde_json::json!({ "children": 0 }),
                output: serde_json::json!({ "zero_reason": ZeroReason::NoChildren }),
                reasoning: "No children in household".to_string(),
            }],
        );
    };

    let b = &table.benefit_b;
    let band = YoungestChildBand::for_age(youngest);
    let standard_rate = b.max_rates.for_band(band);

    let mut steps = vec![AuditStep {
        step_number: 1,
        rule_id: "benefit_b_standard_rate".to_string(),
        rule_name: "Benefit B Standard Rate".to_string(),
        policy_ref: BENEFIT_B_REF.to_string(),
        input: serde_json::json!({ "youngest_child_age": youngest }),
        output: serde_json::json!({
            "youngest_child_band": band,
            "standard_rate": standard_rate.to_string(),
        }),
        reasoning: format!(
            "Youngest child aged {} ({:?}): standard rate ${}",
            youngest, band, standard_rate
        ),
    }];

    let income_test = if household.partnered() {
        couple_income_test(household, youngest, standard_rate, table, 2)
    } else {
        single_income_test(household, youngest, standard_rate, table, 2)
    };
    steps.push(income_test.audit_step);

    if let Some(reason) = income_test.zero_reason {
        return nil_result(reason, standard_rate, Some(band), steps);
    }
    let payable = income_test.rate;

    let supplement = b.supplement;
    let energy_supplement = if include_energy_supplement {
        annualise(b.energy_supplement.for_band(band), table)
    } else {
        Decimal::ZERO
    };
    steps.push(AuditStep {
        step_number: 3,
        rule_id: "benefit_b_supplements".to_string(),
        rule_name: "Benefit B Supplements".to_string(),
        policy_ref: BENEFIT_B_REF.to_string(),
        input: serde_json::json!({
            "include_energy_supplement": include_energy_supplement,
            "energy_supplement_fortnightly": b.energy_supplement.for_band(band).to_string(),
        }),
        output: serde_json::json!({
            "supplement": supplement.to_string(),
            "energy_supplement": energy_supplement.to_string(),
        }),
        reasoning: if include_energy_supplement {
            format!(
                "Supplement ${} and annual energy supplement ${} paid",
                supplement, energy_supplement
            )
        } else {
            format!("Supplement ${} paid; energy supplement not requested", supplement)
        },
    });

    let annual_core = annualise(payable, table);
    let amounts = PaymentAmounts {
        fortnightly_rate: round_money(payable),
        annual_core,
        supplement,
        annual_total: round_money(annual_core + supplement + energy_supplement),
    };

    debug!(
        fortnightly_rate = %amounts.fortnightly_rate,
        annual_total = %amounts.annual_total,
        "Benefit B calculated"
    );

    BenefitBResult {
        amounts,
        standard_rate,
        youngest_child_band: Some(band),
        energy_supplement,
        zero_reason: None,
        audit_trace: AuditTrace {
            steps,
            warnings: Vec::new(),
        },
    }
}

struct IncomeTestResult {
    rate: Decimal,
    zero_reason: Option<ZeroReason>,
    audit_step: AuditStep,
}

fn single_income_test(
    household: &Household,
    youngest: u8,
    standard_rate: Decimal,
    table: &RateTable,
    step_number: u32,
) -> IncomeTestResult {
    let b = &table.benefit_b;
    let income = household.primary_income();

    let (rate, zero_reason, reasoning) = if youngest >= b.single_age_limit {
        (
            Decimal::ZERO,
            Some(ZeroReason::SingleYoungestChildTooOld),
            format!(
                "Single parent ineligible: youngest child aged {} has reached {}",
                youngest, b.single_age_limit
            ),
        )
    } else if income > b.primary_income_limit {
        (
            Decimal::ZERO,
            Some(ZeroReason::SingleParentOverLimit),
            format!(
                "Single parent income ${} exceeds limit ${}",
                income, b.primary_income_limit
            ),
        )
    } else {
        (
            standard_rate,
            None,
            format!(
                "Single parent income ${} within limit ${}: standard rate paid",
                income, b.primary_income_limit
            ),
        )
    };

    IncomeTestResult {
        rate,
        zero_reason,
        audit_step: AuditStep {
            step_number,
            rule_id: "benefit_b_single_income_test".to_string(),
            rule_name: "Benefit B Single Parent Income Test".to_string(),
            policy_ref: BENEFIT_B_REF.to_string(),
            input: serde_json::json!({
                "income": income.to_string(),
                "primary_income_limit": b.primary_income_limit.to_string(),
                "youngest_child_age": youngest,
                "single_age_limit": b.single_age_limit,
            }),
            output: serde_json::json!({
                "rate": rate.to_string(),
                "zero_reason": zero_reason,
            }),
            reasoning,
        },
    }
}

fn couple_income_test(
    household: &Household,
    youngest: u8,
    standard_rate: Decimal,
    table: &RateTable,
    step_number: u32,
) -> IncomeTestResult {
    let b = &table.benefit_b;
    let (higher, lower) = household.earners();

    let (rate, zero_reason, reasoning) = if youngest >= b.couple_age_limit {
        (
            Decimal::ZERO,
            Some(ZeroReason::CoupleYoungestChildTooOld),
            format!(
                "Couple ineligible: youngest child aged {} has reached {}",
                youngest, b.couple_age_limit
            ),
        )
    } else if higher > b.primary_income_limit {
        (
            Decimal::ZERO,
            Some(ZeroReason::PrimaryEarnerOverLimit),
            format!(
                "Higher earner income ${} exceeds limit ${}",
                higher, b.primary_income_limit
            ),
        )
    } else {
        let reduction = taper_reduction(lower, b.secondary_free_area, b.taper, table);
        let reduced = standard_rate - reduction;
        // Less than a cent left is treated as nil.
        if reduced < Decimal::new(1, 2) {
            (
                Decimal::ZERO,
                Some(ZeroReason::SecondaryEarnerIncomeTooHigh),
                format!(
                    "Lower earner income ${} tapers the rate to nil",
                    lower
                ),
            )
        } else if reduction.is_zero() {
            (
                standard_rate,
                None,
                format!(
                    "Lower earner income ${} within free area ${}: standard rate paid",
                    lower, b.secondary_free_area
                ),
            )
        } else {
            (
                reduced,
                None,
                format!(
                    "Standard rate ${} reduced by ${} for lower earner income ${} above ${}",
                    standard_rate,
                    round_money(reduction),
                    lower,
                    b.secondary_free_area
                ),
            )
        }
    };

    IncomeTestResult {
        rate,
        zero_reason,
        audit_step: AuditStep {
            step_number,
            rule_id: "benefit_b_couple_income_test".to_string(),
            rule_name: "Benefit B Couple Income Test".to_string(),
            policy_ref: BENEFIT_B_REF.to_string(),
            input: serde_json::json!({
                "higher_earner_income": higher.to_string(),
                "lower_earner_income": lower.to_string(),
                "primary_income_limit": b.primary_income_limit.to_string(),
                "secondary_free_area": b.secondary_free_area.to_string(),
                "taper": b.taper.to_string(),
                "youngest_child_age": youngest,
                "couple_age_limit": b.couple_age_limit,
            }),
            output: serde_json::json!({
                "rate": round_money(rate).to_string(),
                "zero_reason": zero_reason,
            }),
            reasoning,
        },
    }
}

fn nil_result(
    reason: ZeroReason,
    standard_rate: Decimal,
    band: Option<YoungestChildBand>,
    steps: Vec<AuditStep>,
) -> BenefitBResult {
    debug!(zero_reason = %reason, "Benefit B is nil");
    BenefitBResult {
        amounts: PaymentAmounts::zero(),
        standard_rate,
        youngest_child_band: band,
        energy_supplement: Decimal::ZERO,
        zero_reason: Some(reason),
        audit_trace: AuditTrace {
            steps,
            warnings: Vec::new(),
        },
    }
}
