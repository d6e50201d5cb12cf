//! Benefit A (per-child benefit) engine.
//!
//! Two income tests are run over the adjusted family totals and the higher
//! rate is paid:
//!
//! - **Method 1** starts from the total maximum rate and tapers it by the
//!   primary taper above the lower income-free area. How it behaves above the
//!   higher income-free area depends on [`HigherTierTaper`].
//! - **Method 2** pays the total base rate up to the higher income-free area
//!   and tapers it by the secondary taper above that.
//!
//! Families on income support are paid the untapered maximum.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{HigherTierTaper, RateTable, SupplementBasis};
use crate::models::{
    AuditStep, AuditTrace, BenefitABreakdown, BenefitAResult, Household, IncomeTestMethod,
    PaymentAmounts, PaymentStatus,
};

use super::child_rates::{ChildRateTotals, calculate_child_rates, total_child_rates};
use super::money::{annualise, round_money, taper_reduction};

const METHOD_1_REF: &str = "FAA Sch 1 Pt 2";
const METHOD_2_REF: &str = "FAA Sch 1 Pt 3";

/// Unrounded Method 1 fortnightly rate.
pub fn method_1_rate(
    totals: ChildRateTotals,
    family_income: Decimal,
    on_income_support: bool,
    table: &RateTable,
) -> Decimal {
    let a = &table.benefit_a;
    if on_income_support || family_income <= a.lower_income_free_area {
        return totals.maximum_rate;
    }

    match table.variant.higher_tier_taper {
        HigherTierTaper::BaseRateFloor => {
            if family_income <= a.higher_income_free_area {
                let reduction = taper_reduction(
                    family_income,
                    a.lower_income_free_area,
                    a.primary_taper,
                    table,
                );
                (totals.maximum_rate - reduction).max(totals.base_rate)
            } else {
                let reduction = taper_reduction(
                    family_income,
                    a.higher_income_free_area,
                    a.secondary_taper,
                    table,
                );
                (totals.base_rate - reduction).max(Decimal::ZERO)
            }
        }
        HigherTierTaper::ContinuousFromMaximum => {
            let first_tier = taper_reduction(
                family_income.min(a.higher_income_free_area),
                a.lower_income_free_area,
                a.primary_taper,
                table,
            );
            let second_tier = taper_reduction(
                family_income,
                a.higher_income_free_area,
                a.secondary_taper,
                table,
            );
            (totals.maximum_rate - first_tier - second_tier).max(Decimal::ZERO)
        }
    }
}

/// Unrounded Method 2 fortnightly rate.
pub fn method_2_rate(
    totals: ChildRateTotals,
    family_income: Decimal,
    on_income_support: bool,
    table: &RateTable,
) -> Decimal {
    let a = &table.benefit_a;
    if on_income_support || family_income <= a.higher_income_free_area {
        return totals.base_rate;
    }
    let reduction = taper_reduction(
        family_income,
        a.higher_income_free_area,
        a.secondary_taper,
        table,
    );
    (totals.base_rate - reduction).max(Decimal::ZERO)
}

/// Calculates Benefit A for a household.
///
/// This never fails: a household with no children, or with income high
/// enough to taper everything away, gets a nil result.
///
/// # Example
///
/// ```
/// use family_benefit_engine::calculation::calculate_benefit_a;
/// use family_benefit_engine::config::RateTable;
/// use family_benefit_engine::models::{Child, Household, PaymentStatus};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default_2024_25();
/// let household = Household::single(Decimal::from(50_000), vec![Child::new(5).unwrap()]).unwrap();
///
/// let result = calculate_benefit_a(&household, &table);
/// assert_eq!(result.amounts.fortnightly_rate, Decimal::new(22204, 2));
/// assert_eq!(result.status, PaymentStatus::Maximum);
/// ```
pub fn calculate_benefit_a(household: &Household, table: &RateTable) -> BenefitAResult {
    let family_income = household.family_income();
    let on_income_support = household.on_income_support();
    debug!(
        family_income = %family_income,
        children = household.children().len(),
        on_income_support,
        "Calculating Benefit A"
    );

    let mut steps = Vec::new();
    let mut step_number = 1u32;

    let mut contributions = Vec::with_capacity(household.children().len());
    for (index, child) in household.children().iter().enumerate() {
        let child_result = calculate_child_rates(child, index + 1, table, step_number);
        steps.push(child_result.audit_step);
        contributions.push(child_result.contribution);
        step_number += 1;
    }
    let totals = total_child_rates(&contributions);

    let method_1 = method_1_rate(totals, family_income, on_income_support, table);
    steps.push(method_1_step(
        totals,
        family_income,
        on_income_support,
        method_1,
        table,
        step_number,
    ));
    step_number += 1;

    let method_2 = method_2_rate(totals, family_income, on_income_support, table);
    steps.push(method_2_step(
        totals,
        family_income,
        on_income_support,
        method_2,
        table,
        step_number,
    ));
    step_number += 1;

    let selected_method = if method_1 >= method_2 {
        IncomeTestMethod::MaximumRate
    } else {
        IncomeTestMethod::BaseRate
    };
    // A rate that rounds to nothing is nothing.
    let payable = match method_1.max(method_2) {
        rate if round_money(rate).is_zero() => Decimal::ZERO,
        rate => rate,
    };
    steps.push(AuditStep {
        step_number,
        rule_id: "method_selection".to_string(),
        rule_name: "Income Test Method Selection".to_string(),
        policy_ref: METHOD_1_REF.to_string(),
        input: serde_json::json!({
            "method_1_rate": round_money(method_1).to_string(),
            "method_2_rate": round_money(method_2).to_string(),
        }),
        output: serde_json::json!({
            "selected_method": selected_method,
            "payable_rate": round_money(payable).to_string(),
        }),
        reasoning: format!(
            "Paying the higher of Method 1 (${}) and Method 2 (${})",
            round_money(method_1),
            round_money(method_2)
        ),
    });
    step_number += 1;

    let supplement = supplement_amount(household, payable, table);
    steps.push(supplement_step(household, payable, supplement, table, step_number));

    let fortnightly_rate = round_money(payable);
    let annual_core = annualise(payable, table);
    let amounts = PaymentAmounts {
        fortnightly_rate,
        annual_core,
        supplement,
        annual_total: round_money(annual_core + supplement),
    };

    let status = if payable.is_zero() {
        PaymentStatus::Nil
    } else if fortnightly_rate == round_money(totals.maximum_rate) {
        PaymentStatus::Maximum
    } else {
        PaymentStatus::Reduced
    };

    debug!(
        fortnightly_rate = %amounts.fortnightly_rate,
        annual_total = %amounts.annual_total,
        ?status,
        ?selected_method,
        "Benefit A calculated"
    );

    BenefitAResult {
        amounts,
        status,
        breakdown: BenefitABreakdown {
            family_income,
            total_maximum_rate: totals.maximum_rate,
            total_base_rate: totals.base_rate,
            method_1_rate: round_money(method_1),
            method_2_rate: round_money(method_2),
            selected_method,
            children: contributions,
        },
        audit_trace: AuditTrace {
            steps,
            warnings: Vec::new(),
        },
    }
}

fn supplement_amount(household: &Household, payable: Decimal, table: &RateTable) -> Decimal {
    let a = &table.benefit_a;
    let income_ok =
        household.on_income_support() || household.family_income() <= a.supplement_income_limit;
    if payable.is_zero() || !income_ok {
        return Decimal::ZERO;
    }
    match table.variant.supplement_basis {
        SupplementBasis::PerFamily => a.supplement,
        SupplementBasis::PerChild => a.supplement * Decimal::from(household.children().len()),
    }
}

fn method_1_step(
    totals: ChildRateTotals,
    family_income: Decimal,
    on_income_support: bool,
    rate: Decimal,
    table: &RateTable,
    step_number: u32,
) -> AuditStep {
    let a = &table.benefit_a;
    let reasoning = if on_income_support {
        format!(
            "Income support recipient: maximum rate ${} paid without income test",
            totals.maximum_rate
        )
    } else if family_income <= a.lower_income_free_area {
        format!(
            "Income ${} is within the lower income-free area ${}: maximum rate ${} paid",
            family_income, a.lower_income_free_area, totals.maximum_rate
        )
    } else {
        format!(
            "Maximum rate ${} tapered for income ${} above ${} ({:?}): ${}",
            totals.maximum_rate,
            family_income,
            a.lower_income_free_area,
            table.variant.higher_tier_taper,
            round_money(rate)
        )
    };

    AuditStep {
        step_number,
        rule_id: "method_1_income_test".to_string(),
        rule_name: "Method 1 Income Test".to_string(),
        policy_ref: METHOD_1_REF.to_string(),
        input: serde_json::json!({
            "family_income": family_income.to_string(),
            "on_income_support": on_income_support,
            "total_maximum_rate": totals.maximum_rate.normalize().to_string(),
            "total_base_rate": totals.base_rate.normalize().to_string(),
            "lower_income_free_area": a.lower_income_free_area.to_string(),
            "higher_income_free_area": a.higher_income_free_area.to_string(),
            "primary_taper": a.primary_taper.to_string(),
            "secondary_taper": a.secondary_taper.to_string(),
            "higher_tier_taper": table.variant.higher_tier_taper,
        }),
        output: serde_json::json!({
            "rate": round_money(rate).to_string(),
        }),
        reasoning,
    }
}

fn method_2_step(
    totals: ChildRateTotals,
    family_income: Decimal,
    on_income_support: bool,
    rate: Decimal,
    table: &RateTable,
    step_number: u32,
) -> AuditStep {
    let a = &table.benefit_a;
    let reasoning = if on_income_support || family_income <= a.higher_income_free_area {
        format!("Base rate ${} paid without reduction", totals.base_rate)
    } else {
        format!(
            "Base rate ${} tapered at {} for income ${} above ${}: ${}",
            totals.base_rate,
            a.secondary_taper,
            family_income,
            a.higher_income_free_area,
            round_money(rate)
        )
    };

    AuditStep {
        step_number,
        rule_id: "method_2_income_test".to_string(),
        rule_name: "Method 2 Income Test".to_string(),
        policy_ref: METHOD_2_REF.to_string(),
        input: serde_json::json!({
            "family_income": family_income.to_string(),
            "on_income_support": on_income_support,
            "total_base_rate": totals.base_rate.normalize().to_string(),
            "higher_income_free_area": a.higher_income_free_area.to_string(),
            "secondary_taper": a.secondary_taper.to_string(),
        }),
        output: serde_json::json!({
            "rate": round_money(rate).to_string(),
        }),
        reasoning,
    }
}

fn supplement_step(
    household: &Household,
    payable: Decimal,
    supplement: Decimal,
    table: &RateTable,
    step_number: u32,
) -> AuditStep {
    let a = &table.benefit_a;
    let reasoning = if supplement > Decimal::ZERO {
        format!("Supplement of ${} paid", supplement)
    } else if payable.is_zero() {
        "No supplement: no fortnightly rate payable".to_string()
    } else {
        format!(
            "No supplement: income ${} exceeds limit ${}",
            household.family_income(),
            a.supplement_income_limit
        )
    };

    AuditStep {
        step_number,
        rule_id: "benefit_a_supplement".to_string(),
        rule_name: "Benefit A Supplement".to_string(),
        policy_ref: METHOD_1_REF.to_string(),
        input: serde_json::json!({
            "family_income": household.family_income().to_string(),
            "on_income_support": household.on_income_support(),
            "supplement_income_limit": a.supplement_income_limit.to_string(),
            "supplement_basis": table.variant.supplement_basis,
        }),
        output: serde_json::json!({
            "supplement": supplement.to_string(),
        }),
        reasoning,
    }
}
