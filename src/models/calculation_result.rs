//! Calculation result models for the Family Benefit Engine.
//!
//! This module contains the result types returned by the Benefit A and
//! Benefit B engines, together with the audit trace that records every rule
//! applied on the way to a payable rate.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fortnightly and annual amounts for one benefit.
///
/// `annual_core` is the fortnightly rate annualised before rounding, and
/// `annual_total` adds every annual lump sum paid on top of it.
///
/// # Example
///
/// ```
/// use family_benefit_engine::models::PaymentAmounts;
/// use rust_decimal::Decimal;
///
/// let nil = PaymentAmounts::zero();
/// assert!(nil.is_nil());
/// assert_eq!(nil.annual_total, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAmounts {
    /// Payable rate per fortnight.
    pub fortnightly_rate: Decimal,
    /// Fortnightly rate multiplied by the fortnights-per-year factor.
    pub annual_core: Decimal,
    /// Annual supplement paid as a lump sum.
    pub supplement: Decimal,
    /// Annual core plus every lump sum.
    pub annual_total: Decimal,
}

impl PaymentAmounts {
    /// Returns an all-zero set of amounts.
    pub fn zero() -> Self {
        Self {
            fortnightly_rate: Decimal::ZERO,
            annual_core: Decimal::ZERO,
            supplement: Decimal::ZERO,
            annual_total: Decimal::ZERO,
        }
    }

    /// Returns true when nothing is payable.
    pub fn is_nil(&self) -> bool {
        self.annual_total.is_zero()
    }
}

/// Which Benefit A income test produced the payable rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeTestMethod {
    /// Method 1: maximum rate tapered down to the base rate.
    MaximumRate,
    /// Method 2: base rate only, no maintenance action test.
    BaseRate,
}

/// Summary of where a Benefit A rate sits relative to the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// The full post-penalty maximum rate is paid.
    Maximum,
    /// Some rate is paid, but below the maximum.
    Reduced,
    /// Nothing is payable.
    Nil,
}

/// Benefit A age band of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildAgeBand {
    /// Aged 0 to 12.
    Age0To12,
    /// Aged 13 to 15.
    Age13To15,
    /// Aged 16 to 19.
    Age16To19,
}

impl ChildAgeBand {
    /// Returns the band a given age falls in.
    pub fn for_age(age: u8) -> Self {
        match age {
            0..=12 => ChildAgeBand::Age0To12,
            13..=15 => ChildAgeBand::Age13To15,
            _ => ChildAgeBand::Age16To19,
        }
    }
}

/// A single child's contribution to the family Benefit A totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildContribution {
    /// The child's age.
    pub age: u8,
    /// The child's age band.
    pub age_band: ChildAgeBand,
    /// Maximum rate after the maintenance cap and penalties.
    pub maximum_rate: Decimal,
    /// Base rate after penalties.
    pub base_rate: Decimal,
    /// Whether the maintenance action cap lowered the maximum rate.
    pub maintenance_capped: bool,
    /// Number of compliance requirements failed.
    pub unmet_requirements: u8,
    /// Amount by which penalties reduced the maximum rate.
    pub penalty: Decimal,
}

/// How the Benefit A rate was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitABreakdown {
    /// Family adjusted taxable income used for the income test.
    pub family_income: Decimal,
    /// Sum of per-child maximum rates.
    pub total_maximum_rate: Decimal,
    /// Sum of per-child base rates.
    pub total_base_rate: Decimal,
    /// Method 1 fortnightly rate.
    pub method_1_rate: Decimal,
    /// Method 2 fortnightly rate.
    pub method_2_rate: Decimal,
    /// The method whose rate was paid.
    pub selected_method: IncomeTestMethod,
    /// Per-child contributions, in household order.
    pub children: Vec<ChildContribution>,
}

/// The complete Benefit A result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitAResult {
    /// Payable amounts.
    pub amounts: PaymentAmounts,
    /// Position of the rate relative to the maximum.
    pub status: PaymentStatus,
    /// Method and per-child breakdown.
    pub breakdown: BenefitABreakdown,
    /// Audit trace of the rules applied.
    pub audit_trace: AuditTrace,
}

/// Benefit B band of the youngest child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YoungestChildBand {
    /// Youngest child under 5.
    Under5,
    /// Youngest child 5 or older.
    FiveAndOver,
}

impl YoungestChildBand {
    /// Returns the band a given youngest-child age falls in.
    pub fn for_age(age: u8) -> Self {
        if age < 5 {
            YoungestChildBand::Under5
        } else {
            YoungestChildBand::FiveAndOver
        }
    }
}

/// Why Benefit B is nil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroReason {
    /// The household has no children.
    NoChildren,
    /// A single parent's income is above the primary earner limit.
    SingleParentOverLimit,
    /// The higher-earning partner is above the primary earner limit.
    PrimaryEarnerOverLimit,
    /// A couple's youngest child has reached the couple age limit.
    CoupleYoungestChildTooOld,
    /// A single parent's youngest child has reached the single age limit.
    SingleYoungestChildTooOld,
    /// The lower-earning partner's income tapered the rate to nil.
    SecondaryEarnerIncomeTooHigh,
}

impl ZeroReason {
    /// A stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ZeroReason::NoChildren => "NO_CHILDREN",
            ZeroReason::SingleParentOverLimit => "SINGLE_PARENT_OVER_LIMIT",
            ZeroReason::PrimaryEarnerOverLimit => "PRIMARY_EARNER_OVER_LIMIT",
            ZeroReason::CoupleYoungestChildTooOld => "COUPLE_YOUNGEST_CHILD_TOO_OLD",
            ZeroReason::SingleYoungestChildTooOld => "SINGLE_YOUNGEST_CHILD_TOO_OLD",
            ZeroReason::SecondaryEarnerIncomeTooHigh => "SECONDARY_EARNER_INCOME_TOO_HIGH",
        }
    }
}

impl fmt::Display for ZeroReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ZeroReason::NoChildren => "no children in household",
            ZeroReason::SingleParentOverLimit => "single parent income over limit",
            ZeroReason::PrimaryEarnerOverLimit => "primary earner over limit",
            ZeroReason::CoupleYoungestChildTooOld => "couple ineligible: youngest child too old",
            ZeroReason::SingleYoungestChildTooOld => {
                "single parent ineligible: youngest child too old"
            }
            ZeroReason::SecondaryEarnerIncomeTooHigh => "secondary earner income too high",
        };
        f.write_str(text)
    }
}

/// The complete Benefit B result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitBResult {
    /// Payable amounts. `annual_total` includes the energy supplement.
    pub amounts: PaymentAmounts,
    /// Standard fortnightly rate before the income test.
    pub standard_rate: Decimal,
    /// Band of the youngest child, if there are children.
    pub youngest_child_band: Option<YoungestChildBand>,
    /// Annualised energy supplement.
    pub energy_supplement: Decimal,
    /// Why the result is nil, if it is.
    pub zero_reason: Option<ZeroReason>,
    /// Audit trace of the rules applied.
    pub audit_trace: AuditTrace,
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the legislative provision for this rule.
    pub policy_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Severity of an advisory warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Informational only.
    Info,
    /// The result is likely affected.
    Warning,
}

/// An advisory note about the household.
///
/// Warnings never stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level.
    pub severity: WarningSeverity,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}
