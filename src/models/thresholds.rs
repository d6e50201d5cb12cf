//! Income threshold models produced by the threshold solver.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An income level at which a payment changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "income")]
pub enum Threshold {
    /// The change happens at this annual income.
    Income(Decimal),
    /// The change never happens at any income (for example a zero taper).
    NeverReached,
    /// The family composition is outside what the lookup supports.
    NotAvailable,
}

impl Threshold {
    /// Returns the income, if there is one.
    pub fn income(&self) -> Option<Decimal> {
        match self {
            Threshold::Income(income) => Some(*income),
            Threshold::NeverReached | Threshold::NotAvailable => None,
        }
    }
}

/// Benefit A income thresholds for a family composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitAThresholds {
    /// Income above which the maximum rate starts to reduce.
    pub lower_income_free_area: Decimal,
    /// Income at which Method 1 has tapered down to the base rate.
    pub base_rate_reached: Threshold,
    /// Income above which the base rate starts to reduce.
    pub higher_taper_start: Decimal,
    /// Highest income at which the supplement is still paid.
    pub supplement_cutoff: Threshold,
    /// Lowest income at which nothing is payable.
    pub zero_payment: Threshold,
}

/// Benefit B income thresholds for a family composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitBThresholds {
    /// Primary earner (or single parent) income limit.
    pub primary_income_limit: Decimal,
    /// Secondary earner income below which no reduction applies.
    pub secondary_free_area: Decimal,
    /// Secondary earner income at which a couple's rate reaches nil.
    pub secondary_cutoff: Threshold,
    /// Whether a couple with this youngest child can be paid at all.
    pub couple_eligible: bool,
    /// Whether a single parent with this youngest child can be paid at all.
    pub single_eligible: bool,
}
