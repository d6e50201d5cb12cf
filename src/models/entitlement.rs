//! Combined entitlement models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditWarning, BenefitAResult, BenefitBResult};

/// Rent assistance payable alongside the family benefits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentAssistanceResult {
    /// Fortnightly rent used for the calculation.
    pub fortnightly_rent: Decimal,
    /// Payable rate per fortnight.
    pub fortnightly_rate: Decimal,
    /// Fortnightly rate annualised.
    pub annual_amount: Decimal,
}

/// Both benefits for one household plus their combined totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyEntitlement {
    /// Benefit A result.
    pub benefit_a: BenefitAResult,
    /// Benefit B result.
    pub benefit_b: BenefitBResult,
    /// Rent assistance, when rent was supplied.
    pub rent_assistance: Option<RentAssistanceResult>,
    /// Sum of every fortnightly rate.
    pub combined_fortnightly: Decimal,
    /// Sum of every annual total.
    pub combined_annual_total: Decimal,
    /// Advisory warnings about the household.
    pub warnings: Vec<AuditWarning>,
}

/// One point of an income sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPoint {
    /// Primary income used for this point.
    pub income: Decimal,
    /// Benefit A fortnightly rate.
    pub benefit_a_fortnightly: Decimal,
    /// Benefit A annual total.
    pub benefit_a_annual: Decimal,
    /// Benefit B fortnightly rate.
    pub benefit_b_fortnightly: Decimal,
    /// Benefit B annual total.
    pub benefit_b_annual: Decimal,
}
