//! Core data models for the Family Benefit Engine.
//!
//! This module contains the input value objects ([`Child`], [`Household`]) and
//! every result type the engines return.

mod calculation_result;
mod child;
mod entitlement;
mod household;
mod thresholds;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, BenefitABreakdown, BenefitAResult, BenefitBResult,
    ChildAgeBand, ChildContribution, IncomeTestMethod, PaymentAmounts, PaymentStatus,
    WarningSeverity, YoungestChildBand, ZeroReason,
};
pub use child::{Child, MAX_CHILD_AGE};
pub use entitlement::{FamilyEntitlement, RentAssistanceResult, SweepPoint};
pub use household::Household;
pub use thresholds::{BenefitAThresholds, BenefitBThresholds, Threshold};
