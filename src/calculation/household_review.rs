//! Advisory review of a household before calculation.
//!
//! Warnings never stop a calculation. They flag inputs a case officer would
//! want to double-check.

use rust_decimal::Decimal;

use crate::models::{AuditWarning, Household, WarningSeverity};

/// Combined income above which payments are almost certainly nil.
pub const HIGH_INCOME_WARNING_LEVEL: Decimal = Decimal::from_parts(300_000, 0, 0, false, 0);

/// Reviews a household and returns any advisory warnings.
///
/// # Example
///
/// ```
/// use family_benefit_engine::calculation::review_household;
/// use family_benefit_engine::models::{Child, Household};
/// use rust_decimal::Decimal;
///
/// let household = Household::single(Decimal::from(40_000), vec![Child::new(17).unwrap()]).unwrap();
/// let warnings = review_household(&household);
/// assert_eq!(warnings[0].code, "STUDY_REQUIREMENT");
/// ```
pub fn review_household(household: &Household) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();

    if household.children().is_empty() {
        warnings.push(AuditWarning {
            code: "NO_CHILDREN".to_string(),
            message: "No children in household - both benefits will be nil".to_string(),
            severity: WarningSeverity::Warning,
        });
    }

    if household.family_income() > HIGH_INCOME_WARNING_LEVEL {
        warnings.push(AuditWarning {
            code: "HIGH_INCOME".to_string(),
            message: format!(
                "Very high income ${} - payments likely nil",
                household.family_income()
            ),
            severity: WarningSeverity::Warning,
        });
    }

    if !household.partnered() && !household.secondary_income().is_zero() {
        warnings.push(AuditWarning {
            code: "SINGLE_WITH_SECONDARY_INCOME".to_string(),
            message: format!(
                "Single parent has secondary income ${}; it counts towards family income",
                household.secondary_income()
            ),
            severity: WarningSeverity::Info,
        });
    }

    for (index, child) in household.children().iter().enumerate() {
        if (16..=19).contains(&child.age()) {
            warnings.push(AuditWarning {
                code: "STUDY_REQUIREMENT".to_string(),
                message: format!(
                    "Child {} aged {} - study requirements apply",
                    index + 1,
                    child.age()
                ),
                severity: WarningSeverity::Info,
            });
        }
    }

    let unmet: Vec<String> = household
        .children()
        .iter()
        .enumerate()
        .flat_map(|(index, child)| {
            let number = index + 1;
            [
                child
                    .fails_immunisation()
                    .then(|| format!("Child {} (immunisation)", number)),
                child
                    .fails_health_check()
                    .then(|| format!("Child {} (health check)", number)),
            ]
            .into_iter()
            .flatten()
        })
        .collect();
    if !unmet.is_empty() {
        warnings.push(AuditWarning {
            code: "COMPLIANCE_PENALTY".to_string(),
            message: format!("Compliance penalties apply: {}", unmet.join(", ")),
            severity: WarningSeverity::Warning,
        });
    }

    warnings
}
