//! Household model.
//!
//! This module defines the [`Household`] value object passed to both benefit
//! engines. Incomes are annual adjusted taxable income in dollars.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::Child;

/// Represents a family for one entitlement calculation.
///
/// The secondary income is used exactly as given. Callers normally pass zero
/// for a single parent, but a stray value is not rejected.
///
/// # Examples
///
/// ```
/// use family_benefit_engine::models::{Child, Household};
/// use rust_decimal::Decimal;
///
/// let household = Household::couple(
///     Decimal::from(90_000),
///     Decimal::from(20_000),
///     vec![Child::new(3).unwrap(), Child::new(9).unwrap()],
/// )
/// .unwrap();
///
/// assert_eq!(household.family_income(), Decimal::from(110_000));
/// assert_eq!(household.youngest_child_age(), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HouseholdRecord")]
pub struct Household {
    partnered: bool,
    primary_income: Decimal,
    secondary_income: Decimal,
    children: Vec<Child>,
    on_income_support: bool,
    fortnightly_rent: Option<Decimal>,
}

/// Unvalidated household fields as they arrive from a caller.
#[derive(Deserialize)]
struct HouseholdRecord {
    partnered: bool,
    primary_income: Decimal,
    #[serde(default)]
    secondary_income: Decimal,
    #[serde(default)]
    children: Vec<Child>,
    #[serde(default)]
    on_income_support: bool,
    #[serde(default)]
    fortnightly_rent: Option<Decimal>,
}

impl TryFrom<HouseholdRecord> for Household {
    type Error = EngineError;

    fn try_from(record: HouseholdRecord) -> EngineResult<Self> {
        let household = Household::new(
            record.partnered,
            record.primary_income,
            record.secondary_income,
            record.children,
        )?
        .with_income_support(record.on_income_support);

        match record.fortnightly_rent {
            Some(rent) => household.with_fortnightly_rent(rent),
            None => Ok(household),
        }
    }
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidHousehold {
            field: field.to_string(),
            message: format!("cannot be negative, got {}", value),
        });
    }
    Ok(())
}

impl Household {
    /// Creates a household not on income support and without rent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidHousehold` if either income is negative.
    pub fn new(
        partnered: bool,
        primary_income: Decimal,
        secondary_income: Decimal,
        children: Vec<Child>,
    ) -> EngineResult<Self> {
        non_negative("primary_income", primary_income)?;
        non_negative("secondary_income", secondary_income)?;

        Ok(Self {
            partnered,
            primary_income,
            secondary_income,
            children,
            on_income_support: false,
            fortnightly_rent: None,
        })
    }

    /// Creates a single-parent household.
    pub fn single(income: Decimal, children: Vec<Child>) -> EngineResult<Self> {
        Self::new(false, income, Decimal::ZERO, children)
    }

    /// Creates a partnered household.
    pub fn couple(
        primary_income: Decimal,
        secondary_income: Decimal,
        children: Vec<Child>,
    ) -> EngineResult<Self> {
        Self::new(true, primary_income, secondary_income, children)
    }

    /// Returns a copy with the income support flag replaced.
    pub fn with_income_support(mut self, on_income_support: bool) -> Self {
        self.on_income_support = on_income_support;
        self
    }

    /// Returns a copy with a fortnightly rent amount.
    pub fn with_fortnightly_rent(mut self, rent: Decimal) -> EngineResult<Self> {
        non_negative("fortnightly_rent", rent)?;
        self.fortnightly_rent = Some(rent);
        Ok(self)
    }

    /// Returns a copy with a different primary income.
    pub fn with_primary_income(mut self, income: Decimal) -> EngineResult<Self> {
        non_negative("primary_income", income)?;
        self.primary_income = income;
        Ok(self)
    }

    /// Whether the parent has a partner.
    pub fn partnered(&self) -> bool {
        self.partnered
    }

    /// The primary income field as supplied.
    pub fn primary_income(&self) -> Decimal {
        self.primary_income
    }

    /// The secondary income field as supplied.
    pub fn secondary_income(&self) -> Decimal {
        self.secondary_income
    }

    /// The children in the household.
    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Whether the family receives an income support payment.
    pub fn on_income_support(&self) -> bool {
        self.on_income_support
    }

    /// Fortnightly rent paid, if supplied.
    pub fn fortnightly_rent(&self) -> Option<Decimal> {
        self.fortnightly_rent
    }

    /// Family adjusted taxable income (primary plus secondary).
    pub fn family_income(&self) -> Decimal {
        self.primary_income + self.secondary_income
    }

    /// Age of the youngest child, or `None` without children.
    pub fn youngest_child_age(&self) -> Option<u8> {
        self.children.iter().map(Child::age).min()
    }

    /// The higher and lower of the two incomes, in that order.
    pub fn earners(&self) -> (Decimal, Decimal) {
        if self.primary_income >= self.secondary_income {
            (self.primary_income, self.secondary_income)
        } else {
            (self.secondary_income, self.primary_income)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_single_household_has_zero_secondary_income() {
        let household = Household::single(dec("50000"), vec![Child::new(5).unwrap()]).unwrap();
        assert!(!household.partnered());
        assert_eq!(household.secondary_income(), Decimal::ZERO);
        assert_eq!(household.family_income(), dec("50000"));
    }

    #[test]
    fn test_negative_primary_income_rejected() {
        match Household::single(dec("-1"), vec![]) {
            Err(EngineError::InvalidHousehold { field, .. }) => {
                assert_eq!(field, "primary_income");
            }
            other => panic!("Expected InvalidHousehold, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_secondary_income_rejected() {
        match Household::couple(dec("1000"), dec("-0.01"), vec![]) {
            Err(EngineError::InvalidHousehold { field, .. }) => {
                assert_eq!(field, "secondary_income");
            }
            other => panic!("Expected InvalidHousehold, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_rent_rejected() {
        let household = Household::single(dec("40000"), vec![]).unwrap();
        assert!(household.with_fortnightly_rent(dec("-10")).is_err());
    }

    #[test]
    fn test_earners_ordered_by_income_not_field() {
        let household = Household::couple(dec("20000"), dec("90000"), vec![]).unwrap();
        assert_eq!(household.earners(), (dec("90000"), dec("20000")));
    }

    #[test]
    fn test_youngest_child_age() {
        let children = vec![
            Child::new(11).unwrap(),
            Child::new(2).unwrap(),
            Child::new(7).unwrap(),
        ];
        let household = Household::single(dec("30000"), children).unwrap();
        assert_eq!(household.youngest_child_age(), Some(2));
    }

    #[test]
    fn test_youngest_child_age_none_without_children() {
        let household = Household::single(dec("30000"), vec![]).unwrap();
        assert_eq!(household.youngest_child_age(), None);
    }

    #[test]
    fn test_deserialize_household() {
        let json = r#"{
            "partnered": true,
            "primary_income": "85000",
            "secondary_income": "12000",
            "children": [{"age": 3}, {"age": 10, "immunisation_met": false}],
            "on_income_support": false,
            "fortnightly_rent": "420.00"
        }"#;

        let household: Household = serde_json::from_str(json).unwrap();
        assert!(household.partnered());
        assert_eq!(household.family_income(), dec("97000"));
        assert_eq!(household.children().len(), 2);
        assert!(household.children()[1].fails_immunisation());
        assert_eq!(household.fortnightly_rent(), Some(dec("420.00")));
    }

    #[test]
    fn test_deserialize_defaults_optional_fields() {
        let json = r#"{"partnered": false, "primary_income": 42000}"#;

        let household: Household = serde_json::from_str(json).unwrap();
        assert_eq!(household.secondary_income(), Decimal::ZERO);
        assert!(household.children().is_empty());
        assert!(!household.on_income_support());
        assert_eq!(household.fortnightly_rent(), None);
    }

    #[test]
    fn test_deserialize_rejects_negative_income() {
        let json = r#"{"partnered": false, "primary_income": "-5"}"#;
        let result: Result<Household, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
