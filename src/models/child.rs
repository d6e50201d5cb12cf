//! Child model and compliance flags.
//!
//! A [`Child`] is validated when it is built, so engine functions can assume
//! every child they receive has an age between 0 and 19.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The oldest age at which a child can be counted.
pub const MAX_CHILD_AGE: u8 = 19;

/// Represents a dependent child for one calculation.
///
/// # Examples
///
/// ```
/// use family_benefit_engine::models::Child;
///
/// let child = Child::new(4).unwrap().with_health_check(false);
/// assert!(child.health_check_applies());
/// assert_eq!(child.unmet_requirements(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChildRecord")]
pub struct Child {
    age: u8,
    immunisation_met: bool,
    health_check_met: bool,
    maintenance_action_met: bool,
}

/// Unvalidated child fields as they arrive from a caller.
#[derive(Deserialize)]
struct ChildRecord {
    age: u8,
    #[serde(default = "requirement_met")]
    immunisation_met: bool,
    #[serde(default = "requirement_met")]
    health_check_met: bool,
    #[serde(default = "requirement_met")]
    maintenance_action_met: bool,
}

fn requirement_met() -> bool {
    true
}

impl TryFrom<ChildRecord> for Child {
    type Error = EngineError;

    fn try_from(record: ChildRecord) -> EngineResult<Self> {
        Child::with_flags(
            record.age,
            record.immunisation_met,
            record.health_check_met,
            record.maintenance_action_met,
        )
    }
}

impl Child {
    /// Creates a child with every compliance requirement met.
    ///
    /// # Errors
    ///
    /// Returns `InvalidChild` if `age` is above 19.
    pub fn new(age: u8) -> EngineResult<Self> {
        Self::with_flags(age, true, true, true)
    }

    /// Creates a child with explicit compliance flags.
    pub fn with_flags(
        age: u8,
        immunisation_met: bool,
        health_check_met: bool,
        maintenance_action_met: bool,
    ) -> EngineResult<Self> {
        if age > MAX_CHILD_AGE {
            return Err(EngineError::InvalidChild {
                field: "age".to_string(),
                message: format!("must be between 0 and {}, got {}", MAX_CHILD_AGE, age),
            });
        }

        Ok(Self {
            age,
            immunisation_met,
            health_check_met,
            maintenance_action_met,
        })
    }

    /// Returns a copy with the immunisation flag replaced.
    pub fn with_immunisation(mut self, met: bool) -> Self {
        self.immunisation_met = met;
        self
    }

    /// Returns a copy with the age 4-5 health check flag replaced.
    pub fn with_health_check(mut self, met: bool) -> Self {
        self.health_check_met = met;
        self
    }

    /// Returns a copy with the maintenance action flag replaced.
    pub fn with_maintenance_action(mut self, met: bool) -> Self {
        self.maintenance_action_met = met;
        self
    }

    /// The child's age in whole years.
    pub fn age(&self) -> u8 {
        self.age
    }

    /// Whether the immunisation requirement is met.
    pub fn immunisation_met(&self) -> bool {
        self.immunisation_met
    }

    /// Whether the age 4-5 health check requirement is met.
    pub fn health_check_met(&self) -> bool {
        self.health_check_met
    }

    /// Whether reasonable maintenance action has been taken.
    pub fn maintenance_action_met(&self) -> bool {
        self.maintenance_action_met
    }

    /// Returns true if the health check requirement applies at this age.
    pub fn health_check_applies(&self) -> bool {
        (4..=5).contains(&self.age)
    }

    /// Returns true if immunisation is unmet.
    pub fn fails_immunisation(&self) -> bool {
        !self.immunisation_met
    }

    /// Returns true if the health check applies and is unmet.
    pub fn fails_health_check(&self) -> bool {
        self.health_check_applies() && !self.health_check_met
    }

    /// Number of compliance requirements this child fails (0 to 2).
    pub fn unmet_requirements(&self) -> u8 {
        u8::from(self.fails_immunisation()) + u8::from(self.fails_health_check())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_child_meets_all_requirements() {
        let child = Child::new(7).unwrap();
        assert_eq!(child.age(), 7);
        assert!(child.immunisation_met());
        assert!(child.health_check_met());
        assert!(child.maintenance_action_met());
        assert_eq!(child.unmet_requirements(), 0);
    }

    #[test]
    fn test_age_above_19_rejected() {
        match Child::new(20) {
            Err(EngineError::InvalidChild { field, message }) => {
                assert_eq!(field, "age");
                assert!(message.contains("20"));
            }
            other => panic!("Expected InvalidChild, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_ages_accepted() {
        assert!(Child::new(0).is_ok());
        assert!(Child::new(19).is_ok());
    }

    #[test]
    fn test_health_check_applies_only_at_4_and_5() {
        assert!(!Child::new(3).unwrap().health_check_applies());
        assert!(Child::new(4).unwrap().health_check_applies());
        assert!(Child::new(5).unwrap().health_check_applies());
        assert!(!Child::new(6).unwrap().health_check_applies());
    }

    #[test]
    fn test_failed_health_check_ignored_outside_age_range() {
        let child = Child::new(8).unwrap().with_health_check(false);
        assert!(!child.fails_health_check());
        assert_eq!(child.unmet_requirements(), 0);
    }

    #[test]
    fn test_both_requirements_failed_counts_two() {
        let child = Child::new(5)
            .unwrap()
            .with_immunisation(false)
            .with_health_check(false);
        assert_eq!(child.unmet_requirements(), 2);
    }

    #[test]
    fn test_deserialize_defaults_flags_to_met() {
        let child: Child = serde_json::from_str(r#"{"age": 3}"#).unwrap();
        assert_eq!(child, Child::new(3).unwrap());
    }

    #[test]
    fn test_deserialize_with_flags() {
        let json = r#"{
            "age": 4,
            "immunisation_met": false,
            "health_check_met": true,
            "maintenance_action_met": false
        }"#;

        let child: Child = serde_json::from_str(json).unwrap();
        assert!(child.fails_immunisation());
        assert!(!child.maintenance_action_met());
    }

    #[test]
    fn test_deserialize_rejects_invalid_age() {
        let result: Result<Child, _> = serde_json::from_str(r#"{"age": 25}"#);
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid child field 'age'"));
    }

    #[test]
    fn test_serialize_child() {
        let child = Child::new(12).unwrap().with_maintenance_action(false);
        let json = serde_json::to_string(&child).unwrap();
        assert!(json.contains("\"age\":12"));
        assert!(json.contains("\"maintenance_action_met\":false"));

        let back: Child = serde_json::from_str(&json).unwrap();
        assert_eq!(back, child);
    }
}
