//! Configuration types for benefit calculation.
//!
//! This module contains the strongly-typed rate table structures that are
//! deserialized from YAML configuration files or built from the hard-coded
//! 2024-25 defaults.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{ChildAgeBand, YoungestChildBand};

/// Metadata about the benefit program a configuration directory describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramMetadata {
    /// Short program code (e.g., "FTB").
    pub code: String,
    /// The human-readable name of the program.
    pub name: String,
    /// The version of the configuration set.
    pub version: String,
    /// URL to the official rate documentation.
    pub source_url: String,
}

/// How fortnightly rates are converted to annual amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnualisationFactor {
    /// Exactly 26 fortnights per year.
    #[default]
    Fortnights26,
    /// 365 / 14 fortnights per year (about 26.0714).
    Days365Over14,
}

impl AnnualisationFactor {
    /// Returns the number of fortnights per year this convention uses.
    pub fn value(self) -> Decimal {
        match self {
            AnnualisationFactor::Fortnights26 => Decimal::from(26),
            AnnualisationFactor::Days365Over14 => Decimal::from(365) / Decimal::from(14),
        }
    }
}

/// Whether the Benefit A supplement is paid once per family or once per child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplementBasis {
    /// One supplement per family.
    #[default]
    PerFamily,
    /// One supplement for each child in the household.
    PerChild,
}

/// How an unmet compliance requirement reduces a child's rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompliancePenaltyStyle {
    /// Subtract the flat `compliance_penalty` amount per unmet requirement.
    #[default]
    FlatAmount,
    /// Halve the current rate per unmet requirement.
    HalfRate,
}

/// How Method 1 behaves above the higher income-free area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HigherTierTaper {
    /// Taper the total base rate at the secondary taper above the higher threshold.
    #[default]
    BaseRateFloor,
    /// Keep tapering from the maximum rate: primary taper up to the higher
    /// threshold, secondary taper beyond it, with no base-rate floor.
    ContinuousFromMaximum,
}

/// Calculation conventions that differ between published calculator variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyVariant {
    /// Fortnight-to-annual conversion.
    #[serde(default)]
    pub annualisation: AnnualisationFactor,
    /// Benefit A supplement basis.
    #[serde(default)]
    pub supplement_basis: SupplementBasis,
    /// Compliance penalty style.
    #[serde(default)]
    pub compliance_penalty: CompliancePenaltyStyle,
    /// Method 1 taper above the higher income-free area.
    #[serde(default)]
    pub higher_tier_taper: HigherTierTaper,
}

/// Fortnightly Benefit A rates for each child age band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBandRates {
    /// Children aged 0 to 12.
    pub age_0_12: Decimal,
    /// Children aged 13 to 15.
    pub age_13_15: Decimal,
    /// Children aged 16 to 19 in recognised study.
    pub age_16_19: Decimal,
}

impl AgeBandRates {
    /// Returns the rate for an age band.
    pub fn for_band(&self, band: ChildAgeBand) -> Decimal {
        match band {
            ChildAgeBand::Age0To12 => self.age_0_12,
            ChildAgeBand::Age13To15 => self.age_13_15,
            ChildAgeBand::Age16To19 => self.age_16_19,
        }
    }
}

/// Benefit A (per-child benefit) schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitARates {
    /// Maximum fortnightly rate per child.
    pub max_rates: AgeBandRates,
    /// Base fortnightly rate per child.
    pub base_rates: AgeBandRates,
    /// Annual income below which the maximum rate is paid.
    pub lower_income_free_area: Decimal,
    /// Annual income above which the base rate is tapered.
    pub higher_income_free_area: Decimal,
    /// Taper applied between the two income-free areas.
    pub primary_taper: Decimal,
    /// Taper applied above the higher income-free area.
    pub secondary_taper: Decimal,
    /// Annual supplement amount.
    pub supplement: Decimal,
    /// Annual family income ceiling for the supplement.
    pub supplement_income_limit: Decimal,
}

/// Benefit B amounts keyed by the youngest child's age band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YoungestChildRates {
    /// Youngest child under 5.
    pub under_5: Decimal,
    /// Youngest child aged 5 or over.
    pub five_and_over: Decimal,
}

impl YoungestChildRates {
    /// Returns the amount for a youngest-child band.
    pub fn for_band(&self, band: YoungestChildBand) -> Decimal {
        match band {
            YoungestChildBand::Under5 => self.under_5,
            YoungestChildBand::FiveAndOver => self.five_and_over,
        }
    }
}

/// Fixed secondary-earner cut-out incomes, as published in rate guides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryCutoffs {
    /// Youngest child under 5.
    pub under_5: Decimal,
    /// Youngest child aged 5 to 12.
    pub five_to_twelve: Decimal,
}

/// Benefit B (per-family secondary-earner benefit) schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenefitBRates {
    /// Standard fortnightly rate by youngest child band.
    pub max_rates: YoungestChildRates,
    /// Energy supplement fortnightly rate by youngest child band.
    pub energy_supplement: YoungestChildRates,
    /// Annual supplement amount.
    pub supplement: Decimal,
    /// Secondary earner income below which no reduction applies.
    pub secondary_free_area: Decimal,
    /// Taper applied to secondary earner income above the free area.
    pub taper: Decimal,
    /// Primary earner (or single parent) income ceiling.
    pub primary_income_limit: Decimal,
    /// Couples are ineligible once the youngest child reaches this age.
    pub couple_age_limit: u8,
    /// Single parents are ineligible once the youngest child reaches this age.
    pub single_age_limit: u8,
    /// Optional published secondary-earner cut-out table.
    #[serde(default)]
    pub secondary_cutoffs: Option<SecondaryCutoffs>,
}

/// Rent assistance schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAssistanceRates {
    /// Fortnightly rent above which assistance is paid.
    pub threshold: Decimal,
    /// Maximum fortnightly assistance.
    pub maximum: Decimal,
    /// Share of rent above the threshold that is reimbursed.
    pub contribution_rate: Decimal,
}

/// The complete schedule of rates for one policy year.
///
/// A rate table is immutable once built and is passed by reference into every
/// engine call.
///
/// # Example
///
/// ```
/// use family_benefit_engine::config::RateTable;
/// use rust_decimal::Decimal;
///
/// let table = RateTable::default_2024_25();
/// assert!(table.validate().is_ok());
/// assert_eq!(table.annualisation_factor(), Decimal::from(26));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// The first day these rates apply.
    pub effective_date: NaiveDate,
    /// Display label for the policy year (e.g., "2024-25").
    pub policy_year: String,
    /// Calculation conventions.
    #[serde(default)]
    pub variant: PolicyVariant,
    /// Benefit A schedule.
    pub benefit_a: BenefitARates,
    /// Benefit B schedule.
    pub benefit_b: BenefitBRates,
    /// Flat fortnightly penalty per unmet compliance requirement.
    pub compliance_penalty: Decimal,
    /// Optional rent assistance schedule.
    #[serde(default)]
    pub rent_assistance: Option<RentAssistanceRates>,
}

impl RateTable {
    /// Returns the 2024-25 rates with the default calculation conventions.
    pub fn default_2024_25() -> Self {
        Self {
            effective_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap_or_default(),
            policy_year: "2024-25".to_string(),
            variant: PolicyVariant::default(),
            benefit_a: BenefitARates {
                max_rates: AgeBandRates {
                    age_0_12: Decimal::new(22204, 2),
                    age_13_15: Decimal::new(28882, 2),
                    age_16_19: Decimal::new(28882, 2),
                },
                base_rates: AgeBandRates {
                    age_0_12: Decimal::new(7126, 2),
                    age_13_15: Decimal::new(7126, 2),
                    age_16_19: Decimal::new(7126, 2),
                },
                lower_income_free_area: Decimal::from(65_189),
                higher_income_free_area: Decimal::from(115_997),
                primary_taper: Decimal::new(20, 2),
                secondary_taper: Decimal::new(30, 2),
                supplement: Decimal::new(91615, 2),
                supplement_income_limit: Decimal::from(80_000),
            },
            benefit_b: BenefitBRates {
                max_rates: YoungestChildRates {
                    under_5: Decimal::new(18886, 2),
                    five_and_over: Decimal::new(13174, 2),
                },
                energy_supplement: YoungestChildRates {
                    under_5: Decimal::new(280, 2),
                    five_and_over: Decimal::new(196, 2),
                },
                supplement: Decimal::new(44895, 2),
                secondary_free_area: Decimal::from(6_789),
                taper: Decimal::new(20, 2),
                primary_income_limit: Decimal::from(117_194),
                couple_age_limit: 13,
                single_age_limit: 19,
                secondary_cutoffs: Some(SecondaryCutoffs {
                    under_5: Decimal::from(33_653),
                    five_to_twelve: Decimal::from(26_207),
                }),
            },
            compliance_penalty: Decimal::new(3444, 2),
            rent_assistance: Some(RentAssistanceRates {
                threshold: Decimal::new(19642, 2),
                maximum: Decimal::new(24920, 2),
                contribution_rate: Decimal::new(75, 2),
            }),
        }
    }

    /// Returns a copy of this table using a different set of conventions.
    pub fn with_variant(mut self, variant: PolicyVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Returns the number of fortnights per year used for annualisation.
    pub fn annualisation_factor(&self) -> Decimal {
        self.variant.annualisation.value()
    }

    /// Converts an annual amount to its fortnightly equivalent.
    pub fn fortnightly_equivalent(&self, annual: Decimal) -> Decimal {
        annual / self.annualisation_factor()
    }

    /// Returns the Benefit A supplement expressed per fortnight.
    pub fn benefit_a_supplement_fortnightly(&self) -> Decimal {
        self.fortnightly_equivalent(self.benefit_a.supplement)
    }

    /// Returns the Benefit B supplement expressed per fortnight.
    pub fn benefit_b_supplement_fortnightly(&self) -> Decimal {
        self.fortnightly_equivalent(self.benefit_b.supplement)
    }

    /// Checks the rate table invariants.
    ///
    /// All amounts must be non-negative and tapers must lie in `[0, 1]`. The
    /// higher income-free area must not be below the lower one, and no
    /// Benefit A maximum rate may be below its base rate.
    pub fn validate(&self) -> EngineResult<()> {
        let a = &self.benefit_a;
        for (field, value) in [
            ("benefit_a.max_rates.age_0_12", a.max_rates.age_0_12),
            ("benefit_a.max_rates.age_13_15", a.max_rates.age_13_15),
            ("benefit_a.max_rates.age_16_19", a.max_rates.age_16_19),
            ("benefit_a.base_rates.age_0_12", a.base_rates.age_0_12),
            ("benefit_a.base_rates.age_13_15", a.base_rates.age_13_15),
            ("benefit_a.base_rates.age_16_19", a.base_rates.age_16_19),
            ("benefit_a.lower_income_free_area", a.lower_income_free_area),
            ("benefit_a.higher_income_free_area", a.higher_income_free_area),
            ("benefit_a.supplement", a.supplement),
            ("benefit_a.supplement_income_limit", a.supplement_income_limit),
        ] {
            non_negative(field, value)?;
        }
        fraction("benefit_a.primary_taper", a.primary_taper)?;
        fraction("benefit_a.secondary_taper", a.secondary_taper)?;
        if a.higher_income_free_area < a.lower_income_free_area {
            return Err(EngineError::InvalidRateTable {
                field: "benefit_a.higher_income_free_area".to_string(),
                message: format!(
                    "must not be below the lower income-free area ({})",
                    a.lower_income_free_area
                ),
            });
        }

        for band in [
            ChildAgeBand::Age0To12,
            ChildAgeBand::Age13To15,
            ChildAgeBand::Age16To19,
        ] {
            if a.max_rates.for_band(band) < a.base_rates.for_band(band) {
                return Err(EngineError::InvalidRateTable {
                    field: "benefit_a.max_rates".to_string(),
                    message: format!(
                        "maximum rate {} is below base rate {} for {:?}",
                        a.max_rates.for_band(band),
                        a.base_rates.for_band(band),
                        band
                    ),
                });
            }
        }

        let b = &self.benefit_b;
        for (field, value) in [
            ("benefit_b.max_rates.under_5", b.max_rates.under_5),
            ("benefit_b.max_rates.five_and_over", b.max_rates.five_and_over),
            ("benefit_b.energy_supplement.under_5", b.energy_supplement.under_5),
            (
                "benefit_b.energy_supplement.five_and_over",
                b.energy_supplement.five_and_over,
            ),
            ("benefit_b.supplement", b.supplement),
            ("benefit_b.secondary_free_area", b.secondary_free_area),
            ("benefit_b.primary_income_limit", b.primary_income_limit),
        ] {
            non_negative(field, value)?;
        }
        fraction("benefit_b.taper", b.taper)?;
        if let Some(cutoffs) = &b.secondary_cutoffs {
            non_negative("benefit_b.secondary_cutoffs.under_5", cutoffs.under_5)?;
            non_negative(
                "benefit_b.secondary_cutoffs.five_to_twelve",
                cutoffs.five_to_twelve,
            )?;
        }

        non_negative("compliance_penalty", self.compliance_penalty)?;

        if let Some(ra) = &self.rent_assistance {
            non_negative("rent_assistance.threshold", ra.threshold)?;
            non_negative("rent_assistance.maximum", ra.maximum)?;
            fraction("rent_assistance.contribution_rate", ra.contribution_rate)?;
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO {
        return Err(EngineError::InvalidRateTable {
            field: field.to_string(),
            message: format!("cannot be negative, got {}", value),
        });
    }
    Ok(())
}

fn fraction(field: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(EngineError::InvalidRateTable {
            field: field.to_string(),
            message: format!("must be between 0 and 1, got {}", value),
        });
    }
    Ok(())
}

/// The complete benefit configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct BenefitConfig {
    /// Program metadata.
    metadata: ProgramMetadata,
    /// Rate tables by effective date (sorted oldest first).
    rate_tables: Vec<RateTable>,
}

impl BenefitConfig {
    /// Creates a new BenefitConfig from its component parts.
    pub fn new(metadata: ProgramMetadata, rate_tables: Vec<RateTable>) -> Self {
        let mut sorted = rate_tables;
        sorted.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rate_tables: sorted,
        }
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        &self.metadata
    }

    /// Returns all rate tables, oldest first.
    pub fn rate_tables(&self) -> &[RateTable] {
        &self.rate_tables
    }
}
