//! Configuration loading and management for the Family Benefit Engine.
//!
//! This module provides the [`RateTable`] value object consumed by every
//! engine call, the hard-coded 2024-25 defaults, and functionality to load
//! versioned rate tables from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use family_benefit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ftb").unwrap();
//! println!("Loaded program: {}", config.program().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AgeBandRates, AnnualisationFactor, BenefitARates, BenefitBRates, BenefitConfig,
    CompliancePenaltyStyle, HigherTierTaper, PolicyVariant, ProgramMetadata, RateTable,
    RentAssistanceRates, SecondaryCutoffs, SupplementBasis, YoungestChildRates,
};
