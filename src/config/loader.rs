//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading benefit rate
//! tables from YAML files.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{BenefitConfig, ProgramMetadata, RateTable};

/// Loads and provides access to versioned rate tables.
///
/// # Directory Structure
///
/// ```text
/// config/ftb/
/// ├── program.yaml        # Program metadata
/// └── rates/
///     └── 2024-07-01.yaml # Rate table effective from this date
/// ```
///
/// # Example
///
/// ```no_run
/// use family_benefit_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/ftb").unwrap();
/// let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
/// let table = loader.rate_table_for(date).unwrap();
/// println!("Policy year: {}", table.policy_year);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BenefitConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Every rate table is validated as it is loaded, so a table with a
    /// negative rate or an out-of-range taper fails the whole load.
    ///
    /// # Errors
    ///
    /// - `ConfigNotFound` if `program.yaml` or the `rates` directory is missing,
    ///   or the `rates` directory holds no YAML files
    /// - `ConfigParseError` if any file contains invalid YAML or misses a field
    /// - `InvalidRateTable` if a table violates the rate table invariants
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let program_path = path.join("program.yaml");
        let metadata = Self::load_yaml::<ProgramMetadata>(&program_path)?;

        let rates_dir = path.join("rates");
        let rate_tables = Self::load_rate_tables(&rates_dir)?;

        info!(
            program = %metadata.code,
            version = %metadata.version,
            tables = rate_tables.len(),
            "Loaded benefit configuration"
        );

        Ok(Self {
            config: BenefitConfig::new(metadata, rate_tables),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads and validates every rate table in the rates directory.
    fn load_rate_tables(rates_dir: &Path) -> EngineResult<Vec<RateTable>> {
        let rates_dir_str = rates_dir.display().to_string();

        if !rates_dir.exists() {
            return Err(EngineError::ConfigNotFound {
                path: rates_dir_str,
            });
        }

        let entries = fs::read_dir(rates_dir).map_err(|_| EngineError::ConfigNotFound {
            path: rates_dir_str.clone(),
        })?;

        let mut tables = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: rates_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<RateTable>(&path)?;
                if let Err(err) = table.validate() {
                    warn!(path = %path.display(), error = %err, "Rejected rate table");
                    return Err(err);
                }
                tables.push(table);
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no rate files found)", rates_dir_str),
            });
        }

        Ok(tables)
    }

    /// Returns the underlying benefit configuration.
    pub fn config(&self) -> &BenefitConfig {
        &self.config
    }

    /// Returns the program metadata.
    pub fn program(&self) -> &ProgramMetadata {
        self.config.program()
    }

    /// Gets the rate table in force on a given date.
    ///
    /// The most recent table whose effective date is on or before `date` wins.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use family_benefit_engine::config::ConfigLoader;
    /// use chrono::NaiveDate;
    ///
    /// let loader = ConfigLoader::load("./config/ftb")?;
    /// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    /// let table = loader.rate_table_for(date)?;
    /// println!("Lower IFA: ${}", table.benefit_a.lower_income_free_area);
    /// # Ok::<(), family_benefit_engine::error::EngineError>(())
    /// ```
    pub fn rate_table_for(&self, date: NaiveDate) -> EngineResult<&RateTable> {
        self.config
            .rate_tables()
            .iter()
            .rfind(|table| table.effective_date <= date)
            .ok_or(EngineError::RateTableNotFound { date })
    }

    /// Returns the most recently effective rate table.
    pub fn latest_rate_table(&self) -> Option<&RateTable> {
        self.config.rate_tables().last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/ftb"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.program().code, "FTB");
        assert_eq!(loader.program().name, "Family Tax Benefit");
    }

    #[test]
    fn test_loaded_table_matches_hard_coded_defaults() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();

        let table = loader.rate_table_for(date).unwrap();
        assert_eq!(*table, RateTable::default_2024_25());
    }

    #[test]
    fn test_benefit_a_rates_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.latest_rate_table().unwrap();

        assert_eq!(table.benefit_a.max_rates.age_0_12, dec("222.04"));
        assert_eq!(table.benefit_a.max_rates.age_13_15, dec("288.82"));
        assert_eq!(table.benefit_a.base_rates.age_0_12, dec("71.26"));
        assert_eq!(table.benefit_a.lower_income_free_area, dec("65189"));
        assert_eq!(table.benefit_a.higher_income_free_area, dec("115997"));
        assert_eq!(table.benefit_a.primary_taper, dec("0.20"));
        assert_eq!(table.benefit_a.secondary_taper, dec("0.30"));
    }

    #[test]
    fn test_benefit_b_rates_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let table = loader.latest_rate_table().unwrap();

        assert_eq!(table.benefit_b.max_rates.under_5, dec("188.86"));
        assert_eq!(table.benefit_b.max_rates.five_and_over, dec("131.74"));
        assert_eq!(table.benefit_b.primary_income_limit, dec("117194"));
        assert_eq!(table.benefit_b.couple_age_limit, 13);
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("program.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_program_metadata_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        assert_eq!(loader.program().version, "2024-07-01");
        assert!(loader.program().source_url.starts_with("https://"));
    }

    #[test]
    fn test_rate_table_not_found_before_first_effective_date() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        match loader.rate_table_for(date) {
            Err(EngineError::RateTableNotFound { date: d }) => assert_eq!(d, date),
            other => panic!("Expected RateTableNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_effective_date_is_inclusive() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        assert!(loader.rate_table_for(date).is_ok());
    }
}
