//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading planning
//! configurations from YAML files.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::{ExperienceLevel, Scenario};

use super::types::{
    CompensationFile, ExperienceTable, LevelRates, PlanningConfig, RevenueTargets, SeasonCalendar,
};
use super::validation::validate_config;

/// Loads and provides access to planning configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory,
/// validates the combined result and provides lookups over it.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── seasons.yaml            # Season date ranges and working patterns
/// ├── experience_levels.yaml  # Per-diem and daily revenue per level
/// ├── compensation.yaml       # Sliding scale, labor and cost ratios
/// └── revenue_targets.yaml    # Season goals per scenario
/// ```
///
/// # Example
///
/// ```no_run
/// use crew_planner::config::ConfigLoader;
/// use crew_planner::models::{ExperienceLevel, Scenario};
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let expert = loader.get_level(ExperienceLevel::Expert);
/// println!("Expert per-diem: ${}", expert.per_diem_rate);
///
/// let daily = loader.get_daily_revenue(ExperienceLevel::Expert, Scenario::BestCase);
/// println!("Best-case daily revenue: ${}", daily);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PlanningConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The combined configuration breaks a validation rule
    ///
    /// # Example
    ///
    /// ```no_run
    /// use crew_planner::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), crew_planner::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let seasons = Self::load_yaml::<SeasonCalendar>(&path.join("seasons.yaml"))?;
        let experience_levels =
            Self::load_yaml::<ExperienceTable>(&path.join("experience_levels.yaml"))?;
        let compensation = Self::load_yaml::<CompensationFile>(&path.join("compensation.yaml"))?;
        let revenue_targets =
            Self::load_yaml::<RevenueTargets>(&path.join("revenue_targets.yaml"))?;

        let config = PlanningConfig {
            seasons,
            experience_levels,
            sliding_scale: compensation.sliding_scale,
            labor: compensation.labor,
            revenue_targets,
            financials: compensation.financials,
        };
        validate_config(&config)?;

        tracing::info!(
            path = %path.display(),
            thresholds = config.sliding_scale.thresholds.len(),
            "Loaded planning configuration"
        );

        Ok(Self { config })
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

    /// Returns the underlying planning configuration.
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PlanningConfig {
        self.config
    }

    /// Gets the rate table entry for an experience level.
    pub fn get_level(&self, level: ExperienceLevel) -> &LevelRates {
        self.config.experience_levels.get(level)
    }

    /// Gets the daily revenue of one crew at `level` under `scenario`.
    pub fn get_daily_revenue(&self, level: ExperienceLevel, scenario: Scenario) -> Decimal {
        self.get_level(level).daily_revenue(scenario)
    }
}
