//! Configuration loading and validation for the crew planner.
//!
//! This module provides functionality to load planning configurations from
//! YAML files (season calendar, experience-level rates, compensation rules
//! and revenue targets) and the validation rules every configuration must
//! pass before it is used.
//!
//! # Example
//!
//! ```no_run
//! use crew_planner::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! println!("In-season starts {}", loader.config().seasons.in_season.start_date);
//! ```

mod loader;
mod types;
mod validation;

pub use loader::ConfigLoader;
pub use types::{
    CompensationFile, ExperienceTable, FinancialAssumptions, LaborConfig, LevelRates,
    PlanningConfig, RevenueTargets, ScaleThreshold, SeasonCalendar, SeasonDefinition,
    SlidingScale,
};
pub use validation::{
    MAX_DAILY_AMOUNT, MAX_REVENUE_TARGET, MIN_BONUS_PERCENTAGE, ensure_revenue_target,
    validate_config, validate_experience_levels, validate_financials, validate_labor,
    validate_revenue_targets, validate_seasons, validate_sliding_scale,
};

impl PlanningConfig {
    /// Runs every validation rule over the configuration.
    pub fn validate(&self) -> crate::error::EngineResult<()> {
        validate_config(self)
    }
}
