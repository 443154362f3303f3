//! Experience level and revenue scenario selectors.
//!
//! Both are closed sets, so they are modelled as enums and every lookup
//! keyed by them goes through an exhaustive `match`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// The experience tier of a crew leader or installer.
///
/// Each tier carries its own per-diem rate and daily revenue range in the
/// planning configuration.
///
/// # Example
///
/// ```
/// use crew_planner::models::ExperienceLevel;
///
/// let level: ExperienceLevel = "expert".parse().unwrap();
/// assert_eq!(level, ExperienceLevel::Expert);
/// assert_eq!(level.to_string(), "expert");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    /// New installers, lowest revenue expectation.
    #[serde(alias = "Beginner")]
    Beginner,
    /// Installers with at least one season behind them.
    #[serde(alias = "Intermediate")]
    Intermediate,
    /// Seasoned installers able to lead a crew unsupervised.
    #[serde(alias = "Advanced")]
    Advanced,
    /// Top tier crew leaders.
    #[serde(alias = "Expert")]
    Expert,
}

impl ExperienceLevel {
    /// All levels, lowest tier first.
    pub const ALL: [ExperienceLevel; 4] = [
        ExperienceLevel::Beginner,
        ExperienceLevel::Intermediate,
        ExperienceLevel::Advanced,
        ExperienceLevel::Expert,
    ];

    /// The snake_case key used on the wire and in configuration files.
    pub fn key(self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
            ExperienceLevel::Expert => "expert",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ExperienceLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(ExperienceLevel::Beginner),
            "intermediate" => Ok(ExperienceLevel::Intermediate),
            "advanced" => Ok(ExperienceLevel::Advanced),
            "expert" => Ok(ExperienceLevel::Expert),
            other => Err(EngineError::validation(
                "experience_level",
                format!("unknown experience level '{}'", other),
            )),
        }
    }
}

/// A revenue assumption used to pick each level's daily revenue.
///
/// - `WorstCase` uses `revenue_range_min`
/// - `BaseCase` uses `revenue_range_base`
/// - `BestCase` uses `revenue_range_max`
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Conservative scenario.
    #[serde(alias = "worst")]
    WorstCase,
    /// Expected performance.
    #[default]
    #[serde(alias = "base")]
    BaseCase,
    /// Optimistic scenario.
    #[serde(alias = "best")]
    BestCase,
}

impl Scenario {
    /// All scenarios, worst first.
    pub const ALL: [Scenario; 3] = [Scenario::WorstCase, Scenario::BaseCase, Scenario::BestCase];

    /// The snake_case key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            Scenario::WorstCase => "worst_case",
            Scenario::BaseCase => "base_case",
            Scenario::BestCase => "best_case",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Scenario {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "worst" | "worst_case" => Ok(Scenario::WorstCase),
            "base" | "base_case" => Ok(Scenario::BaseCase),
            "best" | "best_case" => Ok(Scenario::BestCase),
            other => Err(EngineError::validation(
                "scenario",
                format!("unknown scenario '{}'", other),
            )),
        }
    }
}
