//! Request types for the crew planner API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints. Decimal fields accept JSON strings or numbers.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{NamedComposition, SearchBounds, default_revenue_targets, matrix_bounds};
use crate::models::{CommittedDays, CrewComposition, ExperienceLevel, Scenario};

/// Body for `POST /capacity`.
///
/// Crew counts sit at the top level next to the scenario:
/// `{"expert_crews": 1, "advanced_crews": 2, "scenario": "best_case"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityRequest {
    /// Crew counts.
    #[serde(flatten)]
    pub composition: CrewComposition,
    /// Revenue scenario; base case when absent.
    #[serde(default)]
    pub scenario: Scenario,
}

/// Body for `POST /recommend-crews`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendCrewsRequest {
    /// Season revenue to aim for.
    pub target_revenue: Decimal,
    /// Revenue scenario; base case when absent.
    #[serde(default)]
    pub scenario: Scenario,
    /// Search limits; defaults when absent.
    #[serde(default)]
    pub bounds: SearchBounds,
}

/// Body for `POST /compensation/all` and the query string of
/// `GET /compensation/:level/:scenario`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultiplierParams {
    /// Factor on the scenario's daily revenue; 1 when absent.
    #[serde(default)]
    pub performance_multiplier: Option<Decimal>,
}

impl MultiplierParams {
    /// The multiplier, defaulting to 1.
    pub fn multiplier(&self) -> Decimal {
        self.performance_multiplier.unwrap_or(Decimal::ONE)
    }
}

/// Body for `POST /recruitment/presentation`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecruitmentRequest {
    /// Candidate's tier.
    pub experience_level: ExperienceLevel,
    /// Committed dates or a day count.
    pub committed_days: CommittedDays,
}

/// Query string of `DELETE /installers/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoveInstallerParams {
    /// Erase the record instead of marking it inactive.
    #[serde(default)]
    pub permanent: bool,
}

/// Query string of `GET /revenue/dashboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioParams {
    /// Revenue scenario; base case when absent.
    #[serde(default)]
    pub scenario: Scenario,
    /// Replaces the configured goal for the scenario.
    #[serde(default)]
    pub target_revenue: Option<Decimal>,
}

/// Body for `POST /revenue/capacity-analysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapacityAnalysisRequest {
    /// Target per scenario; the configured goals when empty or absent.
    #[serde(default)]
    pub revenue_targets: BTreeMap<Scenario, Decimal>,
}

/// Body for `POST /analytics/optimal-crew-size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimalCrewSizeRequest {
    /// Targets to search for, one result each.
    #[serde(default = "default_revenue_targets")]
    pub revenue_targets: Vec<Decimal>,
    /// Revenue scenario; base case when absent.
    #[serde(default)]
    pub scenario: Scenario,
}

/// Body for `POST /analytics/crew-efficiency-analysis`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrewEfficiencyRequest {
    /// Revenue scenario; base case when absent.
    #[serde(default)]
    pub scenario: Scenario,
}

/// Body for `POST /analytics/capacity-matrix`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapacityMatrixRequest {
    /// Revenue scenario; base case when absent.
    #[serde(default)]
    pub scenario: Scenario,
    /// Enumeration limits; up to 5 per level, 10 total, 50 results when
    /// absent.
    #[serde(default = "matrix_bounds")]
    pub bounds: SearchBounds,
}

impl Default for CapacityMatrixRequest {
    fn default() -> Self {
        Self {
            scenario: Scenario::default(),
            bounds: matrix_bounds(),
        }
    }
}

/// Body for `POST /scenarios/compare`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareScenariosRequest {
    /// Compositions to compare.
    pub compositions: Vec<NamedComposition>,
    /// Scenarios to evaluate; all three when empty or absent.
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}
