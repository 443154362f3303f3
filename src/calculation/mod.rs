//! Calculation logic for the crew planner.
//!
//! This module contains the pure planning calculations: season day
//! classification, sliding-scale bonus resolution, crew leader
//! compensation, crew capacity and break-even, composition search,
//! financial summaries, recruitment figures, revenue tracking against
//! targets, and the analytics built on top of capacity and the
//! recommendation search.

mod analytics;
mod break_even;
mod capacity;
mod compensation;
mod day_classification;
mod financial_summary;
mod recommendation;
mod recruitment;
mod revenue_tracking;
mod sliding_scale;

pub use analytics::{
    ComparedComposition, CompositionEfficiency, MAX_REVENUE_TARGETS, MatrixEntry,
    NamedComposition, OptimalCrewSize, ScenarioSensitivity, SensitivityAnalysis, SensitivityPoint,
    capacity_matrix, compare_scenarios, crew_efficiency_analysis, default_revenue_targets,
    efficiency_presets, matrix_bounds, optimal_crew_sizes, sensitivity_analysis,
    sensitivity_multipliers,
};
pub use break_even::{BreakEvenResult, break_even, break_even_all};
pub use capacity::{CapacityResult, LevelCapacity, capacity};
pub use compensation::{
    CompensationInput, CompensationResult, MAX_PERFORMANCE_MULTIPLIER, calculate_compensation,
    crew_leader_compensation, crew_leader_compensation_all,
};
pub use day_classification::{
    classify_date, phase_breakdown_from_dates, phases_for, proportional_split, season_calendar,
    season_working_days,
};
pub use financial_summary::{FinancialSummary, ScenarioFinancials, financial_summary};
pub use recommendation::{CrewRecommendation, MAX_CREWS_PER_LEVEL, SearchBounds, recommend_crews};
pub use recruitment::{
    RecruitmentData, RecruitmentOutlook, RecruitmentPresentation, RecruitmentScenario,
    recruitment_data, recruitment_multipliers, recruitment_presentation,
};
pub use revenue_tracking::{
    InstallerCommitment, LevelCommitment, RevenueDashboard, capacity_analysis, revenue_dashboard,
};
pub use sliding_scale::{matched_threshold, resolve_bonus_percentage};
