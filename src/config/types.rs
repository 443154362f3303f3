//! Configuration types for crew planning.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files and replaced wholesale by
//! the configuration store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExperienceLevel, Scenario, SeasonKey};

/// Date range and working pattern for one season phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonDefinition {
    /// Display name (e.g., "In-Season").
    pub name: String,
    /// First day of the season (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the season (inclusive).
    pub end_date: NaiveDate,
    /// Working days per week, may be fractional.
    pub working_days_per_week: Decimal,
    /// Whether days in this season earn production revenue.
    pub production_eligible: bool,
}

impl SeasonDefinition {
    /// Returns true if `date` falls within the inclusive range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Calendar days covered by the season, both ends included.
    pub fn calendar_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

/// The four season phases of the planning year.
///
/// Each phase has its own slot, so a calendar can never miss or repeat a
/// phase. Chronological contiguity is checked by
/// [`validate_seasons`](super::validate_seasons).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    /// Pre-season.
    pub pre_season: SeasonDefinition,
    /// In-season.
    pub in_season: SeasonDefinition,
    /// Post-season.
    pub post_season: SeasonDefinition,
    /// Off-season.
    pub off_season: SeasonDefinition,
}

impl SeasonCalendar {
    /// Returns the definition for a phase.
    pub fn get(&self, key: SeasonKey) -> &SeasonDefinition {
        match key {
            SeasonKey::PreSeason => &self.pre_season,
            SeasonKey::InSeason => &self.in_season,
            SeasonKey::PostSeason => &self.post_season,
            SeasonKey::OffSeason => &self.off_season,
        }
    }

    /// Iterates phases in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (SeasonKey, &SeasonDefinition)> {
        SeasonKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

impl Default for SeasonCalendar {
    fn default() -> Self {
        Self {
            pre_season: SeasonDefinition {
                name: "Pre-Season".to_string(),
                start_date: ymd(2025, 8, 18),
                end_date: ymd(2025, 9, 28),
                working_days_per_week: Decimal::new(5, 0),
                production_eligible: false,
            },
            in_season: SeasonDefinition {
                name: "In-Season".to_string(),
                start_date: ymd(2025, 9, 29),
                end_date: ymd(2025, 12, 7),
                working_days_per_week: Decimal::new(6, 0),
                production_eligible: true,
            },
            post_season: SeasonDefinition {
                name: "Post-Season".to_string(),
                start_date: ymd(2025, 12, 8),
                end_date: ymd(2026, 2, 1),
                working_days_per_week: Decimal::new(5, 0),
                production_eligible: false,
            },
            off_season: SeasonDefinition {
                name: "Off-Season".to_string(),
                start_date: ymd(2026, 2, 2),
                end_date: ymd(2026, 3, 1),
                working_days_per_week: Decimal::new(4, 0),
                production_eligible: false,
            },
        }
    }
}

/// Per-diem rate and daily revenue range for one experience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRates {
    /// Display name (e.g., "Expert").
    pub name: String,
    /// Guaranteed payment per committed day.
    pub per_diem_rate: Decimal,
    /// Daily revenue in the worst case.
    pub revenue_range_min: Decimal,
    /// Daily revenue in the base case.
    pub revenue_range_base: Decimal,
    /// Daily revenue in the best case.
    pub revenue_range_max: Decimal,
}

impl LevelRates {
    fn new(name: &str, per_diem: i64, min: i64, base: i64, max: i64) -> Self {
        Self {
            name: name.to_string(),
            per_diem_rate: Decimal::new(per_diem, 0),
            revenue_range_min: Decimal::new(min, 0),
            revenue_range_base: Decimal::new(base, 0),
            revenue_range_max: Decimal::new(max, 0),
        }
    }

    /// Daily revenue attributed to one crew under `scenario`.
    pub fn daily_revenue(&self, scenario: Scenario) -> Decimal {
        match scenario {
            Scenario::WorstCase => self.revenue_range_min,
            Scenario::BaseCase => self.revenue_range_base,
            Scenario::BestCase => self.revenue_range_max,
        }
    }
}

/// Rate table covering every experience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceTable {
    /// Beginner rates.
    pub beginner: LevelRates,
    /// Intermediate rates.
    pub intermediate: LevelRates,
    /// Advanced rates.
    pub advanced: LevelRates,
    /// Expert rates.
    pub expert: LevelRates,
}

impl ExperienceTable {
    /// Returns the rates for a level.
    pub fn get(&self, level: ExperienceLevel) -> &LevelRates {
        match level {
            ExperienceLevel::Beginner => &self.beginner,
            ExperienceLevel::Intermediate => &self.intermediate,
            ExperienceLevel::Advanced => &self.advanced,
            ExperienceLevel::Expert => &self.expert,
        }
    }

    /// Iterates levels lowest tier first.
    pub fn iter(&self) -> impl Iterator<Item = (ExperienceLevel, &LevelRates)> {
        ExperienceLevel::ALL
            .into_iter()
            .map(move |level| (level, self.get(level)))
    }
}

impl Default for ExperienceTable {
    fn default() -> Self {
        Self {
            beginner: LevelRates::new("Beginner", 200, 2500, 3250, 4000),
            intermediate: LevelRates::new("Intermediate", 225, 4000, 4750, 5500),
            advanced: LevelRates::new("Advanced", 275, 5500, 6250, 7000),
            expert: LevelRates::new("Expert", 300, 7000, 7750, 8500),
        }
    }
}

/// One step of the sliding scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleThreshold {
    /// Minimum performance ratio (inclusive) for this step.
    pub performance_ratio: Decimal,
    /// Bonus fraction paid on all eligible revenue at this step.
    pub bonus_percentage: Decimal,
}

/// Production bonus sliding scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlidingScale {
    /// Bonus fraction below the first threshold, and the flat rate when no
    /// performance ratio is supplied.
    pub base_percentage: Decimal,
    /// Upper bound for every threshold's bonus fraction.
    pub max_percentage: Decimal,
    /// Steps sorted ascending by performance ratio.
    pub thresholds: Vec<ScaleThreshold>,
}

impl Default for SlidingScale {
    fn default() -> Self {
        let thresholds = (0..=5)
            .map(|step| ScaleThreshold {
                performance_ratio: Decimal::new(10 + step, 1),
                bonus_percentage: Decimal::new(10 + step, 2),
            })
            .collect();
        Self {
            base_percentage: Decimal::new(10, 2),
            max_percentage: Decimal::new(15, 2),
            thresholds,
        }
    }
}

/// Labor cost assumptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborConfig {
    /// Target share of revenue spent on labor.
    pub total_labor_percentage: Decimal,
    /// Lowest hourly rate for a junior installer.
    pub junior_hourly_rate_min: Decimal,
    /// Highest hourly rate for a junior installer.
    pub junior_hourly_rate_max: Decimal,
    /// Working hours in one day.
    pub hours_per_day: Decimal,
}

impl Default for LaborConfig {
    fn default() -> Self {
        Self {
            total_labor_percentage: Decimal::new(20, 2),
            junior_hourly_rate_min: Decimal::new(18, 0),
            junior_hourly_rate_max: Decimal::new(25, 0),
            hours_per_day: Decimal::new(12, 0),
        }
    }
}

/// Season revenue goals per scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueTargets {
    /// Goal in the worst case.
    pub worst_case: Decimal,
    /// Goal in the base case.
    pub base_case: Decimal,
    /// Goal in the best case.
    pub best_case: Decimal,
}

impl RevenueTargets {
    /// Returns the goal for a scenario.
    pub fn target(&self, scenario: Scenario) -> Decimal {
        match scenario {
            Scenario::WorstCase => self.worst_case,
            Scenario::BaseCase => self.base_case,
            Scenario::BestCase => self.best_case,
        }
    }
}

impl Default for RevenueTargets {
    fn default() -> Self {
        Self {
            worst_case: Decimal::new(1_200_000, 0),
            base_case: Decimal::new(1_500_000, 0),
            best_case: Decimal::new(1_800_000, 0),
        }
    }
}

/// Cost ratios used by the financial summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialAssumptions {
    /// Material cost as a share of revenue.
    pub material_cost_percentage: Decimal,
    /// Operating overhead as a share of revenue.
    pub operating_cost_percentage: Decimal,
}

impl Default for FinancialAssumptions {
    fn default() -> Self {
        Self {
            material_cost_percentage: Decimal::new(30, 2),
            operating_cost_percentage: Decimal::new(25, 2),
        }
    }
}

/// Shape of `compensation.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CompensationFile {
    /// Sliding scale section.
    pub sliding_scale: SlidingScale,
    /// Labor section.
    pub labor: LaborConfig,
    /// Optional financial assumptions; stock ratios when absent.
    #[serde(default)]
    pub financials: FinancialAssumptions,
}

/// The complete planning configuration.
///
/// Calculators take a shared reference to one of these and never mutate
/// it; the configuration store swaps in a new value on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningConfig {
    /// Season phases.
    pub seasons: SeasonCalendar,
    /// Rates per experience level.
    pub experience_levels: ExperienceTable,
    /// Production bonus sliding scale.
    pub sliding_scale: SlidingScale,
    /// Labor assumptions.
    pub labor: LaborConfig,
    /// Revenue goals.
    pub revenue_targets: RevenueTargets,
    /// Cost ratios for the financial summary.
    #[serde(default)]
    pub financials: FinancialAssumptions,
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
