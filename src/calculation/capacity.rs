//! Crew capacity and labor cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::error::EngineResult;
use crate::models::{CrewComposition, ExperienceLevel, Scenario};

use super::compensation::{CompensationInput, calculate_compensation};
use super::day_classification::{season_calendar, season_working_days};

/// Capacity and cost contributed by the crews at one experience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCapacity {
    /// Crew leader tier.
    pub experience_level: ExperienceLevel,
    /// Number of crews at this tier.
    pub crew_count: u32,
    /// Scenario daily revenue of one crew.
    pub daily_revenue_per_crew: Decimal,
    /// Daily revenue of all crews at this tier.
    pub total_daily_revenue: Decimal,
    /// Season per-diem for all crew leaders at this tier.
    pub per_diem_cost: Decimal,
    /// Season net production bonus for all crew leaders at this tier.
    pub production_bonus_cost: Decimal,
    /// Per-diem plus bonus.
    pub labor_cost: Decimal,
    /// Junior installer wages at the minimum rate over in-season days.
    /// Informational; not part of `labor_cost`.
    pub junior_installer_cost: Decimal,
}

/// Capacity of a crew composition under one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityResult {
    /// The composition evaluated.
    pub composition: CrewComposition,
    /// Revenue scenario.
    pub scenario: Scenario,
    /// Sum of crews across tiers.
    pub total_crews: u32,
    /// Daily revenue across all crews.
    pub total_daily_capacity: Decimal,
    /// Working days in the in-season phase.
    pub in_season_days: u32,
    /// Daily capacity times in-season days.
    pub total_seasonal_revenue: Decimal,
    /// Crew leader compensation across all crews.
    pub total_labor_cost: Decimal,
    /// Labor cost as a percentage of revenue; zero with no revenue.
    pub labor_percentage: Decimal,
    /// Revenue times the configured labor share.
    pub labor_budget: Decimal,
    /// True when labor cost does not exceed the budget.
    pub within_labor_budget: bool,
    /// Per-tier breakdown, lowest tier first; tiers with no crews omitted.
    pub levels: Vec<LevelCapacity>,
}

/// Computes revenue capacity and labor cost for a crew composition.
///
/// Each crew leader is costed as a full-season crew leader (per-diem over
/// every working day of the season calendar plus the net production bonus
/// at the base bonus percentage).
///
/// # Errors
///
/// Returns a validation error for a composition with no crews or with more
/// than [`CrewComposition::MAX_PER_LEVEL`] crews at one tier.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::capacity;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::{CrewComposition, Scenario};
/// use rust_decimal::Decimal;
///
/// let crews = CrewComposition::new(1, 0, 0, 0);
/// let result = capacity(&crews, Scenario::BaseCase, &PlanningConfig::default()).unwrap();
///
/// assert_eq!(result.total_daily_capacity, Decimal::new(7750, 0));
/// assert_eq!(result.total_seasonal_revenue, Decimal::new(465_000, 0));
/// ```
pub fn capacity(
    composition: &CrewComposition,
    scenario: Scenario,
    config: &PlanningConfig,
) -> EngineResult<CapacityResult> {
    composition.validate()?;

    let calendar = season_calendar(&config.seasons);
    let in_season_days = season_working_days(&config.seasons.in_season);

    let levels: Vec<LevelCapacity> = ExperienceLevel::ALL
        .into_iter()
        .filter(|level| composition.count(*level) > 0)
        .map(|level| {
            let crew_count = composition.count(level);
            let count = Decimal::from(crew_count);
            let leader = calculate_compensation(
                &CompensationInput::new(level, calendar, scenario),
                config,
            )?;
            Ok(LevelCapacity {
                experience_level: level,
                crew_count,
                daily_revenue_per_crew: leader.daily_revenue,
                total_daily_revenue: count * leader.daily_revenue,
                per_diem_cost: count * leader.total_base_pay,
                production_bonus_cost: count * leader.net_production_bonus,
                labor_cost: count * leader.total_compensation,
                junior_installer_cost: count
                    * config.labor.junior_hourly_rate_min
                    * config.labor.hours_per_day
                    * Decimal::from(in_season_days),
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let total_daily_capacity: Decimal = levels.iter().map(|l| l.total_daily_revenue).sum();
    let total_labor_cost: Decimal = levels.iter().map(|l| l.labor_cost).sum();
    let total_seasonal_revenue = total_daily_capacity * Decimal::from(in_season_days);
    let labor_percentage = percentage_of(total_labor_cost, total_seasonal_revenue);
    let labor_budget = total_seasonal_revenue * config.labor.total_labor_percentage;

    Ok(CapacityResult {
        composition: *composition,
        scenario,
        total_crews: composition.total_crews(),
        total_daily_capacity,
        in_season_days,
        total_seasonal_revenue,
        total_labor_cost,
        labor_percentage,
        labor_budget,
        within_labor_budget: total_labor_cost <= labor_budget,
        levels,
    })
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub(crate) fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        Decimal::ZERO
    } else {
        part / whole * Decimal::ONE_HUNDRED
    }
}

/// `numerator / denominator`, or zero when `denominator` is zero.
pub(crate) fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}
