//! Break-even revenue per experience level.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::models::ExperienceLevel;

use super::capacity::ratio_or_zero;
use super::day_classification::{season_calendar, season_working_days};

/// Revenue a crew leader must produce for the base bonus to cover their
/// season per-diem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakEvenResult {
    /// Crew leader tier.
    pub experience_level: ExperienceLevel,
    /// Per-diem rate for the tier.
    pub per_diem_rate: Decimal,
    /// Working days across all seasons.
    pub total_working_days: u32,
    /// Per-diem over all working days.
    pub total_per_diem: Decimal,
    /// Base bonus fraction from the sliding scale.
    pub base_percentage: Decimal,
    /// Season revenue at which the base bonus equals the per-diem.
    pub break_even_revenue: Decimal,
    /// Working days in the in-season phase.
    pub in_season_days: u32,
    /// Break-even revenue spread over in-season days.
    pub break_even_daily_revenue: Decimal,
}

/// Break-even analysis for one level.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::break_even;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::ExperienceLevel;
/// use rust_decimal::Decimal;
///
/// let result = break_even(ExperienceLevel::Expert, &PlanningConfig::default());
/// // 146 days * 300 / 0.10
/// assert_eq!(result.break_even_revenue, Decimal::new(438_000, 0));
/// assert_eq!(result.break_even_daily_revenue, Decimal::new(7300, 0));
/// ```
pub fn break_even(level: ExperienceLevel, config: &PlanningConfig) -> BreakEvenResult {
    let per_diem_rate = config.experience_levels.get(level).per_diem_rate;
    let total_working_days = season_calendar(&config.seasons).total_days();
    let in_season_days = season_working_days(&config.seasons.in_season);
    let base_percentage = config.sliding_scale.base_percentage;

    let total_per_diem = Decimal::from(total_working_days) * per_diem_rate;
    let break_even_revenue = ratio_or_zero(total_per_diem, base_percentage);
    let break_even_daily_revenue = ratio_or_zero(break_even_revenue, Decimal::from(in_season_days));

    BreakEvenResult {
        experience_level: level,
        per_diem_rate,
        total_working_days,
        total_per_diem,
        base_percentage,
        break_even_revenue,
        in_season_days,
        break_even_daily_revenue,
    }
}

/// Break-even analysis for every level, lowest tier first.
pub fn break_even_all(config: &PlanningConfig) -> Vec<BreakEvenResult> {
    ExperienceLevel::ALL
        .into_iter()
        .map(|level| break_even(level, config))
        .collect()
}
