//! Figures shown to a crew leader candidate.
//!
//! The presentation runs the compensation calculator once per scenario for
//! the candidate's committed days and reframes the result in the terms a
//! recruiter quotes: revenue the crew is responsible for, guaranteed pay and
//! the bonus on top. The recruitment data sheet instead quotes a
//! full-season crew leader at three performance levels, alongside
//! break-even and the tier's rates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{LevelRates, PlanningConfig};
use crate::error::EngineResult;
use crate::models::{CommittedDays, ExperienceLevel, PhaseBreakdown, Scenario};

use super::break_even::{BreakEvenResult, break_even};
use super::capacity::ratio_or_zero;
use super::compensation::{
    CompensationInput, CompensationResult, calculate_compensation, crew_leader_compensation,
};
use super::day_classification::phases_for;

/// Working days in one pay week.
const DAYS_PER_PAY_WEEK: u32 = 5;
/// Weeks in one pay period.
const WEEKS_PER_PAY_PERIOD: u32 = 2;

/// One scenario of a recruitment presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentScenario {
    /// Revenue the crew is expected to produce per in-season day.
    pub daily_revenue_responsibility: Decimal,
    /// Revenue over the committed in-season days.
    pub total_revenue_responsibility: Decimal,
    /// Per-diem over all committed days.
    pub guaranteed_pay: Decimal,
    /// Bonus before the per-diem offset.
    pub gross_production_bonus: Decimal,
    /// Bonus paid on top of guaranteed pay.
    pub production_bonus: Decimal,
    /// Guaranteed pay plus bonus.
    pub total_compensation: Decimal,
    /// Total compensation per hour.
    pub effective_hourly_rate: Decimal,
    /// Hours in one working day.
    pub hours_per_day: Decimal,
    /// Committed days times hours per day.
    pub total_hours: Decimal,
}

/// Recruitment figures for one level and commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentPresentation {
    /// Candidate's tier.
    pub experience_level: ExperienceLevel,
    /// Per-diem for the tier.
    pub per_diem_rate: Decimal,
    /// Number of committed days.
    pub committed_days: u32,
    /// Committed days per season.
    pub phases: PhaseBreakdown,
    /// Worst, base and best case figures keyed by scenario.
    pub scenarios: BTreeMap<Scenario, RecruitmentScenario>,
}

/// Builds the recruitment presentation for a candidate.
///
/// # Errors
///
/// Returns a validation error if the committed dates repeat a day or the
/// commitment is longer than a planning year.
pub fn recruitment_presentation(
    level: ExperienceLevel,
    committed: &CommittedDays,
    config: &PlanningConfig,
) -> EngineResult<RecruitmentPresentation> {
    let committed = committed.clone().normalized()?;
    let phases = phases_for(&committed, &config.seasons);

    let scenarios = Scenario::ALL
        .into_iter()
        .map(|scenario| {
            let result =
                calculate_compensation(&CompensationInput::new(level, phases, scenario), config)?;
            let figures = RecruitmentScenario {
                daily_revenue_responsibility: result.daily_revenue,
                total_revenue_responsibility: result.in_season_revenue,
                guaranteed_pay: result.total_base_pay,
                gross_production_bonus: result.gross_production_bonus,
                production_bonus: result.net_production_bonus,
                total_compensation: result.total_compensation,
                effective_hourly_rate: result.effective_hourly_rate,
                hours_per_day: result.hours_per_day,
                total_hours: result.total_hours,
            };
            Ok((scenario, figures))
        })
        .collect::<EngineResult<BTreeMap<_, _>>>()?;

    Ok(RecruitmentPresentation {
        experience_level: level,
        per_diem_rate: config.experience_levels.get(level).per_diem_rate,
        committed_days: committed.total(),
        phases,
        scenarios,
    })
}

/// Performance multiplier quoted for each scenario on the data sheet.
pub fn recruitment_multipliers() -> [(Scenario, Decimal); 3] {
    [
        (Scenario::WorstCase, Decimal::new(8, 1)),
        (Scenario::BaseCase, Decimal::ONE),
        (Scenario::BestCase, Decimal::new(12, 1)),
    ]
}

/// A full-season outlook at one performance level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentOutlook {
    /// Multiplier applied to the scenario's daily revenue.
    pub performance_multiplier: Decimal,
    /// Per-diem paid each two-week pay period.
    pub bi_weekly_per_diem: Decimal,
    /// Full-season crew leader figures.
    #[serde(flatten)]
    pub compensation: CompensationResult,
}

/// Everything a recruiter quotes for one tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecruitmentData {
    /// Candidate's tier.
    pub experience_level: ExperienceLevel,
    /// Worst, base and best performance keyed by scenario.
    pub scenarios: BTreeMap<Scenario, RecruitmentOutlook>,
    /// Break-even for the tier.
    pub break_even: BreakEvenResult,
    /// Configured rates for the tier.
    pub rates: LevelRates,
}

/// Builds the recruitment data sheet for `level`.
///
/// Each scenario is a full-season crew leader at the multiplier from
/// [`recruitment_multipliers`]. The bi-weekly per-diem spreads the season
/// per-diem over two-week periods of five working days, and is zero for a
/// season with no working days.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::recruitment_data;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::{ExperienceLevel, Scenario};
/// use rust_decimal::Decimal;
///
/// let data = recruitment_data(ExperienceLevel::Expert, &PlanningConfig::default()).unwrap();
/// // 43800 over 146 / 5 / 2 periods
/// assert_eq!(
///     data.scenarios[&Scenario::BaseCase].bi_weekly_per_diem,
///     Decimal::new(3000, 0)
/// );
/// ```
pub fn recruitment_data(
    level: ExperienceLevel,
    config: &PlanningConfig,
) -> EngineResult<RecruitmentData> {
    let scenarios = recruitment_multipliers()
        .into_iter()
        .map(|(scenario, multiplier)| {
            let compensation = crew_leader_compensation(level, scenario, multiplier, config)?;
            let pay_periods = Decimal::from(compensation.total_days)
                / Decimal::from(DAYS_PER_PAY_WEEK)
                / Decimal::from(WEEKS_PER_PAY_PERIOD);
            let outlook = RecruitmentOutlook {
                performance_multiplier: multiplier,
                bi_weekly_per_diem: ratio_or_zero(compensation.total_base_pay, pay_periods),
                compensation,
            };
            Ok((scenario, outlook))
        })
        .collect::<EngineResult<BTreeMap<_, _>>>()?;

    Ok(RecruitmentData {
        experience_level: level,
        scenarios,
        break_even: break_even(level, config),
        rates: config.experience_levels.get(level).clone(),
    })
}
