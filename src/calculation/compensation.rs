//! Crew leader compensation.
//!
//! Compensation has two parts: a guaranteed per-diem for every committed
//! day, and a production bonus on in-season revenue that is only paid to
//! the extent it exceeds the per-diem already earned on production days
//! (in-season and post-season).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::config::PlanningConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditTrace, ExperienceLevel, PhaseBreakdown, Scenario};

use super::day_classification::season_calendar;
use super::sliding_scale::{matched_threshold, resolve_bonus_percentage};

/// Upper bound on a revenue or performance multiplier.
pub const MAX_PERFORMANCE_MULTIPLIER: Decimal = Decimal::TEN;

/// Input to [`calculate_compensation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Crew leader tier.
    pub experience_level: ExperienceLevel,
    /// Committed days per season.
    pub phases: PhaseBreakdown,
    /// Revenue scenario.
    #[serde(default)]
    pub scenario: Scenario,
    /// Optional performance ratio for the sliding scale.
    #[serde(default)]
    pub performance_ratio: Option<Decimal>,
    /// Multiplier applied to the scenario's daily revenue (1 when absent).
    #[serde(default)]
    pub revenue_multiplier: Option<Decimal>,
}

impl CompensationInput {
    /// Builds an input with no performance ratio or multiplier.
    pub fn new(experience_level: ExperienceLevel, phases: PhaseBreakdown, scenario: Scenario) -> Self {
        Self {
            experience_level,
            phases,
            scenario,
            performance_ratio: None,
            revenue_multiplier: None,
        }
    }

    /// Checks the committed days, multiplier and ratio.
    ///
    /// Committed days are capped at one planning year and the multiplier
    /// must lie in `(0, 10]`, which keeps every product well inside the
    /// range of [`Decimal`].
    pub fn validate(&self) -> EngineResult<()> {
        self.phases.validate()?;
        if let Some(multiplier) = self.revenue_multiplier {
            validate_multiplier("revenue_multiplier", multiplier)?;
        }
        if let Some(ratio) = self.performance_ratio {
            if ratio < Decimal::ZERO {
                return Err(EngineError::validation(
                    "performance_ratio",
                    format!("must not be negative, got {}", ratio),
                ));
            }
        }
        Ok(())
    }
}

fn validate_multiplier(field: &str, multiplier: Decimal) -> EngineResult<()> {
    if multiplier <= Decimal::ZERO {
        return Err(EngineError::validation(field, "must be positive"));
    }
    if multiplier > MAX_PERFORMANCE_MULTIPLIER {
        return Err(EngineError::validation(
            field,
            format!(
                "must not exceed {}, got {}",
                MAX_PERFORMANCE_MULTIPLIER, multiplier
            ),
        ));
    }
    Ok(())
}

/// The full compensation breakdown for one level, scenario and set of
/// committed days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationResult {
    /// Crew leader tier.
    pub experience_level: ExperienceLevel,
    /// Revenue scenario.
    pub scenario: Scenario,
    /// Committed days per season.
    pub phases: PhaseBreakdown,
    /// Per-diem paid for each committed day.
    pub per_diem_rate: Decimal,
    /// Daily revenue attributed to the crew.
    pub daily_revenue: Decimal,
    /// Sliding-scale bonus fraction applied.
    pub bonus_percentage: Decimal,
    /// All committed days, unclassified included.
    pub total_days: u32,
    /// Guaranteed per-diem over all committed days.
    pub total_base_pay: Decimal,
    /// Revenue produced on in-season days.
    pub in_season_revenue: Decimal,
    /// In-season plus post-season days.
    pub production_days: u32,
    /// Per-diem earned on production days.
    pub production_days_per_diem: Decimal,
    /// Bonus before the per-diem offset.
    pub gross_production_bonus: Decimal,
    /// Bonus actually paid on top of per-diem; never negative.
    pub net_production_bonus: Decimal,
    /// Base pay plus net bonus.
    pub total_compensation: Decimal,
    /// Hours in one working day.
    pub hours_per_day: Decimal,
    /// Total days times hours per day.
    pub total_hours: Decimal,
    /// Total compensation per hour, rounded to cents; zero with no days.
    pub effective_hourly_rate: Decimal,
    /// Rule steps behind the figures.
    pub audit_trace: AuditTrace,
}

/// Calculates compensation for one crew leader.
///
/// # Arguments
///
/// * `input` - Level, committed days, scenario and optional performance ratio
/// * `config` - The planning configuration snapshot
///
/// # Steps
///
/// 1. Look up the per-diem and the scenario's daily revenue for the level
/// 2. Resolve the bonus percentage (sliding scale when a ratio is given)
/// 3. Offset the gross bonus by the production-day per-diem, floored at zero
///
/// # Errors
///
/// Returns a validation error when the input fails
/// [`CompensationInput::validate`].
///
/// # Example
///
/// ```
/// use crew_planner::calculation::{calculate_compensation, CompensationInput};
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::{ExperienceLevel, PhaseBreakdown, Scenario};
/// use rust_decimal::Decimal;
///
/// let phases = PhaseBreakdown {
///     pre_season: 2,
///     in_season: 12,
///     post_season: 6,
///     ..PhaseBreakdown::default()
/// };
/// let input = CompensationInput::new(ExperienceLevel::Expert, phases, Scenario::BaseCase);
/// let result = calculate_compensation(&input, &PlanningConfig::default()).unwrap();
///
/// assert_eq!(result.total_base_pay, Decimal::new(6000, 0));
/// assert_eq!(result.net_production_bonus, Decimal::new(3900, 0));
/// assert_eq!(result.total_compensation, Decimal::new(9900, 0));
/// assert_eq!(result.effective_hourly_rate, Decimal::new(4125, 2));
/// ```
pub fn calculate_compensation(
    input: &CompensationInput,
    config: &PlanningConfig,
) -> EngineResult<CompensationResult> {
    input.validate()?;

    let mut audit_trace = AuditTrace::default();
    let rates = config.experience_levels.get(input.experience_level);
    let phases = input.phases;

    // Step 1: rate lookup
    let per_diem_rate = rates.per_diem_rate;
    let scenario_revenue = rates.daily_revenue(input.scenario);
    let daily_revenue = match input.revenue_multiplier {
        Some(multiplier) => scenario_revenue * multiplier,
        None => scenario_revenue,
    };
    audit_trace.push(
        "rate_lookup",
        "Rate Lookup",
        "per_diem_rate, daily_revenue = experience_levels[level][scenario] * multiplier",
        serde_json::json!({
            "experience_level": input.experience_level.key(),
            "scenario": input.scenario.key(),
            "revenue_multiplier": input.revenue_multiplier.map(|m| m.to_string()),
        }),
        serde_json::json!({
            "per_diem_rate": per_diem_rate.to_string(),
            "daily_revenue": daily_revenue.to_string(),
        }),
        format!(
            "{} crew leader earns ${} per committed day and is credited ${} of daily revenue in the {}",
            rates.name, per_diem_rate, daily_revenue, input.scenario
        ),
    );

    // Step 2: bonus percentage
    let bonus_percentage = resolve_bonus_percentage(input.performance_ratio, &config.sliding_scale);
    let matched = input
        .performance_ratio
        .and_then(|ratio| matched_threshold(ratio, &config.sliding_scale));
    let reasoning = match (input.performance_ratio, matched) {
        (None, _) => format!(
            "No performance ratio supplied, base bonus of {} applies",
            bonus_percentage
        ),
        (Some(ratio), None) => format!(
            "Performance ratio {} is below every threshold, base bonus of {} applies",
            ratio, bonus_percentage
        ),
        (Some(ratio), Some(step)) => format!(
            "Performance ratio {} reaches the {} threshold, bonus of {} applies to all in-season revenue",
            ratio, step.performance_ratio, bonus_percentage
        ),
    };
    audit_trace.push(
        "bonus_percentage",
        "Bonus Percentage Resolution",
        "highest threshold with performance_ratio <= ratio, else base_percentage",
        serde_json::json!({
            "performance_ratio": input.performance_ratio.map(|r| r.to_string()),
        }),
        serde_json::json!({
            "bonus_percentage": bonus_percentage.to_string(),
        }),
        reasoning,
    );

    // Step 3: per-diem offset
    let total_days = phases.total_days();
    let total_base_pay = Decimal::from(total_days) * per_diem_rate;
    let in_season_revenue = Decimal::from(phases.in_season) * daily_revenue;
    let production_days = phases.production_days();
    let production_days_per_diem = Decimal::from(production_days) * per_diem_rate;
    let gross_production_bonus = in_season_revenue * bonus_percentage;
    let net_production_bonus = (gross_production_bonus - production_days_per_diem).max(Decimal::ZERO);
    audit_trace.push(
        "per_diem_offset",
        "Per-Diem Offset",
        "net_bonus = max(0, in_season_revenue * bonus_percentage - production_days * per_diem_rate)",
        serde_json::json!({
            "in_season_revenue": in_season_revenue.to_string(),
            "gross_production_bonus": gross_production_bonus.to_string(),
            "production_days": production_days,
            "production_days_per_diem": production_days_per_diem.to_string(),
        }),
        serde_json::json!({
            "net_production_bonus": net_production_bonus.to_string(),
        }),
        if net_production_bonus > Decimal::ZERO {
            format!(
                "Gross bonus ${} exceeds production per-diem ${}, ${} paid on top",
                gross_production_bonus, production_days_per_diem, net_production_bonus
            )
        } else {
            format!(
                "Gross bonus ${} does not exceed production per-diem ${}, no bonus paid",
                gross_production_bonus, production_days_per_diem
            )
        },
    );

    let total_compensation = total_base_pay + net_production_bonus;
    let hours_per_day = config.labor.hours_per_day;
    let total_hours = Decimal::from(total_days) * hours_per_day;
    let effective_hourly_rate = if total_hours.is_zero() {
        Decimal::ZERO
    } else {
        (total_compensation / total_hours)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    Ok(CompensationResult {
        experience_level: input.experience_level,
        scenario: input.scenario,
        phases,
        per_diem_rate,
        daily_revenue,
        bonus_percentage,
        total_days,
        total_base_pay,
        in_season_revenue,
        production_days,
        production_days_per_diem,
        gross_production_bonus,
        net_production_bonus,
        total_compensation,
        hours_per_day,
        total_hours,
        effective_hourly_rate,
        audit_trace,
    })
}

/// Compensation for a full-season crew leader.
///
/// Runs [`calculate_compensation`] over the working days of the configured
/// season calendar. The scenario's daily revenue is scaled by
/// `performance_multiplier`, and the performance ratio fed to the sliding
/// scale is the scaled revenue over the level's base-case revenue.
///
/// # Errors
///
/// Returns a validation error when `performance_multiplier` is not in
/// `(0, 10]`.
pub fn crew_leader_compensation(
    level: ExperienceLevel,
    scenario: Scenario,
    performance_multiplier: Decimal,
    config: &PlanningConfig,
) -> EngineResult<CompensationResult> {
    validate_multiplier("performance_multiplier", performance_multiplier)?;

    let rates = config.experience_levels.get(level);
    let adjusted_revenue = rates.daily_revenue(scenario) * performance_multiplier;
    let performance_ratio = if rates.revenue_range_base.is_zero() {
        Decimal::ZERO
    } else {
        adjusted_revenue / rates.revenue_range_base
    };

    let input = CompensationInput {
        experience_level: level,
        phases: season_calendar(&config.seasons),
        scenario,
        performance_ratio: Some(performance_ratio),
        revenue_multiplier: Some(performance_multiplier),
    };
    calculate_compensation(&input, config)
}

/// Full-season compensation for every level under every scenario, lowest
/// tier and worst case first.
pub fn crew_leader_compensation_all(
    performance_multiplier: Decimal,
    config: &PlanningConfig,
) -> EngineResult<Vec<CompensationResult>> {
    let mut results = Vec::with_capacity(ExperienceLevel::ALL.len() * Scenario::ALL.len());
    for level in ExperienceLevel::ALL {
        for scenario in Scenario::ALL {
            results.push(crew_leader_compensation(
                level,
                scenario,
                performance_multiplier,
                config,
            )?);
        }
    }
    Ok(results)
}
