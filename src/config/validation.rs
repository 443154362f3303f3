//! Validation rules for planning configuration.
//!
//! Every rule runs before a configuration is stored, so a rejected update
//! leaves the previous configuration untouched and calculators never see
//! an invalid table.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{MAX_PLANNING_DAYS, Scenario};

use super::types::{
    ExperienceTable, FinancialAssumptions, LaborConfig, PlanningConfig, RevenueTargets,
    SeasonCalendar, SlidingScale,
};

/// Largest per-diem, daily revenue or hourly rate accepted.
pub const MAX_DAILY_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Largest season revenue target accepted.
pub const MAX_REVENUE_TARGET: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Smallest base bonus percentage accepted (0.1%).
pub const MIN_BONUS_PERCENTAGE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Validates all sections of a planning configuration.
pub fn validate_config(config: &PlanningConfig) -> EngineResult<()> {
    validate_seasons(&config.seasons)?;
    validate_experience_levels(&config.experience_levels)?;
    validate_sliding_scale(&config.sliding_scale)?;
    validate_labor(&config.labor)?;
    validate_revenue_targets(&config.revenue_targets)?;
    validate_financials(&config.financials)
}

/// Checks that the seasons are well-formed, chronological and gap-free.
///
/// Each season must end on or after its start date and the next season
/// must start exactly one day after the previous one ends. The four
/// seasons together span at most one planning year.
///
/// # Example
///
/// ```
/// use crew_planner::config::{validate_seasons, SeasonCalendar};
///
/// let mut calendar = SeasonCalendar::default();
/// assert!(validate_seasons(&calendar).is_ok());
///
/// // Open a one-day gap between in-season and post-season
/// calendar.post_season.start_date = calendar.post_season.start_date.succ_opt().unwrap();
/// assert!(validate_seasons(&calendar).is_err());
/// ```
pub fn validate_seasons(calendar: &SeasonCalendar) -> EngineResult<()> {
    for (key, season) in calendar.iter() {
        if season.start_date > season.end_date {
            return Err(EngineError::validation(
                "seasons",
                format!(
                    "{} ends ({}) before it starts ({})",
                    key, season.end_date, season.start_date
                ),
            ));
        }
        if season.working_days_per_week <= Decimal::ZERO
            || season.working_days_per_week > Decimal::new(7, 0)
        {
            return Err(EngineError::validation(
                "seasons",
                format!(
                    "{} working_days_per_week must be within (0, 7], got {}",
                    key, season.working_days_per_week
                ),
            ));
        }
    }

    let ordered: Vec<_> = calendar.iter().collect();
    for pair in ordered.windows(2) {
        let (previous_key, previous) = pair[0];
        let (next_key, next) = pair[1];
        let expected_start = previous.end_date.succ_opt();
        if expected_start != Some(next.start_date) {
            let problem = if next.start_date <= previous.end_date {
                "overlaps"
            } else {
                "leaves a gap after"
            };
            return Err(EngineError::validation(
                "seasons",
                format!(
                    "{} starting {} {} {} ending {}",
                    next_key, next.start_date, problem, previous_key, previous.end_date
                ),
            ));
        }
    }

    let span = (calendar.off_season.end_date - calendar.pre_season.start_date).num_days() + 1;
    if span > i64::from(MAX_PLANNING_DAYS) {
        return Err(EngineError::validation(
            "seasons",
            format!(
                "seasons span {} days, more than the {} day planning year",
                span, MAX_PLANNING_DAYS
            ),
        ));
    }

    Ok(())
}

/// Checks `min <= base <= max` and a positive per-diem for every level.
///
/// Rates are whole cents no larger than [`MAX_DAILY_AMOUNT`].
pub fn validate_experience_levels(table: &ExperienceTable) -> EngineResult<()> {
    for (level, rates) in table.iter() {
        if rates.per_diem_rate <= Decimal::ZERO {
            return Err(EngineError::validation(
                "experience_levels",
                format!("{} per_diem_rate must be positive", level),
            ));
        }
        if rates.revenue_range_min < Decimal::ZERO {
            return Err(EngineError::validation(
                "experience_levels",
                format!("{} revenue_range_min must not be negative", level),
            ));
        }
        for (name, value) in [
            ("per_diem_rate", rates.per_diem_rate),
            ("revenue_range_min", rates.revenue_range_min),
            ("revenue_range_base", rates.revenue_range_base),
            ("revenue_range_max", rates.revenue_range_max),
        ] {
            ensure_amount(
                "experience_levels",
                &format!("{} {}", level, name),
                value,
                MAX_DAILY_AMOUNT,
            )?;
        }
        if !(rates.revenue_range_min <= rates.revenue_range_base
            && rates.revenue_range_base <= rates.revenue_range_max)
        {
            return Err(EngineError::validation(
                "experience_levels",
                format!(
                    "{} revenue range must satisfy min <= base <= max ({} / {} / {})",
                    level,
                    rates.revenue_range_min,
                    rates.revenue_range_base,
                    rates.revenue_range_max
                ),
            ));
        }
    }
    Ok(())
}

/// Checks threshold ordering and that every bonus sits within
/// `[base_percentage, max_percentage]`.
pub fn validate_sliding_scale(scale: &SlidingScale) -> EngineResult<()> {
    if scale.base_percentage < MIN_BONUS_PERCENTAGE {
        return Err(EngineError::validation(
            "sliding_scale",
            format!("base_percentage must be at least {}", MIN_BONUS_PERCENTAGE),
        ));
    }
    ensure_fraction("sliding_scale", "max_percentage", scale.max_percentage)?;
    if scale.base_percentage > scale.max_percentage {
        return Err(EngineError::validation(
            "sliding_scale",
            "base_percentage must not exceed max_percentage",
        ));
    }
    for pair in scale.thresholds.windows(2) {
        if pair[0].performance_ratio >= pair[1].performance_ratio {
            return Err(EngineError::validation(
                "sliding_scale",
                format!(
                    "thresholds must be strictly ascending by performance_ratio ({} then {})",
                    pair[0].performance_ratio, pair[1].performance_ratio
                ),
            ));
        }
    }
    for threshold in &scale.thresholds {
        if threshold.bonus_percentage < scale.base_percentage
            || threshold.bonus_percentage > scale.max_percentage
        {
            return Err(EngineError::validation(
                "sliding_scale",
                format!(
                    "bonus_percentage {} at ratio {} is outside [{}, {}]",
                    threshold.bonus_percentage,
                    threshold.performance_ratio,
                    scale.base_percentage,
                    scale.max_percentage
                ),
            ));
        }
    }
    Ok(())
}

/// Checks the labor assumptions.
pub fn validate_labor(labor: &LaborConfig) -> EngineResult<()> {
    if labor.hours_per_day < Decimal::ONE || labor.hours_per_day > Decimal::new(24, 0) {
        return Err(EngineError::validation(
            "labor_config",
            format!("hours_per_day must be within [1, 24], got {}", labor.hours_per_day),
        ));
    }
    if labor.junior_hourly_rate_min < Decimal::ZERO
        || labor.junior_hourly_rate_min > labor.junior_hourly_rate_max
    {
        return Err(EngineError::validation(
            "labor_config",
            "junior hourly rates must satisfy 0 <= min <= max",
        ));
    }
    ensure_amount(
        "labor_config",
        "junior_hourly_rate_max",
        labor.junior_hourly_rate_max,
        MAX_DAILY_AMOUNT,
    )?;
    ensure_fraction("labor_config", "total_labor_percentage", labor.total_labor_percentage)
}

/// Checks `0 < worst_case < base_case < best_case`, each a whole-cent
/// amount of at most [`MAX_REVENUE_TARGET`].
///
/// # Example
///
/// ```
/// use crew_planner::config::{validate_revenue_targets, RevenueTargets};
/// use rust_decimal::Decimal;
///
/// let targets = RevenueTargets {
///     worst_case: Decimal::new(1_500_000, 0),
///     base_case: Decimal::new(1_200_000, 0),
///     best_case: Decimal::new(1_800_000, 0),
/// };
/// assert!(validate_revenue_targets(&targets).is_err());
/// ```
pub fn validate_revenue_targets(targets: &RevenueTargets) -> EngineResult<()> {
    if targets.worst_case <= Decimal::ZERO {
        return Err(EngineError::validation(
            "revenue_targets",
            "worst_case must be positive",
        ));
    }
    if !(targets.worst_case < targets.base_case && targets.base_case < targets.best_case) {
        return Err(EngineError::validation(
            "revenue_targets",
            "worst_case must be less than base_case, which must be less than best_case",
        ));
    }
    for scenario in Scenario::ALL {
        ensure_revenue_target("revenue_targets", targets.target(scenario))?;
    }
    Ok(())
}

/// Checks a single revenue target: positive, whole cents and at most
/// [`MAX_REVENUE_TARGET`].
pub fn ensure_revenue_target(field: &str, value: Decimal) -> EngineResult<()> {
    if value <= Decimal::ZERO {
        return Err(EngineError::validation(
            field,
            format!("revenue target must be positive, got {}", value),
        ));
    }
    ensure_amount(field, "revenue target", value, MAX_REVENUE_TARGET)
}

/// Checks that both cost ratios are fractions.
pub fn validate_financials(financials: &FinancialAssumptions) -> EngineResult<()> {
    ensure_fraction(
        "financials",
        "material_cost_percentage",
        financials.material_cost_percentage,
    )?;
    ensure_fraction(
        "financials",
        "operating_cost_percentage",
        financials.operating_cost_percentage,
    )
}

fn ensure_amount(section: &str, name: &str, value: Decimal, max: Decimal) -> EngineResult<()> {
    if value > max {
        return Err(EngineError::validation(
            section,
            format!("{} must not exceed {}, got {}", name, max, value),
        ));
    }
    if value.round_dp(2) != value {
        return Err(EngineError::validation(
            section,
            format!("{} must be a whole number of cents, got {}", name, value),
        ));
    }
    Ok(())
}

fn ensure_fraction(section: &str, name: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(EngineError::validation(
            section,
            format!("{} must be within [0, 1], got {}", name, value),
        ));
    }
    Ok(())
}
