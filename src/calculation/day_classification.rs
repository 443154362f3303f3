//! Day classification and season working-day counts.
//!
//! This module maps committed calendar dates onto the configured season
//! phases, splits bare day counts across phases, and derives the number of
//! working days in each configured season.

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{SeasonCalendar, SeasonDefinition};
use crate::models::{CommittedDays, PhaseBreakdown, SeasonKey};

/// Returns the season whose inclusive date range contains `date`.
///
/// Dates outside every season are unclassified and return `None`.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::classify_date;
/// use crew_planner::config::SeasonCalendar;
/// use crew_planner::models::SeasonKey;
/// use chrono::NaiveDate;
///
/// let seasons = SeasonCalendar::default();
///
/// // First day of the in-season range
/// let date = NaiveDate::from_ymd_opt(2025, 9, 29).unwrap();
/// assert_eq!(classify_date(date, &seasons), Some(SeasonKey::InSeason));
///
/// // Before the planning year starts
/// let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// assert_eq!(classify_date(date, &seasons), None);
/// ```
pub fn classify_date(date: NaiveDate, seasons: &SeasonCalendar) -> Option<SeasonKey> {
    seasons
        .iter()
        .find(|(_, season)| season.contains(date))
        .map(|(key, _)| key)
}

/// Counts committed dates per season.
///
/// Dates that fall outside every season are counted as unclassified.
pub fn phase_breakdown_from_dates(dates: &[NaiveDate], seasons: &SeasonCalendar) -> PhaseBreakdown {
    let mut phases = PhaseBreakdown::default();
    for date in dates {
        phases.record(classify_date(*date, seasons));
    }
    phases
}

/// Splits a bare day count across the season phases.
///
/// Pre-season gets 10%, in-season 60% and post-season 20%, each rounded
/// half away from zero on its own. Off-season takes whatever remains so the
/// four counts always sum to `total`.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::proportional_split;
///
/// let phases = proportional_split(10);
/// assert_eq!(phases.pre_season, 1);
/// assert_eq!(phases.in_season, 6);
/// assert_eq!(phases.post_season, 2);
/// assert_eq!(phases.off_season, 1);
/// ```
pub fn proportional_split(total: u32) -> PhaseBreakdown {
    let share = |percent: i64| -> u32 {
        (Decimal::from(total) * Decimal::new(percent, 2))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0)
    };

    let pre_season = share(10);
    let in_season = share(60);
    let post_season = share(20);
    // Rounding never pushes the three shares past the total
    let off_season = total.saturating_sub(
        pre_season
            .saturating_add(in_season)
            .saturating_add(post_season),
    );

    PhaseBreakdown {
        pre_season,
        in_season,
        post_season,
        off_season,
        unclassified: 0,
    }
}

/// Working days in one season: whole weeks covered (fractional) times the
/// working days per week, rounded down.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::season_working_days;
/// use crew_planner::config::SeasonCalendar;
///
/// let seasons = SeasonCalendar::default();
/// // 70 calendar days at 6 days a week
/// assert_eq!(season_working_days(&seasons.in_season), 60);
/// ```
pub fn season_working_days(season: &SeasonDefinition) -> u32 {
    let calendar_days = Decimal::from(season.calendar_days().max(0));
    (calendar_days * season.working_days_per_week / Decimal::new(7, 0))
        .floor()
        .to_u32()
        .unwrap_or(0)
}

/// Working days per season for the whole configured year.
pub fn season_calendar(seasons: &SeasonCalendar) -> PhaseBreakdown {
    PhaseBreakdown {
        pre_season: season_working_days(&seasons.pre_season),
        in_season: season_working_days(&seasons.in_season),
        post_season: season_working_days(&seasons.post_season),
        off_season: season_working_days(&seasons.off_season),
        unclassified: 0,
    }
}

/// Phase breakdown for an installer's commitment.
///
/// Explicit dates are classified against the seasons; a bare count is
/// split proportionally.
pub fn phases_for(committed: &CommittedDays, seasons: &SeasonCalendar) -> PhaseBreakdown {
    match committed {
        CommittedDays::Dates(dates) => phase_breakdown_from_dates(dates, seasons),
        CommittedDays::Count(count) => proportional_split(*count),
    }
}
