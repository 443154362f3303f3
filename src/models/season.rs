//! Season phases and per-phase day counts.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest commitment or season calendar accepted: one planning year.
pub const MAX_PLANNING_DAYS: u32 = 366;

/// One of the four phases of the installation year.
///
/// Ordering follows the calendar: pre-season, in-season, post-season,
/// off-season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonKey {
    /// Preparation and training ahead of the production window.
    PreSeason,
    /// The production window; the only phase that earns production revenue.
    InSeason,
    /// Removal work after the production window.
    PostSeason,
    /// Remainder of the year.
    OffSeason,
}

impl SeasonKey {
    /// All phases in chronological order.
    pub const ALL: [SeasonKey; 4] = [
        SeasonKey::PreSeason,
        SeasonKey::InSeason,
        SeasonKey::PostSeason,
        SeasonKey::OffSeason,
    ];

    /// The snake_case key used on the wire.
    pub fn key(self) -> &'static str {
        match self {
            SeasonKey::PreSeason => "pre_season",
            SeasonKey::InSeason => "in_season",
            SeasonKey::PostSeason => "post_season",
            SeasonKey::OffSeason => "off_season",
        }
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Number of days falling into each season phase.
///
/// `unclassified` holds committed dates outside every configured season.
/// They feed no phase bucket but still count towards [`total_days`], since
/// the per-diem is guaranteed for every committed day.
///
/// [`total_days`]: PhaseBreakdown::total_days
///
/// # Example
///
/// ```
/// use crew_planner::models::PhaseBreakdown;
///
/// let phases = PhaseBreakdown {
///     pre_season: 2,
///     in_season: 12,
///     post_season: 6,
///     off_season: 0,
///     unclassified: 0,
/// };
/// assert_eq!(phases.total_days(), 20);
/// assert_eq!(phases.production_days(), 18);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseBreakdown {
    /// Days in the pre-season.
    pub pre_season: u32,
    /// Days in the in-season.
    pub in_season: u32,
    /// Days in the post-season.
    pub post_season: u32,
    /// Days in the off-season.
    pub off_season: u32,
    /// Days outside every configured season.
    #[serde(default)]
    pub unclassified: u32,
}

impl PhaseBreakdown {
    /// Returns the day count for a phase.
    pub fn days_in(&self, season: SeasonKey) -> u32 {
        match season {
            SeasonKey::PreSeason => self.pre_season,
            SeasonKey::InSeason => self.in_season,
            SeasonKey::PostSeason => self.post_season,
            SeasonKey::OffSeason => self.off_season,
        }
    }

    /// Adds one day to the bucket of `season`, or to `unclassified`.
    pub fn record(&mut self, season: Option<SeasonKey>) {
        let bucket = match season {
            Some(SeasonKey::PreSeason) => &mut self.pre_season,
            Some(SeasonKey::InSeason) => &mut self.in_season,
            Some(SeasonKey::PostSeason) => &mut self.post_season,
            Some(SeasonKey::OffSeason) => &mut self.off_season,
            None => &mut self.unclassified,
        };
        *bucket = bucket.saturating_add(1);
    }

    fn buckets(&self) -> [u32; 5] {
        [
            self.pre_season,
            self.in_season,
            self.post_season,
            self.off_season,
            self.unclassified,
        ]
    }

    /// All committed days, classified or not.
    ///
    /// Saturates at `u32::MAX`; [`validate`](Self::validate) rejects
    /// breakdowns that large.
    pub fn total_days(&self) -> u32 {
        self.buckets().into_iter().fold(0, u32::saturating_add)
    }

    /// Days whose per-diem is offset against the production bonus
    /// (in-season plus post-season removal work).
    pub fn production_days(&self) -> u32 {
        self.in_season.saturating_add(self.post_season)
    }

    /// Rejects breakdowns totalling more than [`MAX_PLANNING_DAYS`].
    pub fn validate(&self) -> EngineResult<()> {
        let total = self
            .buckets()
            .into_iter()
            .try_fold(0u32, |sum, days| sum.checked_add(days));
        match total {
            Some(total) if total <= MAX_PLANNING_DAYS => Ok(()),
            _ => Err(EngineError::validation(
                "phases",
                format!("committed days must not exceed {} in total", MAX_PLANNING_DAYS),
            )),
        }
    }
}
