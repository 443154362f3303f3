//! Committed revenue against the season target.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::config::{PlanningConfig, ensure_revenue_target};
use crate::error::{EngineError, EngineResult};
use crate::models::{ExperienceLevel, InstallerRecord, Scenario};

use super::capacity::{percentage_of, ratio_or_zero};
use super::compensation::{CompensationInput, calculate_compensation};
use super::day_classification::{phases_for, season_working_days};

/// Commitments and hiring gap at one experience level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCommitment {
    /// Installer tier.
    pub experience_level: ExperienceLevel,
    /// Active installers at this tier.
    pub active_installers: u32,
    /// Days committed by those installers.
    pub committed_days: u32,
    /// In-season revenue from those commitments.
    pub committed_revenue: Decimal,
    /// Revenue one full-season installer at this tier would add.
    pub full_season_revenue: Decimal,
    /// Full-season installers at this tier needed to close the gap alone.
    pub additional_installers_needed: u32,
}

/// What one active installer contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerCommitment {
    /// Installer id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Installer tier.
    pub experience_level: ExperienceLevel,
    /// Days committed, every season included.
    pub committed_days: u32,
    /// Committed days that fall in-season.
    pub in_season_days: u32,
    /// In-season revenue from the commitment.
    pub committed_revenue: Decimal,
    /// Per-diem plus net bonus for the commitment.
    pub total_compensation: Decimal,
}

/// Revenue committed by active installers against the scenario target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueDashboard {
    /// Revenue scenario.
    pub scenario: Scenario,
    /// Season goal for the scenario, or the requested override.
    pub target_revenue: Decimal,
    /// In-season revenue committed by active installers.
    pub committed_revenue: Decimal,
    /// Target minus committed; negative once the target is exceeded.
    pub remaining_revenue: Decimal,
    /// Committed as a percentage of target.
    pub percentage_committed: Decimal,
    /// Working days in the in-season phase.
    pub in_season_days: u32,
    /// Count of active installers.
    pub active_installers: u32,
    /// Per-tier figures, lowest tier first.
    pub levels: Vec<LevelCommitment>,
    /// Per-installer figures in the order given.
    pub installers: Vec<InstallerCommitment>,
}

fn overflow(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} overflowed while aggregating commitments", what),
    }
}

/// Summarizes how much of the revenue target active installers cover.
///
/// Soft-deleted installers are ignored. The target is the configured goal
/// for `scenario` unless `target_override` is given. The hiring gap per
/// tier is the number of full-season installers of that tier alone that
/// would cover the remaining revenue, rounded down.
///
/// # Errors
///
/// Returns a validation error for an override that is not a valid revenue
/// target or for an installer whose commitment is out of range, and a
/// calculation error if the totals overflow.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::revenue_dashboard;
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::Scenario;
/// use rust_decimal::Decimal;
///
/// let dashboard =
///     revenue_dashboard(&[], Scenario::BaseCase, None, &PlanningConfig::default()).unwrap();
/// assert_eq!(dashboard.committed_revenue, Decimal::ZERO);
/// assert_eq!(dashboard.remaining_revenue, Decimal::new(1_500_000, 0));
/// ```
pub fn revenue_dashboard(
    installers: &[InstallerRecord],
    scenario: Scenario,
    target_override: Option<Decimal>,
    config: &PlanningConfig,
) -> EngineResult<RevenueDashboard> {
    let target_revenue = match target_override {
        Some(target) => {
            ensure_revenue_target("target_revenue", target)?;
            target
        }
        None => config.revenue_targets.target(scenario),
    };
    let in_season_days = season_working_days(&config.seasons.in_season);

    let mut levels: Vec<LevelCommitment> = ExperienceLevel::ALL
        .into_iter()
        .map(|level| LevelCommitment {
            experience_level: level,
            active_installers: 0,
            committed_days: 0,
            committed_revenue: Decimal::ZERO,
            full_season_revenue: config.experience_levels.get(level).daily_revenue(scenario)
                * Decimal::from(in_season_days),
            additional_installers_needed: 0,
        })
        .collect();
    let mut breakdown = Vec::new();
    let mut active_installers: u32 = 0;
    let mut committed_revenue = Decimal::ZERO;

    for installer in installers.iter().filter(|i| i.is_active()) {
        let committed_days = installer.committed_days.total();
        let phases = phases_for(&installer.committed_days, &config.seasons);
        let result = calculate_compensation(
            &CompensationInput::new(installer.experience_level, phases, scenario),
            config,
        )?;

        if let Some(entry) = levels
            .iter_mut()
            .find(|l| l.experience_level == installer.experience_level)
        {
            entry.active_installers = entry
                .active_installers
                .checked_add(1)
                .ok_or_else(|| overflow("installer count"))?;
            entry.committed_days = entry
                .committed_days
                .checked_add(committed_days)
                .ok_or_else(|| overflow("committed days"))?;
            entry.committed_revenue = entry
                .committed_revenue
                .checked_add(result.in_season_revenue)
                .ok_or_else(|| overflow("committed revenue"))?;
        }
        active_installers = active_installers
            .checked_add(1)
            .ok_or_else(|| overflow("installer count"))?;
        committed_revenue = committed_revenue
            .checked_add(result.in_season_revenue)
            .ok_or_else(|| overflow("committed revenue"))?;

        breakdown.push(InstallerCommitment {
            id: installer.id,
            name: installer.name.clone(),
            experience_level: installer.experience_level,
            committed_days,
            in_season_days: phases.in_season,
            committed_revenue: result.in_season_revenue,
            total_compensation: result.total_compensation,
        });
    }

    let remaining_revenue = target_revenue
        .checked_sub(committed_revenue)
        .ok_or_else(|| overflow("remaining revenue"))?;
    let outstanding = remaining_revenue.max(Decimal::ZERO);

    for entry in &mut levels {
        entry.additional_installers_needed = ratio_or_zero(outstanding, entry.full_season_revenue)
            .floor()
            .to_u32()
            .unwrap_or(u32::MAX);
    }

    Ok(RevenueDashboard {
        scenario,
        target_revenue,
        committed_revenue,
        remaining_revenue,
        percentage_committed: percentage_of(committed_revenue, target_revenue),
        in_season_days,
        active_installers,
        levels,
        installers: breakdown,
    })
}

/// Remaining capacity for several targets at once.
///
/// Each entry of `targets` is evaluated as a [`revenue_dashboard`] with
/// that target as the override. An empty map evaluates every scenario
/// against its configured goal.
pub fn capacity_analysis(
    installers: &[InstallerRecord],
    targets: &BTreeMap<Scenario, Decimal>,
    config: &PlanningConfig,
) -> EngineResult<BTreeMap<Scenario, RevenueDashboard>> {
    let targets: BTreeMap<Scenario, Decimal> = if targets.is_empty() {
        Scenario::ALL
            .into_iter()
            .map(|scenario| (scenario, config.revenue_targets.target(scenario)))
            .collect()
    } else {
        targets.clone()
    };

    targets
        .into_iter()
        .map(|(scenario, target)| {
            revenue_dashboard(installers, scenario, Some(target), config)
                .map(|dashboard| (scenario, dashboard))
        })
        .collect()
}
