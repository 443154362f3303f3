//! Shared, atomically replaced planning configuration.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{
    ExperienceTable, FinancialAssumptions, LaborConfig, PlanningConfig, RevenueTargets,
    SeasonCalendar, SlidingScale, validate_config,
};
use crate::error::EngineResult;

/// A partial configuration update.
///
/// Sections left as `None` keep their current value. The merged result is
/// validated as a whole before it replaces the stored snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigUpdate {
    /// Replacement season calendar.
    pub seasons: Option<SeasonCalendar>,
    /// Replacement rate table.
    pub experience_levels: Option<ExperienceTable>,
    /// Replacement sliding scale.
    pub sliding_scale: Option<SlidingScale>,
    /// Replacement labor assumptions.
    pub labor: Option<LaborConfig>,
    /// Replacement revenue goals.
    pub revenue_targets: Option<RevenueTargets>,
    /// Replacement cost ratios.
    pub financials: Option<FinancialAssumptions>,
}

impl ConfigUpdate {
    fn sections(&self) -> Vec<&'static str> {
        let mut sections = Vec::new();
        if self.seasons.is_some() {
            sections.push("seasons");
        }
        if self.experience_levels.is_some() {
            sections.push("experience_levels");
        }
        if self.sliding_scale.is_some() {
            sections.push("sliding_scale");
        }
        if self.labor.is_some() {
            sections.push("labor");
        }
        if self.revenue_targets.is_some() {
            sections.push("revenue_targets");
        }
        if self.financials.is_some() {
            sections.push("financials");
        }
        sections
    }

    fn merge_into(self, config: &mut PlanningConfig) {
        if let Some(seasons) = self.seasons {
            config.seasons = seasons;
        }
        if let Some(levels) = self.experience_levels {
            config.experience_levels = levels;
        }
        if let Some(scale) = self.sliding_scale {
            config.sliding_scale = scale;
        }
        if let Some(labor) = self.labor {
            config.labor = labor;
        }
        if let Some(targets) = self.revenue_targets {
            config.revenue_targets = targets;
        }
        if let Some(financials) = self.financials {
            config.financials = financials;
        }
    }
}

/// Holds the current [`PlanningConfig`] snapshot.
///
/// Readers clone an `Arc` and calculate against it without holding the
/// lock. Writers build a complete replacement, validate it, and swap it in
/// under the write lock, so a failed update leaves the old snapshot in
/// place and concurrent readers never observe a half-applied change.
///
/// # Example
///
/// ```
/// use crew_planner::config::RevenueTargets;
/// use crew_planner::store::ConfigStore;
/// use rust_decimal::Decimal;
///
/// let store = ConfigStore::default();
/// let rejected = store.update_revenue_targets(RevenueTargets {
///     worst_case: Decimal::new(1_500_000, 0),
///     base_case: Decimal::new(1_200_000, 0),
///     best_case: Decimal::new(1_800_000, 0),
/// });
/// assert!(rejected.is_err());
/// assert_eq!(store.snapshot().revenue_targets.base_case, Decimal::new(1_500_000, 0));
/// ```
#[derive(Debug)]
pub struct ConfigStore {
    current: RwLock<Arc<PlanningConfig>>,
}

impl ConfigStore {
    /// Creates a store after validating the initial configuration.
    pub fn new(config: PlanningConfig) -> EngineResult<Self> {
        validate_config(&config)?;
        Ok(Self {
            current: RwLock::new(Arc::new(config)),
        })
    }

    /// Returns the current configuration snapshot.
    pub fn snapshot(&self) -> Arc<PlanningConfig> {
        let guard = self.current.read().unwrap_or_else(|poisoned| {
            warn!("Configuration read lock was poisoned, recovering");
            poisoned.into_inner()
        });
        Arc::clone(&guard)
    }

    /// Current season calendar.
    pub fn seasons(&self) -> SeasonCalendar {
        self.snapshot().seasons.clone()
    }

    /// Current rate table.
    pub fn experience_levels(&self) -> ExperienceTable {
        self.snapshot().experience_levels.clone()
    }

    /// Current sliding scale.
    pub fn sliding_scale(&self) -> SlidingScale {
        self.snapshot().sliding_scale.clone()
    }

    /// Current labor assumptions.
    pub fn labor_config(&self) -> LaborConfig {
        self.snapshot().labor.clone()
    }

    /// Current revenue goals.
    pub fn revenue_targets(&self) -> RevenueTargets {
        self.snapshot().revenue_targets.clone()
    }

    /// Replaces the season calendar.
    pub fn update_seasons(&self, seasons: SeasonCalendar) -> EngineResult<Arc<PlanningConfig>> {
        self.apply(ConfigUpdate {
            seasons: Some(seasons),
            ..ConfigUpdate::default()
        })
    }

    /// Replaces the rate table.
    pub fn update_experience_levels(
        &self,
        levels: ExperienceTable,
    ) -> EngineResult<Arc<PlanningConfig>> {
        self.apply(ConfigUpdate {
            experience_levels: Some(levels),
            ..ConfigUpdate::default()
        })
    }

    /// Replaces the sliding scale.
    pub fn update_sliding_scale(&self, scale: SlidingScale) -> EngineResult<Arc<PlanningConfig>> {
        self.apply(ConfigUpdate {
            sliding_scale: Some(scale),
            ..ConfigUpdate::default()
        })
    }

    /// Replaces the labor assumptions.
    pub fn update_labor_config(&self, labor: LaborConfig) -> EngineResult<Arc<PlanningConfig>> {
        self.apply(ConfigUpdate {
            labor: Some(labor),
            ..ConfigUpdate::default()
        })
    }

    /// Replaces the revenue goals.
    pub fn update_revenue_targets(
        &self,
        targets: RevenueTargets,
    ) -> EngineResult<Arc<PlanningConfig>> {
        self.apply(ConfigUpdate {
            revenue_targets: Some(targets),
            ..ConfigUpdate::default()
        })
    }

    /// Replaces the financial cost ratios.
    pub fn update_financials(
        &self,
        financials: FinancialAssumptions,
    ) -> EngineResult<Arc<PlanningConfig>> {
        self.apply(ConfigUpdate {
            financials: Some(financials),
            ..ConfigUpdate::default()
        })
    }

    /// Merges `update` into the current configuration and swaps in the
    /// result if every section validates.
    pub fn apply(&self, update: ConfigUpdate) -> EngineResult<Arc<PlanningConfig>> {
        let sections = update.sections();
        let mut guard = self.write_guard();

        let mut next = PlanningConfig::clone(&guard);
        update.merge_into(&mut next);

        if let Err(error) = validate_config(&next) {
            warn!(sections = ?sections, error = %error, "Rejected configuration update");
            return Err(error);
        }

        let next = Arc::new(next);
        *guard = Arc::clone(&next);
        info!(sections = ?sections, "Configuration updated");
        Ok(next)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, Arc<PlanningConfig>> {
        self.current.write().unwrap_or_else(|poisoned| {
            warn!("Configuration write lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self {
            current: RwLock::new(Arc::new(PlanningConfig::default())),
        }
    }
}
