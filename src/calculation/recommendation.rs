//! Crew composition search.
//!
//! Walks every composition inside a set of bounds and ranks them by how
//! closely their seasonal revenue matches a target.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{PlanningConfig, ensure_revenue_target};
use crate::error::{EngineError, EngineResult};
use crate::models::{CrewComposition, Scenario};

use super::capacity::{CapacityResult, capacity, percentage_of, ratio_or_zero};

/// Largest per-level count a search may request.
pub const MAX_CREWS_PER_LEVEL: u32 = 20;

/// Limits on the compositions a search walks and how many it returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBounds {
    /// Highest crew count tried at each level.
    pub max_per_level: u32,
    /// Fewest crews in a composition.
    pub min_total_crews: u32,
    /// Most crews in a composition.
    pub max_total_crews: u32,
    /// How many ranked results to return.
    pub top_n: usize,
}

impl Default for SearchBounds {
    fn default() -> Self {
        Self {
            max_per_level: 5,
            min_total_crews: 1,
            max_total_crews: 10,
            top_n: 5,
        }
    }
}

impl SearchBounds {
    /// Checks the bounds describe a non-empty, tractable search.
    pub fn validate(&self) -> EngineResult<()> {
        if self.min_total_crews == 0 {
            return Err(EngineError::validation(
                "search_bounds",
                "min_total_crews must be at least 1",
            ));
        }
        if self.min_total_crews > self.max_total_crews {
            return Err(EngineError::validation(
                "search_bounds",
                "min_total_crews must not exceed max_total_crews",
            ));
        }
        if self.max_per_level > MAX_CREWS_PER_LEVEL {
            return Err(EngineError::validation(
                "search_bounds",
                format!("max_per_level must not exceed {}", MAX_CREWS_PER_LEVEL),
            ));
        }
        if self.top_n == 0 {
            return Err(EngineError::validation(
                "search_bounds",
                "top_n must be at least 1",
            ));
        }
        Ok(())
    }

    /// Every composition inside the bounds.
    ///
    /// Expert counts vary slowest and beginner counts fastest, so the
    /// returned order is stable and repeatable.
    pub fn compositions(&self) -> Vec<CrewComposition> {
        let range = 0..=self.max_per_level;
        let mut compositions = Vec::new();
        for expert in range.clone() {
            for advanced in range.clone() {
                for intermediate in range.clone() {
                    for beginner in range.clone() {
                        let crews = CrewComposition::new(expert, advanced, intermediate, beginner);
                        let total = crews.total_crews();
                        if total >= self.min_total_crews && total <= self.max_total_crews {
                            compositions.push(crews);
                        }
                    }
                }
            }
        }
        compositions
    }
}

/// A ranked composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewRecommendation {
    /// Position in the ranking, starting at 1.
    pub rank: usize,
    /// The composition.
    pub composition: CrewComposition,
    /// Full capacity breakdown.
    pub capacity: CapacityResult,
    /// Absolute difference between seasonal revenue and the target.
    pub revenue_gap: Decimal,
    /// Gap as a percentage of the target.
    pub revenue_gap_pct: Decimal,
    /// Seasonal revenue per dollar of labor.
    pub efficiency_score: Decimal,
}

/// Finds the compositions whose seasonal revenue lands closest to
/// `target_revenue`.
///
/// Results are ordered by revenue gap, then by fewer crews; remaining ties
/// keep enumeration order.
///
/// # Errors
///
/// Returns a validation error if `target_revenue` is not a valid revenue
/// target or the bounds are invalid.
///
/// # Example
///
/// ```
/// use crew_planner::calculation::{recommend_crews, SearchBounds};
/// use crew_planner::config::PlanningConfig;
/// use crew_planner::models::Scenario;
/// use rust_decimal::Decimal;
///
/// let config = PlanningConfig::default();
/// let target = Decimal::new(1_500_000, 0);
/// let ranked = recommend_crews(target, Scenario::BaseCase, &SearchBounds::default(), &config).unwrap();
///
/// assert_eq!(ranked.len(), 5);
/// assert!(ranked[0].revenue_gap_pct <= ranked[1].revenue_gap_pct);
/// ```
pub fn recommend_crews(
    target_revenue: Decimal,
    scenario: Scenario,
    bounds: &SearchBounds,
    config: &PlanningConfig,
) -> EngineResult<Vec<CrewRecommendation>> {
    ensure_revenue_target("target_revenue", target_revenue)?;
    bounds.validate()?;

    let mut candidates = bounds
        .compositions()
        .into_iter()
        .map(|composition| {
            let capacity = capacity(&composition, scenario, config)?;
            let revenue_gap = (capacity.total_seasonal_revenue - target_revenue).abs();
            Ok(CrewRecommendation {
                rank: 0,
                composition,
                revenue_gap,
                revenue_gap_pct: percentage_of(revenue_gap, target_revenue),
                efficiency_score: ratio_or_zero(
                    capacity.total_seasonal_revenue,
                    capacity.total_labor_cost,
                ),
                capacity,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    candidates.sort_by(|a, b| {
        a.revenue_gap_pct
            .cmp(&b.revenue_gap_pct)
            .then(a.capacity.total_crews.cmp(&b.capacity.total_crews))
    });
    candidates.truncate(bounds.top_n);
    for (index, candidate) in candidates.iter_mut().enumerate() {
        candidate.rank = index + 1;
    }

    tracing::debug!(
        target = %target_revenue,
        scenario = %scenario,
        returned = candidates.len(),
        "Ranked crew compositions"
    );

    Ok(candidates)
}
