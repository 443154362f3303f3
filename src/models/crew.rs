//! Crew composition model.

use serde::{Deserialize, Serialize};

use super::ExperienceLevel;
use crate::error::{EngineError, EngineResult};

/// Number of crew-leader units at each experience level.
///
/// Missing fields deserialize as zero, so `{"expert_crews": 2}` is a valid
/// composition.
///
/// # Example
///
/// ```
/// use crew_planner::models::{CrewComposition, ExperienceLevel};
///
/// let crews = CrewComposition {
///     expert_crews: 1,
///     advanced_crews: 1,
///     intermediate_crews: 2,
///     beginner_crews: 0,
/// };
/// assert_eq!(crews.total_crews(), 4);
/// assert_eq!(crews.count(ExperienceLevel::Intermediate), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewComposition {
    /// Beginner crew leaders.
    pub beginner_crews: u32,
    /// Intermediate crew leaders.
    pub intermediate_crews: u32,
    /// Advanced crew leaders.
    pub advanced_crews: u32,
    /// Expert crew leaders.
    pub expert_crews: u32,
}

impl CrewComposition {
    /// Most crews accepted at any single level.
    pub const MAX_PER_LEVEL: u32 = 1_000;

    /// Builds a composition from counts listed expert first, matching the
    /// enumeration order of the recommendation search.
    pub fn new(expert: u32, advanced: u32, intermediate: u32, beginner: u32) -> Self {
        Self {
            beginner_crews: beginner,
            intermediate_crews: intermediate,
            advanced_crews: advanced,
            expert_crews: expert,
        }
    }

    /// Returns the crew count for a level.
    pub fn count(&self, level: ExperienceLevel) -> u32 {
        match level {
            ExperienceLevel::Beginner => self.beginner_crews,
            ExperienceLevel::Intermediate => self.intermediate_crews,
            ExperienceLevel::Advanced => self.advanced_crews,
            ExperienceLevel::Expert => self.expert_crews,
        }
    }

    /// Total crews across every level, saturating at `u32::MAX`.
    pub fn total_crews(&self) -> u32 {
        ExperienceLevel::ALL
            .iter()
            .fold(0, |total, level| total.saturating_add(self.count(*level)))
    }

    /// Returns true when no crews are specified.
    pub fn is_empty(&self) -> bool {
        ExperienceLevel::ALL.iter().all(|level| self.count(*level) == 0)
    }

    /// Requires at least one crew and no more than
    /// [`MAX_PER_LEVEL`](Self::MAX_PER_LEVEL) at any level.
    pub fn validate(&self) -> EngineResult<()> {
        for level in ExperienceLevel::ALL {
            if self.count(level) > Self::MAX_PER_LEVEL {
                return Err(EngineError::validation(
                    "composition",
                    format!(
                        "{}_crews must not exceed {}, got {}",
                        level,
                        Self::MAX_PER_LEVEL,
                        self.count(level)
                    ),
                ));
            }
        }
        if self.is_empty() {
            return Err(EngineError::validation(
                "composition",
                "at least one crew is required",
            ));
        }
        Ok(())
    }
}
