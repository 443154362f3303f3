//! Installer commitment records.
//!
//! This module defines the [`InstallerRecord`] stored by the installer
//! repository and the [`CommittedDays`] type describing how many (or which)
//! days an installer has signed up for.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{ExperienceLevel, MAX_PLANNING_DAYS};
use crate::error::{EngineError, EngineResult};

/// The days an installer has committed to.
///
/// On the wire this is either a JSON array of ISO dates or a bare day
/// count, e.g. `["2025-10-01", "2025-10-02"]` or `45`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommittedDays {
    /// Explicit calendar dates, ascending and distinct.
    Dates(Vec<NaiveDate>),
    /// A day count with no dates attached.
    Count(u32),
}

impl CommittedDays {
    /// Total number of committed days.
    pub fn total(&self) -> u32 {
        match self {
            CommittedDays::Dates(dates) => u32::try_from(dates.len()).unwrap_or(u32::MAX),
            CommittedDays::Count(count) => *count,
        }
    }

    /// Validates and normalizes the commitment.
    ///
    /// Dates are sorted ascending. A date listed twice is rejected rather
    /// than silently collapsed, as is a commitment longer than
    /// [`MAX_PLANNING_DAYS`].
    pub fn normalized(self) -> EngineResult<Self> {
        if self.total() > MAX_PLANNING_DAYS {
            return Err(EngineError::validation(
                "committed_days",
                format!(
                    "at most {} days can be committed, got {}",
                    MAX_PLANNING_DAYS,
                    self.total()
                ),
            ));
        }
        match self {
            CommittedDays::Dates(dates) => {
                let unique: BTreeSet<NaiveDate> = dates.iter().copied().collect();
                if unique.len() != dates.len() {
                    return Err(EngineError::validation(
                        "committed_days",
                        "committed dates must be distinct",
                    ));
                }
                Ok(CommittedDays::Dates(unique.into_iter().collect()))
            }
            count => Ok(count),
        }
    }
}

impl Default for CommittedDays {
    fn default() -> Self {
        CommittedDays::Dates(Vec::new())
    }
}

/// Whether an installer is still part of the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallerStatus {
    /// Counted in dashboards and lists.
    #[default]
    Active,
    /// Soft-deleted.
    Inactive,
}

/// Input for adding an installer; the repository assigns the id and
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewInstaller {
    /// Display name.
    pub name: String,
    /// Experience tier.
    pub experience_level: ExperienceLevel,
    /// Committed dates or day count; defaults to no dates.
    #[serde(default)]
    pub committed_days: CommittedDays,
}

impl NewInstaller {
    /// Checks required fields and normalizes the committed days.
    pub fn validated(self) -> EngineResult<Self> {
        if self.name.trim().is_empty() {
            return Err(EngineError::validation("name", "must not be empty"));
        }
        Ok(Self {
            name: self.name.trim().to_string(),
            experience_level: self.experience_level,
            committed_days: self.committed_days.normalized()?,
        })
    }
}

/// A stored installer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerRecord {
    /// Unique identifier assigned at creation.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Experience tier.
    pub experience_level: ExperienceLevel,
    /// Committed dates or day count.
    pub committed_days: CommittedDays,
    /// When the record was created.
    pub date_added: DateTime<Utc>,
    /// Active or soft-deleted.
    pub status: InstallerStatus,
}

impl InstallerRecord {
    /// Returns true unless the installer has been soft-deleted.
    pub fn is_active(&self) -> bool {
        self.status == InstallerStatus::Active
    }
}
