//! Core data models for the crew planning engine.
//!
//! This module contains the domain models used throughout the engine.

mod audit;
mod crew;
mod experience;
mod installer;
mod season;

pub use audit::{AuditStep, AuditTrace};
pub use crew::CrewComposition;
pub use experience::{ExperienceLevel, Scenario};
pub use installer::{CommittedDays, InstallerRecord, InstallerStatus, NewInstaller};
pub use season::{MAX_PLANNING_DAYS, PhaseBreakdown, SeasonKey};
