//! Installer commitment storage.

use std::collections::BTreeMap;
use std::sync::RwLock;

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{ExperienceLevel, InstallerRecord, InstallerStatus, NewInstaller};

/// Storage abstraction for installer records so handlers and the revenue
/// dashboard can run against any backend.
pub trait InstallerRepository: Send + Sync {
    /// Active installers in id order.
    fn list(&self) -> EngineResult<Vec<InstallerRecord>>;

    /// Active installers at one experience level, in id order.
    fn list_by_level(&self, level: ExperienceLevel) -> EngineResult<Vec<InstallerRecord>>;

    /// Any stored installer, including soft-deleted ones.
    fn get(&self, id: u64) -> EngineResult<InstallerRecord>;

    /// Validates and stores a new installer under a fresh id.
    fn add(&self, installer: NewInstaller) -> EngineResult<InstallerRecord>;

    /// Soft-deletes (marks inactive) or, when `permanent`, erases a record.
    /// Returns the record as it was left (or as it was before erasure).
    fn remove(&self, id: u64, permanent: bool) -> EngineResult<InstallerRecord>;
}

#[derive(Debug, Default)]
struct Records {
    by_id: BTreeMap<u64, InstallerRecord>,
    last_id: u64,
}

/// In-memory [`InstallerRepository`].
///
/// Ids start at 1 and are never reused, even after a permanent delete.
#[derive(Debug, Default)]
pub struct InMemoryInstallerStore {
    records: RwLock<Records>,
}

impl InMemoryInstallerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&Records) -> T) -> T {
        let guard = self.records.read().unwrap_or_else(|poisoned| {
            warn!("Installer store read lock was poisoned, recovering");
            poisoned.into_inner()
        });
        f(&guard)
    }

    fn write<T>(&self, f: impl FnOnce(&mut Records) -> T) -> T {
        let mut guard = self.records.write().unwrap_or_else(|poisoned| {
            warn!("Installer store write lock was poisoned, recovering");
            poisoned.into_inner()
        });
        f(&mut guard)
    }
}

impl InstallerRepository for InMemoryInstallerStore {
    fn list(&self) -> EngineResult<Vec<InstallerRecord>> {
        Ok(self.read(|records| {
            records
                .by_id
                .values()
                .filter(|record| record.is_active())
                .cloned()
                .collect()
        }))
    }

    fn list_by_level(&self, level: ExperienceLevel) -> EngineResult<Vec<InstallerRecord>> {
        Ok(self.read(|records| {
            records
                .by_id
                .values()
                .filter(|record| record.is_active() && record.experience_level == level)
                .cloned()
                .collect()
        }))
    }

    fn get(&self, id: u64) -> EngineResult<InstallerRecord> {
        self.read(|records| records.by_id.get(&id).cloned())
            .ok_or(EngineError::InstallerNotFound { id })
    }

    fn add(&self, installer: NewInstaller) -> EngineResult<InstallerRecord> {
        let installer = installer.validated()?;

        let record = self.write(|records| {
            records.last_id += 1;
            let record = InstallerRecord {
                id: records.last_id,
                name: installer.name,
                experience_level: installer.experience_level,
                committed_days: installer.committed_days,
                date_added: Utc::now(),
                status: InstallerStatus::Active,
            };
            records.by_id.insert(record.id, record.clone());
            record
        });

        info!(
            installer_id = record.id,
            experience_level = %record.experience_level,
            committed_days = record.committed_days.total(),
            "Installer added"
        );
        Ok(record)
    }

    fn remove(&self, id: u64, permanent: bool) -> EngineResult<InstallerRecord> {
        let removed = self.write(|records| {
            if permanent {
                records.by_id.remove(&id)
            } else {
                records.by_id.get_mut(&id).map(|record| {
                    record.status = InstallerStatus::Inactive;
                    record.clone()
                })
            }
        });

        match removed {
            Some(record) => {
                info!(installer_id = id, permanent, "Installer removed");
                Ok(record)
            }
            None => {
                warn!(installer_id = id, "Installer not found for removal");
                Err(EngineError::InstallerNotFound { id })
            }
        }
    }
}
