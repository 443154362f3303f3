//! Shared state owned by the running service.
//!
//! The [`ConfigStore`] holds the validated planning configuration and the
//! [`InstallerRepository`] holds installer commitments. Both are explicit
//! objects shared through the API state rather than process globals.

mod config_store;
mod installer_store;

pub use config_store::{ConfigStore, ConfigUpdate};
pub use installer_store::{InMemoryInstallerStore, InstallerRepository};
