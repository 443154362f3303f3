//! Seasonal crew planning engine.
//!
//! This crate models a seasonal installation business: crew leaders are paid
//! a guaranteed per-diem that acts as an advance against a sliding-scale
//! production bonus, and the planner answers what a leader earns, how much
//! revenue a crew mix produces, which mixes hit a revenue target and where
//! each experience level breaks even.
//!
//! - [`calculation`] holds the pure planning math
//! - [`config`] loads and validates the YAML configuration
//! - [`store`] keeps the live configuration and installer commitments
//! - [`api`] exposes everything over HTTP

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
