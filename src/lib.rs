//! Panel Tilt Advisor
//!
//! Recommends a fixed tilt angle for a solar panel from its site latitude and a
//! photo-based condition assessment, together with an efficiency estimate.

pub mod api;
pub mod classifier;
pub mod config;
pub mod controller;
pub mod domain;
pub mod optimizer;
pub mod telemetry;
