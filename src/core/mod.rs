//! Core module for the APS engine and its collaborators

pub mod assistant;
pub mod catalog;
pub mod input;
pub mod models;
pub mod report;
pub mod scoring;

/// Returns the current version of the `MatricPulse` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
