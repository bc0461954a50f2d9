//! Shared library for `MatricPulse`
//! Contains the APS scoring engine and the pieces the CLI builds on

pub mod logger;

pub mod config;
pub mod core;

pub use crate::core::get_version;
