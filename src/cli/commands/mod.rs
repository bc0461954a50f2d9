//! CLI command handlers for `MatricPulse`.
//!
//! Each command is implemented in its own submodule.

pub mod catalog;
pub mod config;
pub mod score;
