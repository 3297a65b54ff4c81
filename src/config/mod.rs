//! Configuration module
//!
//! Loads the YAML configuration file into the shared schema from
//! `cookoff-core`, applying environment overrides and limits.

pub mod loader;

pub use cookoff_core::config::{ClockConfig, CookoffConfig, RankingConfig};
pub use loader::{ConfigLimits, ConfigLoader, LoadResult, LoadWarning};
