//! Configuration schema shared by every `Cookoff` front end.

pub mod schema;

pub use schema::{ClockConfig, CookoffConfig, RankingConfig};
