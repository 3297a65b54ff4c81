//! `Cookoff` Core: trending scores and competition phases
//!
//! Pure, synchronous computations shared by the client feed and the
//! periodic scoring job. Nothing in this crate reads the wall clock:
//! every operation takes `now` explicitly.

pub mod config;
pub mod error;
pub mod format;
pub mod phase;
pub mod ranking;

pub use error::ValidationError;
pub use format::format_remaining;
pub use phase::{
    CompetitionWindow, Phase, PhaseStatus, PhaseTracker, PhaseTransition, WindowShape,
    derive_phase,
};
pub use ranking::{ContentItem, RankingEngine, ScoredItem, TrendingWeights};

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
