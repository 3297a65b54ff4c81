//! `Cookoff` - trending feed ranking and cook-off phase clock
//!
//! Command-line front end over `cookoff-core`: snapshot loading,
//! configuration, the countdown ticker and observability.

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod observability;
pub mod snapshot;
pub mod ticker;
