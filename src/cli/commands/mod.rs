//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod completions;
pub mod phase;
pub mod rank;
pub mod score;
pub mod version;
pub mod watch;

use std::path::Path;

use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use crate::cli::args::{Cli, Commands};
use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigLoader, LoadResult};
use crate::error::CookoffError;

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// `cancel` is triggered by SIGINT/SIGTERM; long-running commands stop
/// when it fires.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub async fn dispatch(cli: Cli, cancel: CancellationToken) -> Result<(), CookoffError> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Rank(args) => rank::run(&args, config_path),
        Commands::Phase(args) => phase::run(&args, config_path),
        Commands::Watch(args) => watch::run(&args, config_path, cancel).await,
        Commands::Score(args) => score::run(&args, config_path, cancel).await,
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}

/// Loads the configuration (or defaults) and logs any warnings.
fn load_config(path: Option<&Path>) -> Result<(ConfigLoader, LoadResult), CookoffError> {
    if let Some(path) = path {
        tracing::info!(config = %path.display(), "loading configuration");
    }
    let loader = ConfigLoader::default();
    let result = loader.load_or_default(path)?;

    for warning in &result.warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }

    Ok((loader, result))
}

/// `--now` if given, otherwise the wall clock.
fn resolve_now(now: Option<DateTime<Utc>>) -> DateTime<Utc> {
    now.unwrap_or_else(|| SystemClock.now())
}
