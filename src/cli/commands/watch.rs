//! `watch` command
//!
//! Follows one competition's countdown, printing a line per tick and
//! emitting phase events, until it completes or a signal arrives.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use cookoff_core::Phase;
use cookoff_core::phase::TransitionCue;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cli::args::{OutputFormat, WatchArgs};
use crate::clock::{AnchoredClock, Clock, SystemClock};
use crate::error::CookoffError;
use crate::observability::{Event, EventEmitter, init_metrics};
use crate::snapshot::{self, Competition};
use crate::ticker::{PhaseTicker, Tick};

use super::load_config;

#[derive(Serialize)]
struct TickLine<'a> {
    at: chrono::DateTime<chrono::Utc>,
    id: &'a str,
    phase: Phase,
    seconds_remaining: u64,
    remaining: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cue: Option<TransitionCue>,
}

/// Run the countdown for one competition.
///
/// # Errors
///
/// Returns a usage error when the competition cannot be chosen, a
/// config or snapshot error, a metrics error when the endpoint cannot
/// listen, or an I/O error writing output or events.
pub async fn run(
    args: &WatchArgs,
    config_path: Option<&Path>,
    cancel: CancellationToken,
) -> Result<(), CookoffError> {
    let (loader, loaded) = load_config(config_path)?;
    let competitions = snapshot::load_competitions(&args.competitions, loader.limits())?;
    let competition = select_competition(competitions, args.id.as_deref(), &args.competitions)?;

    let clock: Arc<dyn Clock> = match args.now {
        Some(start) => Arc::new(AnchoredClock::new(start)),
        None => Arc::new(SystemClock),
    };
    let interval = args.interval.unwrap_or(loaded.config.clock.tick_interval);
    let emitter = EventEmitter::from_option(args.events_file.as_deref())?;

    if let Some(port) = args.metrics_port {
        init_metrics(Some(port))?;
    }

    tracing::info!(
        competition = %competition.id,
        interval = %humantime::format_duration(interval),
        "watching competition"
    );

    let ticker = PhaseTicker::new(
        competition.id.clone(),
        competition.window,
        Arc::clone(&clock),
        interval,
    )
    .keep_running(args.keep_running)
    .with_cancellation(cancel.child_token());

    let (handle, mut ticks) = ticker.spawn();

    let mut out = std::io::stdout();
    while let Some(tick) = ticks.recv().await {
        report_tick(&competition, &tick, args.format, &emitter, &mut out)?;
    }

    let summary = handle
        .await
        .map_err(|e| CookoffError::Io(std::io::Error::other(e)))?;

    tracing::info!(
        competition = %competition.id,
        reason = summary.reason.as_str(),
        ticks = summary.ticks,
        "watch stopped"
    );
    emitter.emit(Event::WatchStopped {
        timestamp: clock.now(),
        competition: competition.id,
        reason: summary.reason.as_str().to_string(),
        ticks: summary.ticks,
    });
    Ok(())
}

fn select_competition(
    competitions: Vec<Competition>,
    id: Option<&str>,
    path: &Path,
) -> Result<Competition, CookoffError> {
    if let Some(id) = id {
        return Ok(snapshot::find_competition(competitions, id, path)?);
    }

    let count = competitions.len();
    let mut iter = competitions.into_iter();
    match (iter.next(), iter.next()) {
        (Some(only), None) => Ok(only),
        (None, _) => Err(CookoffError::Usage(format!(
            "{} contains no competitions",
            path.display()
        ))),
        (Some(_), Some(_)) => Err(CookoffError::Usage(format!(
            "{} contains {count} competitions; choose one with --id",
            path.display()
        ))),
    }
}

fn report_tick(
    competition: &Competition,
    tick: &Tick,
    format: OutputFormat,
    emitter: &EventEmitter,
    out: &mut impl Write,
) -> Result<(), CookoffError> {
    let cue = tick.transition.and_then(|t| t.cue());

    match format {
        OutputFormat::Human => {
            writeln!(
                out,
                "[{}] {}: {} {}",
                tick.at.format("%Y-%m-%d %H:%M:%S"),
                competition.display_name(),
                tick.status.phase.label(),
                tick.status.formatted()
            )?;
            match cue {
                Some(TransitionCue::OpenVoting) => {
                    writeln!(out, "{}: voting is open", competition.display_name())?;
                }
                Some(TransitionCue::ShowResults) => {
                    writeln!(out, "{}: results are in", competition.display_name())?;
                }
                None => {}
            }
        }
        OutputFormat::Json => {
            let line = TickLine {
                at: tick.at,
                id: &competition.id,
                phase: tick.status.phase,
                seconds_remaining: tick.status.seconds_remaining,
                remaining: tick.status.formatted(),
                cue,
            };
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out)?;
        }
    }

    if let Some(transition) = tick.transition {
        emitter.emit(Event::PhaseEntered {
            timestamp: transition.at,
            competition: competition.id.clone(),
            from: transition.from,
            to: transition.to,
            cue,
        });
        if transition.to.is_terminal() {
            emitter.emit(Event::TimeUp {
                timestamp: transition.at,
                competition: competition.id.clone(),
            });
        }
    }
    Ok(())
}
