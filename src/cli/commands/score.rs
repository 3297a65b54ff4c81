//! `score` command
//!
//! Server-side scoring job: computes `{id, trending_score}` rows with the
//! same engine the feed uses, once or on a fixed period.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use cookoff_core::{ContentItem, RankingEngine};
use serde::Serialize;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::cli::args::ScoreArgs;
use crate::clock::{Clock, SystemClock};
use crate::config::ConfigLimits;
use crate::error::CookoffError;
use crate::observability::{Event, EventEmitter, init_metrics, metrics};
use crate::snapshot;

use super::{load_config, resolve_now};

/// Row written for each item.
#[derive(Debug, Serialize, PartialEq)]
pub struct ScoreRow {
    /// Item id.
    pub id: String,
    /// Score at the run instant.
    pub trending_score: f64,
}

/// Scores every item in input order.
#[must_use]
pub fn score_rows(engine: &RankingEngine, items: &[ContentItem], now: DateTime<Utc>) -> Vec<ScoreRow> {
    items
        .iter()
        .map(|item| ScoreRow {
            id: item.id.clone(),
            trending_score: engine.score(item, now),
        })
        .collect()
}

struct Job<'a> {
    engine: RankingEngine,
    items: &'a Path,
    output: Option<&'a Path>,
    limits: &'a ConfigLimits,
    emitter: EventEmitter,
}

impl Job<'_> {
    fn run_once(&self, now: DateTime<Utc>) -> Result<usize, CookoffError> {
        let items = snapshot::load_items(self.items, self.limits)?;

        let started = Instant::now();
        let rows = score_rows(&self.engine, &items, now);
        metrics::record_ranking(rows.len(), started.elapsed());

        let destination = match self.output {
            Some(path) => {
                write_rows_to_file(path, &rows)?;
                path.display().to_string()
            }
            None => {
                let mut out = std::io::stdout().lock();
                serde_json::to_writer_pretty(&mut out, &rows)?;
                writeln!(out)?;
                "-".to_string()
            }
        };

        tracing::info!(rows = rows.len(), destination = %destination, now = %now, "scores written");
        self.emitter.emit(Event::ScoresWritten {
            timestamp: now,
            rows: rows.len(),
            destination,
        });
        Ok(rows.len())
    }
}

/// Run the scoring job.
///
/// # Errors
///
/// A single run fails on config, snapshot or I/O errors. A periodic run
/// only fails on setup; errors inside a period are logged and the next
/// period proceeds.
pub async fn run(
    args: &ScoreArgs,
    config_path: Option<&Path>,
    cancel: CancellationToken,
) -> Result<(), CookoffError> {
    let (loader, loaded) = load_config(config_path)?;

    if let Some(port) = args.metrics_port {
        init_metrics(Some(port))?;
    }

    let job = Job {
        engine: RankingEngine::with_weights(loaded.config.ranking.weights.clone())?,
        items: &args.items,
        output: args.output.as_deref(),
        limits: loader.limits(),
        emitter: EventEmitter::from_option(args.events_file.as_deref())?,
    };

    let Some(every) = args.every else {
        job.run_once(resolve_now(args.now))?;
        return Ok(());
    };

    if every.is_zero() {
        return Err(CookoffError::Usage("--every must be greater than zero".to_string()));
    }

    tracing::info!(every = %humantime::format_duration(every), "starting periodic scoring");
    run_periodic(&job, every, &SystemClock, &cancel).await;
    Ok(())
}

async fn run_periodic(job: &Job<'_>, every: Duration, clock: &dyn Clock, cancel: &CancellationToken) {
    let mut interval = tokio::time::interval(every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                tracing::debug!("scoring job cancelled");
                break;
            }
            _ = interval.tick() => {
                if let Err(err) = job.run_once(clock.now()) {
                    tracing::error!(error = %err, "scoring run failed");
                }
            }
        }
    }
}

fn write_rows_to_file(path: &Path, rows: &[ScoreRow]) -> Result<(), CookoffError> {
    // Write beside the target and rename so readers never see a partial file.
    let tmp = temp_path(path);
    let written = write_and_rename(&tmp, path, rows);
    if written.is_err() {
        let _ = std::fs::remove_file(&tmp);
    }
    written
}

fn write_and_rename(tmp: &Path, path: &Path, rows: &[ScoreRow]) -> Result<(), CookoffError> {
    let file = std::fs::File::create(tmp)?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    writer.flush()?;
    drop(writer);
    std::fs::rename(tmp, path)?;
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(std::ffi::OsStr::to_os_string).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
