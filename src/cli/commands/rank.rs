//! `rank` command
//!
//! Orders a feed snapshot by trending score at one instant.

use std::io::Write;
use std::path::Path;
use std::time::Instant;

use cookoff_core::{RankingEngine, ScoredItem};

use crate::cli::args::{OutputFormat, RankArgs};
use crate::error::CookoffError;
use crate::observability::{Event, EventEmitter, metrics};
use crate::snapshot;

use super::{load_config, resolve_now};

/// Rank the items in a snapshot and print them.
///
/// # Errors
///
/// Returns a config, snapshot or validation error (the latter only with
/// `--strict`), or an I/O error writing to stdout.
pub fn run(args: &RankArgs, config_path: Option<&Path>) -> Result<(), CookoffError> {
    let (loader, loaded) = load_config(config_path)?;
    let engine = RankingEngine::with_weights(loaded.config.ranking.weights.clone())?;
    let items = snapshot::load_items(&args.items, loader.limits())?;
    let now = resolve_now(args.now);

    let input = items.len();
    let started = Instant::now();
    let mut ranked = if args.strict {
        engine.score_all_checked(items, now, loaded.config.ranking.skew_tolerance())?
    } else {
        engine.score_all(items, now)
    };
    metrics::record_ranking(ranked.len(), started.elapsed());

    tracing::info!(input, ranked = ranked.len(), now = %now, "feed ranked");
    EventEmitter::from_option(args.events_file.as_deref())?.emit(Event::FeedRanked {
        timestamp: now,
        input,
        ranked: ranked.len(),
    });

    if let Some(limit) = args.limit {
        ranked.truncate(limit);
    }

    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Human => render_table(&ranked, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &ranked)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_table(ranked: &[ScoredItem], out: &mut impl Write) -> std::io::Result<()> {
    if ranked.is_empty() {
        return writeln!(out, "no items to rank");
    }

    let id_width = ranked
        .iter()
        .map(|s| s.item.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    writeln!(
        out,
        "{:>4}  {:<id_width$}  {:>6}  {:>8}  {:>12}",
        "#", "ID", "LIKES", "COMMENTS", "SCORE"
    )?;
    for (position, scored) in ranked.iter().enumerate() {
        writeln!(
            out,
            "{:>4}  {:<id_width$}  {:>6}  {:>8}  {:>12.4}",
            position + 1,
            scored.item.id,
            scored.item.likes,
            scored.item.comments,
            scored.trending_score
        )?;
    }
    Ok(())
}
