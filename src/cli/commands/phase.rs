//! `phase` command
//!
//! Prints the derived phase and countdown of every competition in a
//! snapshot at one instant.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use cookoff_core::{Phase, PhaseStatus};
use serde::Serialize;

use crate::cli::args::{OutputFormat, PhaseArgs};
use crate::error::CookoffError;
use crate::snapshot::{self, Competition};

use super::{load_config, resolve_now};

/// One row of `phase` output.
#[derive(Debug, Serialize)]
struct PhaseRow<'a> {
    id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    phase: Phase,
    label: &'static str,
    seconds_remaining: u64,
    remaining: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    ends_at: Option<DateTime<Utc>>,
}

impl<'a> PhaseRow<'a> {
    fn new(competition: &'a Competition, status: PhaseStatus) -> Self {
        Self {
            id: &competition.id,
            title: competition.title.as_deref(),
            phase: status.phase,
            label: status.phase.label(),
            seconds_remaining: status.seconds_remaining,
            remaining: status.formatted(),
            ends_at: competition.window.boundary_after(status.phase),
        }
    }
}

/// Print the current phase of each competition.
///
/// # Errors
///
/// Returns a config or snapshot error, a validation error for an
/// out-of-order window, or an I/O error writing to stdout.
pub fn run(args: &PhaseArgs, config_path: Option<&Path>) -> Result<(), CookoffError> {
    let (loader, _) = load_config(config_path)?;
    let competitions = snapshot::load_competitions(&args.competitions, loader.limits())?;
    let now = resolve_now(args.now);

    let rows: Vec<PhaseRow<'_>> = competitions
        .iter()
        .map(|c| PhaseRow::new(c, c.window.status_at(now)))
        .collect();

    tracing::debug!(count = rows.len(), now = %now, "phases derived");

    let mut out = std::io::stdout().lock();
    match args.format {
        OutputFormat::Human => render_lines(&competitions, &rows, &mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &rows)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn render_lines(
    competitions: &[Competition],
    rows: &[PhaseRow<'_>],
    out: &mut impl Write,
) -> std::io::Result<()> {
    let name_width = competitions
        .iter()
        .map(|c| c.display_name().len())
        .max()
        .unwrap_or(0);

    for (competition, row) in competitions.iter().zip(rows) {
        writeln!(
            out,
            "{:<name_width$}  {:<16}  {}",
            competition.display_name(),
            row.label,
            row.remaining
        )?;
    }
    Ok(())
}
