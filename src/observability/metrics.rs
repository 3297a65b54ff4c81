//! Prometheus metrics
//!
//! Recording functions go through the `metrics` facade and are no-ops
//! until [`init_metrics`] installs a recorder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use cookoff_core::Phase;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::error::CookoffError;

static METRICS_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Installs the global recorder.
///
/// With `Some(port)` an HTTP scrape endpoint listens on `127.0.0.1:<port>`;
/// with `None` metrics are only recorded in-process.
///
/// # Errors
///
/// Returns `CookoffError::Metrics` if the recorder or listener cannot be
/// installed (e.g. the port is taken).
pub fn init_metrics(port: Option<u16>) -> Result<(), CookoffError> {
    if METRICS_INITIALIZED.swap(true, Ordering::SeqCst) {
        tracing::debug!("metrics already initialized, skipping");
        return Ok(());
    }

    let builder = PrometheusBuilder::new();
    let installed = match port {
        Some(p) => builder.with_http_listener(([127, 0, 0, 1], p)).install(),
        None => builder.install_recorder().map(|_| ()),
    };
    installed.map_err(|e| CookoffError::Metrics(e.to_string()))?;

    describe_metrics();
    if let Some(p) = port {
        tracing::info!(port = p, "metrics endpoint listening");
    }
    Ok(())
}

fn describe_metrics() {
    describe_counter!(
        "cookoff_items_ranked_total",
        "Items kept in a ranked feed or score run"
    );
    describe_histogram!(
        "cookoff_ranking_duration_ms",
        "Time spent scoring one snapshot"
    );
    describe_counter!(
        "cookoff_phase_transitions_total",
        "Phase changes observed by the watch loop"
    );
    describe_counter!("cookoff_ticks_total", "Countdown ticks");
    describe_gauge!(
        "cookoff_current_phase",
        "Active phase per competition (1 = active)"
    );
}

/// Records a ranking or scoring run.
pub fn record_ranking(kept: usize, duration: Duration) {
    counter!("cookoff_items_ranked_total").increment(u64::try_from(kept).unwrap_or(u64::MAX));
    histogram!("cookoff_ranking_duration_ms").record(duration.as_secs_f64() * 1000.0);
}

/// Records one countdown tick.
pub fn record_tick(competition: &str) {
    counter!("cookoff_ticks_total", "competition" => competition.to_owned()).increment(1);
}

/// Records a phase change.
pub fn record_transition(competition: &str, from: Phase, to: Phase) {
    counter!(
        "cookoff_phase_transitions_total",
        "competition" => competition.to_owned(),
        "from" => from.as_str(),
        "to" => to.as_str()
    )
    .increment(1);
}

/// Sets the phase gauge: 1 for `phase`, 0 for every other phase.
pub fn set_current_phase(competition: &str, phase: Phase) {
    for candidate in Phase::ALL {
        let value = if candidate == phase { 1.0 } else { 0.0 };
        gauge!(
            "cookoff_current_phase",
            "competition" => competition.to_owned(),
            "phase" => candidate.as_str()
        )
        .set(value);
    }
}
