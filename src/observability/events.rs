//! JSONL event stream
//!
//! Typed events for phase changes and scoring runs, one JSON object per
//! line with a `sequence` counter for ordering.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use cookoff_core::Phase;
use cookoff_core::phase::TransitionCue;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Event variants
// ---------------------------------------------------------------------------

/// A discrete event, tagged with `"type"` when serialized.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A competition moved into a new phase.
    PhaseEntered {
        /// Clock instant of the tick that observed the change.
        timestamp: DateTime<Utc>,
        /// Competition id.
        competition: String,
        /// Phase left behind.
        from: Phase,
        /// Phase entered.
        to: Phase,
        /// Screen change the client should make, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        cue: Option<TransitionCue>,
    },

    /// The last countdown of a competition ran out.
    TimeUp {
        /// Clock instant of the observing tick.
        timestamp: DateTime<Utc>,
        /// Competition id.
        competition: String,
    },

    /// A feed snapshot was ranked.
    FeedRanked {
        /// Ranking instant.
        timestamp: DateTime<Utc>,
        /// Rows in the snapshot.
        input: usize,
        /// Rows kept after filtering.
        ranked: usize,
    },

    /// A scoring run wrote its rows.
    ScoresWritten {
        /// Scoring instant.
        timestamp: DateTime<Utc>,
        /// Rows written.
        rows: usize,
        /// Destination, `-` for stdout.
        destination: String,
    },

    /// The watch loop ended.
    WatchStopped {
        /// Clock instant at shutdown.
        timestamp: DateTime<Utc>,
        /// Competition id.
        competition: String,
        /// Why the loop ended (`completed`, `cancelled`).
        reason: String,
        /// Ticks observed.
        ticks: u64,
    },
}

#[derive(Debug, Serialize)]
struct EventEnvelope {
    sequence: u64,
    #[serde(flatten)]
    event: Event,
}

// ---------------------------------------------------------------------------
// Emitter
// ---------------------------------------------------------------------------

/// Thread-safe buffered JSONL writer.
///
/// Serialization and I/O failures are dropped; a broken event sink never
/// stops a ranking or a countdown.
pub struct EventEmitter {
    writer: Mutex<BufWriter<Box<dyn Write + Send>>>,
    sequence: AtomicU64,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("sequence", &self.sequence.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl EventEmitter {
    /// Creates an emitter over any writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
            sequence: AtomicU64::new(0),
        }
    }

    /// Emitter that discards everything.
    #[must_use]
    pub fn noop() -> Self {
        Self::new(Box::new(std::io::sink()))
    }

    /// Emitter writing to a new file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(file)))
    }

    /// File emitter when a path is given, otherwise a no-op.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be created.
    pub fn from_option(path: Option<&Path>) -> std::io::Result<Self> {
        path.map_or_else(|| Ok(Self::noop()), Self::from_file)
    }

    /// Writes one event line and flushes.
    pub fn emit(&self, event: Event) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst);
        let envelope = EventEnvelope { sequence, event };

        let Ok(line) = serde_json::to_string(&envelope) else {
            return;
        };
        if let Ok(mut w) = self.writer.lock() {
            let _ = writeln!(w, "{line}");
            let _ = w.flush();
        }
    }

    /// Number of events emitted so far.
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }
}
