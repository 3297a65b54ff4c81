//! CLI argument definitions
//!
//! Clap derive structs for `cookoff` command-line parsing.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

// ============================================================================
// Root CLI
// ============================================================================

/// Trending feed ranking and cook-off phase clock.
#[derive(Parser, Debug)]
#[command(name = "cookoff", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "COOKOFF_COLOR")]
    pub color: ColorChoice,

    /// Log line format on stderr.
    #[arg(long, default_value = "human", global = true, env = "COOKOFF_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Path to YAML configuration file.
    #[arg(short, long, global = true, env = "COOKOFF_CONFIG")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank a feed snapshot by trending score.
    Rank(RankArgs),

    /// Show the current phase of each competition in a snapshot.
    Phase(PhaseArgs),

    /// Follow one competition's countdown until it completes.
    Watch(WatchArgs),

    /// Compute `{id, trending_score}` rows, once or periodically.
    Score(ScoreArgs),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version and build information.
    Version(VersionArgs),
}

/// Arguments for `rank`.
#[derive(Args, Debug)]
pub struct RankArgs {
    /// Item snapshot (`.json`, `.yaml` or `.yml`).
    pub items: PathBuf,

    /// Ranking instant (RFC 3339); defaults to the current time.
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,

    /// Reject items dated beyond the clock skew tolerance.
    #[arg(long)]
    pub strict: bool,

    /// Print at most this many items.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Write a `FeedRanked` event as JSONL to this file.
    #[arg(long, env = "COOKOFF_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,
}

/// Arguments for `phase`.
#[derive(Args, Debug)]
pub struct PhaseArgs {
    /// Competition snapshot (`.json`, `.yaml` or `.yml`).
    pub competitions: PathBuf,

    /// Derivation instant (RFC 3339); defaults to the current time.
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,

    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `watch`.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Competition snapshot (`.json`, `.yaml` or `.yml`).
    pub competitions: PathBuf,

    /// Competition to follow; required when the snapshot has several.
    #[arg(long)]
    pub id: Option<String>,

    /// Start the countdown at this instant instead of the current time.
    #[arg(long, value_parser = parse_instant)]
    pub now: Option<DateTime<Utc>>,

    /// Refresh interval (e.g. `1s`, `500ms`); defaults to `clock.tick_interval`.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Keep ticking after the competition completes.
    #[arg(long)]
    pub keep_running: bool,

    /// Write phase events as JSONL to this file.
    #[arg(long, env = "COOKOFF_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,

    /// Serve Prometheus metrics on `127.0.0.1:<port>`.
    #[arg(long, env = "COOKOFF_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Output format for tick lines.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

/// Arguments for `score`.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Item snapshot (`.json`, `.yaml` or `.yml`).
    pub items: PathBuf,

    /// Write rows to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Rerun on this period (e.g. `5m`) until interrupted.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub every: Option<Duration>,

    /// Serve Prometheus metrics on `127.0.0.1:<port>`.
    #[arg(long, env = "COOKOFF_METRICS_PORT")]
    pub metrics_port: Option<u16>,

    /// Scoring instant (RFC 3339); single runs only.
    #[arg(long, value_parser = parse_instant, conflicts_with = "every")]
    pub now: Option<DateTime<Utc>>,

    /// Write a `ScoresWritten` event per run as JSONL to this file.
    #[arg(long, env = "COOKOFF_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,
}

/// Arguments for shell completion generation.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell for completion script.
    pub shell: Shell,
}

/// Arguments for version display.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// CLI-Local Enums
// ============================================================================

/// Color output choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal support.
    #[default]
    Auto,
    /// Always use color.
    Always,
    /// Never use color.
    Never,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output.
    #[default]
    Human,
    /// JSON output.
    Json,
}

/// Shell type for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// `PowerShell`.
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell.
    Elvish,
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC 3339 timestamp such as 2025-06-01T12:00:00Z: {e}"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rank_defaults() {
        let cli = Cli::try_parse_from(["cookoff", "rank", "items.json"]).unwrap();
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(args.items, PathBuf::from("items.json"));
        assert_eq!(args.format, OutputFormat::Human);
        assert!(!args.strict);
        assert!(args.now.is_none());
        assert!(args.limit.is_none());
    }

    #[test]
    fn test_rank_with_now_offset() {
        let cli = Cli::try_parse_from([
            "cookoff",
            "rank",
            "items.json",
            "--now",
            "2025-06-01T14:00:00+02:00",
        ])
        .unwrap();
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank");
        };
        assert_eq!(
            args.now,
            Some(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_bad_now_rejected() {
        let result = Cli::try_parse_from(["cookoff", "rank", "items.json", "--now", "yesterday"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_watch_interval_parses() {
        let cli = Cli::try_parse_from([
            "cookoff",
            "watch",
            "c.yaml",
            "--interval",
            "250ms",
            "--keep-running",
            "--metrics-port",
            "9464",
        ])
        .unwrap();
        let Commands::Watch(args) = cli.command else {
            panic!("expected watch");
        };
        assert_eq!(args.interval, Some(Duration::from_millis(250)));
        assert!(args.keep_running);
        assert_eq!(args.metrics_port, Some(9464));
    }

    #[test]
    fn test_score_every_conflicts_with_now() {
        let result = Cli::try_parse_from([
            "cookoff",
            "score",
            "items.json",
            "--every",
            "5m",
            "--now",
            "2025-06-01T12:00:00Z",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "cookoff",
            "phase",
            "c.yaml",
            "-vv",
            "--log-format",
            "json",
            "--color",
            "never",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_format, LogFormat::Json);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn test_help_output() {
        let err = Cli::try_parse_from(["cookoff", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_output() {
        let err = Cli::try_parse_from(["cookoff", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_shells_parse() {
        for shell in ["bash", "zsh", "fish", "powershell", "elvish"] {
            assert!(Cli::try_parse_from(["cookoff", "completions", shell]).is_ok());
        }
    }

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
