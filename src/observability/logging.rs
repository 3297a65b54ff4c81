//! Logging initialization
//!
//! Structured `tracing` output on stderr, human-readable or JSON, with
//! verbosity from `-v` flags unless `COOKOFF_LOG_LEVEL` is set.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::cli::args::{ColorChoice, LogFormat};

/// Environment variable overriding the verbosity flags.
pub const LOG_LEVEL_ENV: &str = "COOKOFF_LOG_LEVEL";

/// Maps `-v` occurrences to a filter directive.
///
/// `quiet` wins over any verbosity and keeps only errors.
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the global subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(format: LogFormat, verbosity: u8, quiet: bool, color: ColorChoice) {
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity, quiet)));

    let show_target = verbosity >= 2;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(show_target)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Human => builder.with_ansi(use_ansi(color)).try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn use_ansi(color: ColorChoice) -> bool {
    match color {
        ColorChoice::Auto => {
            std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
        }
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(verbosity_to_directive(0, false), "warn");
        assert_eq!(verbosity_to_directive(1, false), "info");
        assert_eq!(verbosity_to_directive(2, false), "debug");
        assert_eq!(verbosity_to_directive(3, false), "trace");
        assert_eq!(verbosity_to_directive(u8::MAX, false), "trace");
    }

    #[test]
    fn test_quiet_overrides_verbosity() {
        assert_eq!(verbosity_to_directive(0, true), "error");
        assert_eq!(verbosity_to_directive(3, true), "error");
    }

    #[test]
    fn test_init_logging_repeatable() {
        init_logging(LogFormat::Human, 0, false, ColorChoice::Never);
        init_logging(LogFormat::Json, 2, false, ColorChoice::Auto);
    }

    #[test]
    fn test_never_color_disables_ansi() {
        assert!(!use_ansi(ColorChoice::Never));
        assert!(use_ansi(ColorChoice::Always));
    }
}
