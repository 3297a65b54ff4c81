//! `Cookoff` - trending feed ranking and cook-off phase clock

use std::sync::atomic::{AtomicI32, Ordering};

use clap::Parser;
use tokio_util::sync::CancellationToken;

use cookoff::cli::args::Cli;
use cookoff::cli::commands;
use cookoff::error::ExitCode;
use cookoff::observability::init_logging;

/// Exit code chosen by the first shutdown signal, if any.
static SIGNAL_EXIT: AtomicI32 = AtomicI32::new(ExitCode::SUCCESS);

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.log_format, cli.verbose, cli.quiet, cli.color);

    let cancel = CancellationToken::new();
    tokio::spawn(handle_signals(cancel.clone()));

    let result = commands::dispatch(cli, cancel).await;

    match result {
        Ok(()) => std::process::exit(SIGNAL_EXIT.load(Ordering::SeqCst)),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

/// First SIGINT/SIGTERM cancels running work; a second one exits at once.
async fn handle_signals(cancel: CancellationToken) {
    let first = wait_for_signal().await;
    SIGNAL_EXIT.store(first, Ordering::SeqCst);
    tracing::info!(code = first, "shutdown signal received");
    eprintln!("\nShutting down gracefully... (press Ctrl+C again to force)");
    cancel.cancel();

    let second = wait_for_signal().await;
    std::process::exit(second);
}

#[cfg(unix)]
async fn wait_for_signal() -> i32 {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => tokio::select! {
            _ = tokio::signal::ctrl_c() => ExitCode::INTERRUPTED,
            _ = sigterm.recv() => ExitCode::TERMINATED,
        },
        Err(e) => {
            tracing::warn!(error = %e, "cannot register SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            ExitCode::INTERRUPTED
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> i32 {
    let _ = tokio::signal::ctrl_c().await;
    ExitCode::INTERRUPTED
}
