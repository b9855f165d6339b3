//! Tickerbar - a scrolling stock ticker for the terminal
//!
//! Fetches daily closes for a list of symbols and scrolls price and
//! day-change across the top of the terminal.

use std::io::IsTerminal;
use tickerbar::config::{self, TickerConfig};
use tickerbar::{App, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log to stderr when it is redirected, otherwise to a daily file so the
/// ticker's screen stays clean.
fn init_logging() -> Option<WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tickerbar=info".into());

    if !std::io::stderr().is_terminal() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
        return None;
    }

    let log_dir = config::log_dir().ok()?;
    if std::fs::create_dir_all(&log_dir).is_err() {
        return None;
    }
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::daily(log_dir, "tickerbar.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer),
        )
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let _guard = init_logging();

    // Load configuration
    let config_path = config::config_path();
    let config = TickerConfig::load(&config_path);
    tracing::info!("Using config at {}", config_path.display());

    // Run the application
    let mut app = App::new(config, config_path)?;
    app.run().await?;

    Ok(())
}
