//! Main application module.
//!
//! This module contains the main `App` struct that owns the terminal,
//! runs the event loop and draws the ticker every frame.

use crate::api::{ChartClient, QuoteFetcher};
use crate::config::TickerConfig;
use crate::error::{Error, Result};
use crate::events::{Event, spawn_input_reader};
use crate::overlay::Overlay;
use crate::state::SnapshotStore;
use crate::ui::{Ui, describe};

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Ticker state machine.
    overlay: Overlay,
    /// Event sender, handed to the input reader.
    event_tx: mpsc::UnboundedSender<Event>,
    /// Event receiver.
    event_rx: mpsc::UnboundedReceiver<Event>,
    /// Cycle of the last snapshot drawn.
    shown_cycle: u64,
}

impl App {
    /// Create a new application.
    pub fn new(config: TickerConfig, config_path: PathBuf) -> Result<Self> {
        let client = ChartClient::new()?;
        let fetcher = QuoteFetcher::new(Arc::new(client), SnapshotStore::new());

        // Create event channel
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let overlay = Overlay::new(config, config_path, fetcher, event_tx.clone());

        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            overlay,
            event_tx,
            event_rx,
            shown_cycle: 0,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        self.overlay.start();
        let input_reader = spawn_input_reader(self.event_tx.clone());

        // Main event loop
        loop {
            self.draw().await?;

            tokio::select! {
                event = self.event_rx.recv() => {
                    let event = event.ok_or_else(|| Error::channel("event channel closed"))?;
                    self.overlay.handle_event(event);
                }

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted");
                    break;
                }
            }

            // Check if we should quit
            if self.overlay.should_quit() {
                break;
            }
        }

        self.overlay.shutdown();
        self.event_rx.close();
        if let Err(e) = input_reader.await {
            tracing::debug!("Input reader ended abnormally: {}", e);
        }

        Ok(())
    }

    /// Draw one frame and feed the laid-out content width back to the animator.
    async fn draw(&mut self) -> Result<()> {
        let snapshot = self.overlay.snapshot().await;
        if snapshot.cycle != self.shown_cycle {
            self.shown_cycle = snapshot.cycle;
            if let Some(fetched_at) = snapshot.fetched_at {
                tracing::debug!(
                    "Showing cycle {} fetched at {}: {}",
                    snapshot.cycle,
                    fetched_at.format("%H:%M:%S"),
                    describe(&snapshot.quotes)
                );
            }
        }

        if self.overlay.take_full_redraw() {
            self.terminal.clear()?;
        }

        let ctx = self.overlay.frame_context(&snapshot);
        let mut content_width = 0.0;
        self.terminal.draw(|frame| {
            content_width = Ui::render(frame, &ctx);
        })?;

        self.overlay.set_content_width(content_width);
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
