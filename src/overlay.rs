//! The ticker orchestrator.
//!
//! [`Overlay`] owns the configuration, animation state and timers, spawns
//! fetch cycles and applies user actions. It knows nothing about the
//! terminal; [`App`](crate::App) drives it and draws what it describes.

use crate::api::{CycleOutcome, QuoteFetcher};
use crate::config::TickerConfig;
use crate::events::{Event, EventHandler, Timers};
use crate::state::{Action, AppPhase, AppState, QuoteSnapshot};
use crate::ui::{CellSize, FrameContext, ScrollAnimator, TickerRenderer};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Ticker state machine: timers, fetch triggers and settings changes.
pub struct Overlay {
    state: AppState,
    config: TickerConfig,
    config_path: PathBuf,
    fetcher: QuoteFetcher,
    animator: ScrollAnimator,
    renderer: TickerRenderer,
    cell: CellSize,
    timers: Timers,
    event_handler: EventHandler,
    event_tx: mpsc::UnboundedSender<Event>,
    full_redraw: bool,
}

impl Overlay {
    /// Create an overlay; nothing runs until [`start`](Self::start).
    pub fn new(
        config: TickerConfig,
        config_path: PathBuf,
        fetcher: QuoteFetcher,
        event_tx: mpsc::UnboundedSender<Event>,
    ) -> Self {
        Self {
            state: AppState::new(),
            config,
            config_path,
            fetcher,
            animator: ScrollAnimator::new(),
            renderer: TickerRenderer::new(),
            cell: CellSize::default(),
            timers: Timers::new(),
            event_handler: EventHandler::new(),
            event_tx,
            full_redraw: true,
        }
    }

    /// Size the strip, arm both timers and trigger the first fetch.
    pub fn start(&mut self) {
        self.cell = CellSize::detect();
        self.timers.arm(&self.config, &self.event_tx);
        self.spawn_fetch();
        self.state.mark_ready();
        tracing::info!(
            "Ticker started with {} symbols, refreshing every {} min",
            self.config.symbols.len(),
            self.config.update_interval_min
        );
    }

    /// Handle one event from the loop channel.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Tick => {
                if self.state.is_animating() {
                    self.animator.tick(self.config.scroll_speed);
                }
            }
            Event::Refresh => self.spawn_fetch(),
            Event::Input(input) => {
                if let crossterm::event::Event::Resize(_, _) = input {
                    self.cell = CellSize::detect();
                    self.full_redraw = true;
                }
                if let Some(action) = self.event_handler.handle(&input, &mut self.state, &self.config)
                {
                    self.apply_action(action);
                }
            }
            Event::FetchFinished(outcome) => self.fetch_finished(outcome),
        }
    }

    /// Apply a user action.
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::OpenSettings => self.state.open_settings(),
            Action::CloseSettings => self.state.close_settings(),
            Action::SetFontSize(size) => {
                self.config.ticker_font_size = size;
                self.apply_config();
            }
            Action::SetScrollSpeed(speed) => {
                self.config.scroll_speed = speed;
                self.persist_config();
            }
            Action::SetOpacity(alpha) => {
                self.config.bg_alpha = alpha.clamp(0.0, 1.0);
                self.persist_config();
            }
            Action::SetRefreshInterval(minutes) => {
                self.config.update_interval_min = minutes.max(1);
                self.apply_config();
            }
            Action::SetSymbols(symbols) => {
                if self.config.set_symbols(symbols) {
                    self.apply_config();
                    self.spawn_fetch();
                }
            }
            Action::RefreshNow => self.spawn_fetch(),
            Action::Quit => {
                tracing::info!("Quit requested");
                self.state.should_quit = true;
            }
        }
    }

    /// Re-apply the configuration after a settings change: recompute the
    /// geometry, restart both timers, persist and force a full redraw.
    pub fn apply_config(&mut self) {
        self.cell = CellSize::detect();
        self.timers.arm(&self.config, &self.event_tx);
        self.persist_config();
        self.full_redraw = true;
    }

    /// Spawn an independent fetch cycle for the current symbols.
    pub fn spawn_fetch(&mut self) {
        self.state.fetch_started();
        let fetcher = self.fetcher.clone();
        let symbols = self.config.symbols.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let outcome = fetcher.refresh(&symbols).await;
            // The loop may already be gone on shutdown
            let _ = event_tx.send(Event::FetchFinished(outcome));
        });
    }

    fn fetch_finished(&mut self, outcome: CycleOutcome) {
        self.state.fetch_finished();
        if !outcome.is_updated() {
            tracing::debug!(
                "Fetch cycle gave up after {} attempts",
                outcome.attempts()
            );
        }
    }

    fn persist_config(&self) {
        if let Err(e) = self.config.save(&self.config_path) {
            tracing::warn!(
                "Failed to save config to {}: {}",
                self.config_path.display(),
                e
            );
        }
    }

    /// Copy of the current quote snapshot.
    pub async fn snapshot(&self) -> Arc<QuoteSnapshot> {
        self.fetcher.store().current().await
    }

    /// Everything needed to draw a frame of `snapshot`.
    pub fn frame_context<'a>(&'a self, snapshot: &'a QuoteSnapshot) -> FrameContext<'a> {
        FrameContext {
            snapshot,
            offset: self.animator.offset(),
            config: &self.config,
            app: &self.state,
            renderer: &self.renderer,
            cell: self.cell,
        }
    }

    /// Feed back the content width laid out by the last frame.
    pub fn set_content_width(&mut self, content_width: f64) {
        self.animator.set_content_width(content_width);
    }

    /// Whether the next frame must repaint the whole terminal. Resets the flag.
    pub fn take_full_redraw(&mut self) -> bool {
        std::mem::take(&mut self.full_redraw)
    }

    /// Whether the loop should exit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit
    }

    /// Stop both timers.
    pub fn shutdown(&mut self) {
        self.timers.stop();
    }

    pub fn config(&self) -> &TickerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn phase(&self) -> AppPhase {
        self.state.phase
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn offset(&self) -> f64 {
        self.animator.offset()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FetchPolicy, QuoteSource};
    use crate::error::{Error, Result};
    use crate::state::SnapshotStore;
    use async_trait::async_trait;
    use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    struct StaticSource;

    #[async_trait]
    impl QuoteSource for StaticSource {
        async fn daily_closes(&self, symbol: &str) -> Result<Vec<Option<f64>>> {
            match symbol {
                "AAPL" => Ok(vec![Some(150.0), Some(153.0)]),
                "MSFT" => Ok(vec![Some(400.0), Some(390.0)]),
                other => Err(Error::RateLimited {
                    symbol: other.to_string(),
                }),
            }
        }
    }

    struct Harness {
        overlay: Overlay,
        rx: mpsc::UnboundedReceiver<Event>,
        dir: tempfile::TempDir,
    }

    impl Harness {
        fn new(symbols: &[&str]) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let (tx, rx) = mpsc::unbounded_channel();
            let fetcher = QuoteFetcher::with_policy(
                Arc::new(StaticSource),
                SnapshotStore::new(),
                FetchPolicy {
                    symbol_delay: Duration::ZERO,
                    ..FetchPolicy::default()
                },
            );
            let config = TickerConfig {
                symbols: symbols.iter().map(|s| s.to_string()).collect(),
                ..TickerConfig::default()
            };
            let overlay = Overlay::new(config, dir.path().join(".ticker-config.json"), fetcher, tx);
            Self { overlay, rx, dir }
        }

        fn config_path(&self) -> PathBuf {
            self.dir.path().join(".ticker-config.json")
        }

        /// Feed events to the overlay until a fetch cycle finishes.
        async fn run_until_fetched(&mut self) -> CycleOutcome {
            loop {
                let event = self.rx.recv().await.unwrap();
                if let Event::FetchFinished(outcome) = event {
                    self.overlay.handle_event(event);
                    return outcome;
                }
                self.overlay.handle_event(event);
            }
        }
    }

    fn click(button: MouseButton) -> Event {
        Event::Input(crossterm::event::Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column: 3,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_fetches_immediately() {
        let mut harness = Harness::new(&["AAPL", "MSFT"]);
        assert_eq!(harness.overlay.phase(), AppPhase::Initializing);

        harness.overlay.start();
        assert_eq!(harness.overlay.phase(), AppPhase::Fetching);
        assert_eq!(harness.overlay.timers().arm_count(), 1);

        let outcome = harness.run_until_fetched().await;
        assert!(outcome.is_updated());
        assert_eq!(harness.overlay.phase(), AppPhase::Idle);

        let snapshot = harness.overlay.snapshot().await;
        let symbols: Vec<&str> = snapshot.quotes.iter().map(|q| q.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_returns_to_idle() {
        let mut harness = Harness::new(&["LIMITED"]);
        harness.overlay.start();

        let outcome = harness.run_until_fetched().await;
        assert_eq!(outcome.attempts(), 3);
        assert!(!outcome.is_updated());
        assert_eq!(harness.overlay.phase(), AppPhase::Idle);
        assert!(harness.overlay.snapshot().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_scroll_only_after_start() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.set_content_width(500.0);

        harness.overlay.handle_event(Event::Tick);
        assert_eq!(harness.overlay.offset(), 0.0);

        harness.overlay.start();
        harness.overlay.handle_event(Event::Tick);
        harness.overlay.handle_event(Event::Tick);
        assert_eq!(harness.overlay.offset(), -2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_dispatch() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.start();

        harness.overlay.handle_event(click(MouseButton::Left));
        assert!(harness.overlay.state().show_settings);
        assert!(!harness.overlay.should_quit());

        harness.overlay.handle_event(click(MouseButton::Right));
        assert!(harness.overlay.should_quit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_font_size_change_rearms_and_persists() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.start();
        harness.overlay.take_full_redraw();

        harness.overlay.apply_action(Action::SetFontSize(28));

        assert_eq!(harness.overlay.timers().arm_count(), 2);
        assert!(harness.overlay.take_full_redraw());
        let saved = TickerConfig::load(&harness.config_path());
        assert_eq!(saved.ticker_font_size, 28);
        assert_eq!(saved.bar_height(), 52);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_interval_change_restarts_refresh_timer() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.start();

        harness
            .overlay
            .apply_action(Action::SetRefreshInterval(60));

        assert_eq!(
            harness.overlay.timers().periods(),
            Some((Duration::from_millis(25), Duration::from_secs(3600)))
        );
        assert_eq!(TickerConfig::load(&harness.config_path()).update_interval_min, 60);
    }

    #[tokio::test(start_paused = true)]
    async fn test_speed_and_opacity_only_persist() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.start();

        harness.overlay.apply_action(Action::SetScrollSpeed(4.0));
        harness.overlay.apply_action(Action::SetOpacity(0.25));

        assert_eq!(harness.overlay.timers().arm_count(), 1);
        let saved = TickerConfig::load(&harness.config_path());
        assert_eq!(saved.scroll_speed, 4.0);
        assert_eq!(saved.bg_alpha, 0.25);
    }

    #[tokio::test(start_paused = true)]
    async fn test_symbol_edit_triggers_fetch() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.start();
        harness.run_until_fetched().await;

        harness
            .overlay
            .apply_action(Action::SetSymbols(vec!["msft".to_string()]));
        assert_eq!(harness.overlay.phase(), AppPhase::Fetching);

        harness.run_until_fetched().await;
        let snapshot = harness.overlay.snapshot().await;
        assert_eq!(snapshot.quotes[0].symbol, "MSFT");
        assert_eq!(
            TickerConfig::load(&harness.config_path()).symbols,
            vec!["MSFT".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_refresh_spawns_fetch() {
        let mut harness = Harness::new(&["AAPL"]);
        harness.overlay.start();
        harness.run_until_fetched().await;

        harness.overlay.handle_event(Event::Refresh);
        assert_eq!(harness.overlay.phase(), AppPhase::Fetching);
        let outcome = harness.run_until_fetched().await;
        assert!(matches!(outcome, CycleOutcome::Updated { cycle: 2, .. }));
    }
}
