//! Application-level state.

use super::SettingsMenu;

/// Lifecycle phase of the ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Terminal and timers are being set up; nothing animates yet.
    #[default]
    Initializing,
    /// No fetch is running.
    Idle,
    /// At least one fetch cycle is in flight.
    Fetching,
}

/// Global application state.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current phase.
    pub phase: AppPhase,
    /// Number of fetch cycles currently running.
    pub fetches_in_flight: usize,
    /// Whether the settings menu is open.
    pub show_settings: bool,
    /// Settings menu cursor and editor.
    pub settings_menu: SettingsMenu,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl AppState {
    /// Create a new application state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave the initializing phase.
    pub fn mark_ready(&mut self) {
        if self.phase == AppPhase::Initializing {
            self.phase = if self.fetches_in_flight > 0 {
                AppPhase::Fetching
            } else {
                AppPhase::Idle
            };
        }
    }

    /// Record that a fetch cycle was spawned.
    pub fn fetch_started(&mut self) {
        self.fetches_in_flight += 1;
        if self.phase != AppPhase::Initializing {
            self.phase = AppPhase::Fetching;
        }
    }

    /// Record that a fetch cycle ended, successfully or not.
    pub fn fetch_finished(&mut self) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        if self.phase == AppPhase::Fetching && self.fetches_in_flight == 0 {
            self.phase = AppPhase::Idle;
        }
    }

    /// Whether animation ticks should advance the scroll offset.
    pub fn is_animating(&self) -> bool {
        self.phase != AppPhase::Initializing
    }

    /// Open the settings menu at its first entry.
    pub fn open_settings(&mut self) {
        self.show_settings = true;
        self.settings_menu = SettingsMenu::default();
    }

    /// Close the settings menu, discarding any unfinished edit.
    pub fn close_settings(&mut self) {
        self.show_settings = false;
        self.settings_menu = SettingsMenu::default();
    }
}
