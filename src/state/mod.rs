//! State management for the ticker.
//!
//! Quotes live in a [`SnapshotStore`] shared with fetch tasks; everything
//! else is owned by the UI loop and changed through [`Action`]s.

mod app_state;
mod quote;
mod settings_menu;
mod snapshot_store;

pub use app_state::{AppPhase, AppState};
pub use quote::{Direction, Quote, QuoteSnapshot};
pub use settings_menu::{MenuItem, SettingsMenu, SymbolEditor};
pub use snapshot_store::SnapshotStore;

/// Actions produced by input handling and applied by the app.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Settings surface
    OpenSettings,
    CloseSettings,

    // Config changes
    SetFontSize(u32),
    SetScrollSpeed(f64),
    SetOpacity(f64),
    SetRefreshInterval(u64),
    SetSymbols(Vec<String>),

    // Data refresh
    RefreshNow,

    // Quit
    Quit,
}
