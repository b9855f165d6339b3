//! TUI widgets.

mod settings_menu;

pub use settings_menu::SettingsPanel;
