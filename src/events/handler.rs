//! Event handler turning terminal input into actions.

use super::{InputEvent, KeyBindings};
use crate::config::TickerConfig;
use crate::state::{Action, AppState};
use crossterm::event::{
    Event as CrosstermEvent, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

/// Handles input events and produces actions.
#[derive(Debug, Clone, Default)]
pub struct EventHandler {
    keybindings: KeyBindings,
}

impl EventHandler {
    /// Create a handler with the default key bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a terminal event to an action. Keys go to the settings menu
    /// while it is open.
    pub fn handle(
        &self,
        event: &CrosstermEvent,
        app: &mut AppState,
        config: &TickerConfig,
    ) -> Option<Action> {
        match event {
            CrosstermEvent::Key(key) => self.handle_key(*key, app, config),
            CrosstermEvent::Mouse(mouse) => self.handle_mouse(*mouse),
            _ => None,
        }
    }

    /// Primary click opens settings, secondary click quits.
    fn handle_mouse(&self, mouse: MouseEvent) -> Option<Action> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Some(Action::OpenSettings),
            MouseEventKind::Down(MouseButton::Right) => Some(Action::Quit),
            _ => None,
        }
    }

    fn handle_key(
        &self,
        key: KeyEvent,
        app: &mut AppState,
        config: &TickerConfig,
    ) -> Option<Action> {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return None;
        }

        let input = InputEvent::from(key);

        // Ctrl+C always quits, even while editing symbols
        if input.matches("Ctrl+c") {
            return Some(Action::Quit);
        }

        if app.show_settings {
            return app.settings_menu.handle_key(key, config);
        }

        if self.keybindings.is_quit(&input) {
            return Some(Action::Quit);
        }
        if input.matches(&self.keybindings.settings) {
            return Some(Action::OpenSettings);
        }
        if input.matches(&self.keybindings.refresh) {
            return Some(Action::RefreshNow);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn click(button: MouseButton) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(button),
            column: 12,
            row: 1,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn press(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_click_dispatch() {
        let handler = EventHandler::new();
        let mut app = AppState::new();
        let config = TickerConfig::default();

        assert_eq!(
            handler.handle(&click(MouseButton::Left), &mut app, &config),
            Some(Action::OpenSettings)
        );
        assert_eq!(
            handler.handle(&click(MouseButton::Right), &mut app, &config),
            Some(Action::Quit)
        );
        assert_eq!(
            handler.handle(&click(MouseButton::Middle), &mut app, &config),
            None
        );
    }

    #[test]
    fn test_strip_keys() {
        let handler = EventHandler::new();
        let mut app = AppState::new();
        let config = TickerConfig::default();

        assert_eq!(
            handler.handle(&press(KeyCode::Char('r')), &mut app, &config),
            Some(Action::RefreshNow)
        );
        assert_eq!(
            handler.handle(&press(KeyCode::Char('s')), &mut app, &config),
            Some(Action::OpenSettings)
        );
        assert_eq!(
            handler.handle(&press(KeyCode::Esc), &mut app, &config),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_keys_go_to_open_menu() {
        let handler = EventHandler::new();
        let mut app = AppState::new();
        app.open_settings();
        let config = TickerConfig::default();

        // Esc closes the menu instead of quitting.
        assert_eq!(
            handler.handle(&press(KeyCode::Esc), &mut app, &config),
            Some(Action::CloseSettings)
        );
        assert_eq!(
            handler.handle(&press(KeyCode::Down), &mut app, &config),
            None
        );
        assert_eq!(app.settings_menu.selected, 1);

        let ctrl_c = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(
            handler.handle(&ctrl_c, &mut app, &config),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_key_release_is_ignored() {
        let handler = EventHandler::new();
        let mut app = AppState::new();
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;

        assert_eq!(
            handler.handle(&CrosstermEvent::Key(key), &mut app, &TickerConfig::default()),
            None
        );
    }
}
