//! Settings menu state.

use super::Action;
use crate::config::{
    FONT_SIZE_CHOICES, OPACITY_CHOICES, REFRESH_INTERVAL_CHOICES, SCROLL_SPEED_CHOICES,
    TickerConfig, normalize_symbols,
};
use crossterm::event::{KeyCode, KeyEvent};
use unicode_width::UnicodeWidthStr;

/// An entry of the settings menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    FontSize,
    ScrollSpeed,
    Opacity,
    RefreshInterval,
    EditSymbols,
    RefreshNow,
    Quit,
}

impl MenuItem {
    /// All entries in display order.
    pub const ALL: [MenuItem; 7] = [
        MenuItem::FontSize,
        MenuItem::ScrollSpeed,
        MenuItem::Opacity,
        MenuItem::RefreshInterval,
        MenuItem::EditSymbols,
        MenuItem::RefreshNow,
        MenuItem::Quit,
    ];

    /// Entry label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FontSize => "Font Size",
            Self::ScrollSpeed => "Scroll Speed",
            Self::Opacity => "Opacity",
            Self::RefreshInterval => "Refresh Interval",
            Self::EditSymbols => "Edit Symbols...",
            Self::RefreshNow => "Refresh Now",
            Self::Quit => "Quit",
        }
    }

    /// Current value shown next to option entries.
    pub fn value_label(&self, config: &TickerConfig) -> Option<String> {
        match self {
            Self::FontSize => Some(config.ticker_font_size.to_string()),
            Self::ScrollSpeed => Some(
                labeled_index(SCROLL_SPEED_CHOICES, config.scroll_speed)
                    .map(|i| SCROLL_SPEED_CHOICES[i].0.to_string())
                    .unwrap_or_else(|| format!("{} px/tick", config.scroll_speed)),
            ),
            Self::Opacity => Some(
                labeled_index(OPACITY_CHOICES, config.bg_alpha)
                    .map(|i| OPACITY_CHOICES[i].0.to_string())
                    .unwrap_or_else(|| format!("{:.0}%", config.bg_alpha * 100.0)),
            ),
            Self::RefreshInterval => Some(format!("{} min", config.update_interval_min)),
            Self::EditSymbols | Self::RefreshNow | Self::Quit => None,
        }
    }

    /// Action selecting the neighbouring choice (`step` is +1 or -1).
    fn cycle(&self, config: &TickerConfig, step: isize) -> Option<Action> {
        match self {
            Self::FontSize => {
                let current = FONT_SIZE_CHOICES
                    .iter()
                    .position(|&size| size == config.ticker_font_size);
                let next = step_index(current, FONT_SIZE_CHOICES.len(), step);
                Some(Action::SetFontSize(FONT_SIZE_CHOICES[next]))
            }
            Self::ScrollSpeed => {
                let current = labeled_index(SCROLL_SPEED_CHOICES, config.scroll_speed);
                let next = step_index(current, SCROLL_SPEED_CHOICES.len(), step);
                Some(Action::SetScrollSpeed(SCROLL_SPEED_CHOICES[next].1))
            }
            Self::Opacity => {
                let current = labeled_index(OPACITY_CHOICES, config.bg_alpha);
                let next = step_index(current, OPACITY_CHOICES.len(), step);
                Some(Action::SetOpacity(OPACITY_CHOICES[next].1))
            }
            Self::RefreshInterval => {
                let current = REFRESH_INTERVAL_CHOICES
                    .iter()
                    .position(|&m| m == config.update_interval_min);
                let next = step_index(current, REFRESH_INTERVAL_CHOICES.len(), step);
                Some(Action::SetRefreshInterval(REFRESH_INTERVAL_CHOICES[next]))
            }
            Self::EditSymbols | Self::RefreshNow | Self::Quit => None,
        }
    }
}

fn labeled_index(choices: &[(&str, f64)], value: f64) -> Option<usize> {
    choices.iter().position(|(_, v)| (v - value).abs() < 0.05)
}

fn step_index(current: Option<usize>, len: usize, step: isize) -> usize {
    match current {
        Some(i) => (i as isize + step).rem_euclid(len as isize) as usize,
        None => 0,
    }
}

/// Free-text editor for the symbol list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolEditor {
    /// Text being edited.
    pub buffer: String,
    /// Cursor position, in characters.
    pub cursor_position: usize,
}

impl SymbolEditor {
    /// Start editing the given symbols, one space apart.
    pub fn new(symbols: &[String]) -> Self {
        let buffer = symbols.join(" ");
        let cursor_position = buffer.chars().count();
        Self {
            buffer,
            cursor_position,
        }
    }

    /// Symbols parsed from the buffer; commas and whitespace separate them.
    pub fn symbols(&self) -> Vec<String> {
        normalize_symbols(self.buffer.split(|c: char| c == ',' || c.is_whitespace()))
    }

    /// Display columns between the start of the buffer and the cursor.
    pub fn cursor_column(&self) -> usize {
        self.buffer[..self.byte_index()].width()
    }

    fn byte_index(&self) -> usize {
        self.buffer
            .char_indices()
            .nth(self.cursor_position)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn push_char(&mut self, c: char) {
        let at = self.byte_index();
        self.buffer.insert(at, c);
        self.cursor_position += 1;
    }

    fn pop_char(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
            let at = self.byte_index();
            self.buffer.remove(at);
        }
    }

    fn cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn cursor_right(&mut self) {
        if self.cursor_position < self.buffer.chars().count() {
            self.cursor_position += 1;
        }
    }
}

/// Cursor and editor state of the settings menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsMenu {
    /// Index into [`MenuItem::ALL`].
    pub selected: usize,
    /// Present while the symbol list is being edited.
    pub editor: Option<SymbolEditor>,
}

impl SettingsMenu {
    /// The highlighted entry.
    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.selected.min(MenuItem::ALL.len() - 1)]
    }

    /// Handle a key press while the menu is open.
    pub fn handle_key(&mut self, key: KeyEvent, config: &TickerConfig) -> Option<Action> {
        if let Some(editor) = self.editor.as_mut() {
            return match key.code {
                KeyCode::Esc => {
                    self.editor = None;
                    None
                }
                KeyCode::Enter => {
                    let symbols = editor.symbols();
                    self.editor = None;
                    if symbols.is_empty() {
                        None
                    } else {
                        Some(Action::SetSymbols(symbols))
                    }
                }
                KeyCode::Backspace => {
                    editor.pop_char();
                    None
                }
                KeyCode::Left => {
                    editor.cursor_left();
                    None
                }
                KeyCode::Right => {
                    editor.cursor_right();
                    None
                }
                KeyCode::Char(c) => {
                    editor.push_char(c);
                    None
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => Some(Action::CloseSettings),
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(MenuItem::ALL.len() - 1);
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % MenuItem::ALL.len();
                None
            }
            KeyCode::Left | KeyCode::Char('h') => self.selected_item().cycle(config, -1),
            KeyCode::Right | KeyCode::Char('l') => self.selected_item().cycle(config, 1),
            KeyCode::Enter => match self.selected_item() {
                MenuItem::EditSymbols => {
                    self.editor = Some(SymbolEditor::new(&config.symbols));
                    None
                }
                MenuItem::RefreshNow => Some(Action::RefreshNow),
                MenuItem::Quit => Some(Action::Quit),
                item => item.cycle(config, 1),
            },
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;

    fn press(menu: &mut SettingsMenu, config: &TickerConfig, code: KeyCode) -> Option<Action> {
        menu.handle_key(KeyEvent::new(code, KeyModifiers::NONE), config)
    }

    #[test]
    fn test_cycle_font_size() {
        let config = TickerConfig::default();
        let mut menu = SettingsMenu::default();

        let action = press(&mut menu, &config, KeyCode::Right);
        assert!(matches!(action, Some(Action::SetFontSize(28))));

        let action = press(&mut menu, &config, KeyCode::Left);
        assert!(matches!(action, Some(Action::SetFontSize(16))));
    }

    #[test]
    fn test_cycle_wraps_around() {
        let config = TickerConfig {
            bg_alpha: 0.9,
            ..TickerConfig::default()
        };
        let mut menu = SettingsMenu {
            selected: 2,
            editor: None,
        };
        assert_eq!(menu.selected_item(), MenuItem::Opacity);

        let action = press(&mut menu, &config, KeyCode::Enter);
        assert!(matches!(action, Some(Action::SetOpacity(v)) if v == 0.25));
    }

    #[test]
    fn test_navigation_wraps() {
        let config = TickerConfig::default();
        let mut menu = SettingsMenu::default();

        press(&mut menu, &config, KeyCode::Up);
        assert_eq!(menu.selected_item(), MenuItem::Quit);
        assert!(matches!(
            press(&mut menu, &config, KeyCode::Enter),
            Some(Action::Quit)
        ));

        press(&mut menu, &config, KeyCode::Down);
        assert_eq!(menu.selected_item(), MenuItem::FontSize);
    }

    #[test]
    fn test_cursor_column_tracks_cursor() {
        let mut editor = SymbolEditor::new(&["AAPL".to_string(), "MSFT".to_string()]);
        assert_eq!(editor.cursor_column(), 9);

        editor.cursor_left();
        editor.cursor_left();
        assert_eq!(editor.cursor_column(), 7);

        editor.cursor_position = 100;
        assert_eq!(editor.cursor_column(), 9);
    }

    #[test]
    fn test_edit_symbols() {
        let config = TickerConfig {
            symbols: vec!["AAPL".into()],
            ..TickerConfig::default()
        };
        let mut menu = SettingsMenu {
            selected: 4,
            editor: None,
        };

        assert!(press(&mut menu, &config, KeyCode::Enter).is_none());
        assert_eq!(menu.editor.as_ref().unwrap().buffer, "AAPL");

        for c in ", msft  nvda".chars() {
            press(&mut menu, &config, KeyCode::Char(c));
        }
        let action = press(&mut menu, &config, KeyCode::Enter);
        match action {
            Some(Action::SetSymbols(symbols)) => {
                assert_eq!(symbols, vec!["AAPL", "MSFT", "NVDA"]);
            }
            other => panic!("unexpected action: {:?}", other),
        }
        assert!(menu.editor.is_none());
    }

    #[test]
    fn test_empty_symbol_edit_is_ignored() {
        let config = TickerConfig::default();
        let mut menu = SettingsMenu {
            selected: 4,
            editor: Some(SymbolEditor::default()),
        };

        assert!(press(&mut menu, &config, KeyCode::Enter).is_none());
        assert!(menu.editor.is_none());
    }

    #[test]
    fn test_editor_backspace_and_cursor() {
        let mut editor = SymbolEditor::new(&["SPY".to_string()]);
        editor.cursor_left();
        editor.pop_char();
        assert_eq!(editor.buffer, "SY");
        editor.cursor_right();
        editor.push_char('!');
        assert_eq!(editor.buffer, "SY!");
    }

    #[test]
    fn test_value_labels() {
        let config = TickerConfig::default();
        assert_eq!(
            MenuItem::ScrollSpeed.value_label(&config).as_deref(),
            Some("Medium")
        );
        assert_eq!(
            MenuItem::Opacity.value_label(&config).as_deref(),
            Some("Medium (55%)")
        );
        assert_eq!(
            MenuItem::RefreshInterval.value_label(&config).as_deref(),
            Some("15 min")
        );
        assert_eq!(MenuItem::Quit.value_label(&config), None);
    }
}
