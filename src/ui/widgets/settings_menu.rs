//! Settings menu widget.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::config::TickerConfig;
use crate::state::{MenuItem, SettingsMenu};

const SYMBOLS_PREFIX: &str = " Symbols: ";

/// Popup listing the ticker settings.
pub struct SettingsPanel;

impl SettingsPanel {
    /// Render the settings popup.
    pub fn render(frame: &mut Frame, area: Rect, menu: &SettingsMenu, config: &TickerConfig) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        // Clear the area behind the popup
        frame.render_widget(Clear, area);

        let mut lines: Vec<Line> = MenuItem::ALL
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let selected = i == menu.selected;
                let marker = if selected { "> " } else { "  " };
                let label_style = if selected {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };

                let mut spans = vec![
                    Span::styled(marker, Style::default().fg(Color::Cyan)),
                    Span::styled(format!("{:<18}", item.label()), label_style),
                ];
                if let Some(value) = item.value_label(config) {
                    spans.push(Span::styled(
                        format!("< {} >", value),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        lines.push(Line::from(""));
        match &menu.editor {
            Some(editor) => lines.push(Line::from(vec![
                Span::styled(SYMBOLS_PREFIX, Style::default().fg(Color::DarkGray)),
                Span::styled(editor.buffer.clone(), Style::default().fg(Color::White)),
            ])),
            None => lines.push(Line::from(Span::styled(
                " ←/→ change  Enter select  Esc close",
                Style::default().fg(Color::DarkGray),
            ))),
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .title(" Settings ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

        frame.render_widget(paragraph, area);

        if let Some(editor) = &menu.editor {
            // Left border plus the prefix.
            let column = u16::try_from(editor.cursor_column()).unwrap_or(u16::MAX);
            let x = area
                .x
                .saturating_add(1 + SYMBOLS_PREFIX.len() as u16)
                .saturating_add(column);
            let y = area.y + area.height.saturating_sub(2);
            if x < area.right().saturating_sub(1) {
                frame.set_cursor_position((x, y));
            }
        }
    }
}
