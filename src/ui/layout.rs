//! Layout management for the ticker.

use super::surface::CellSize;
use crate::config::TickerConfig;
use crate::state::MenuItem;
use ratatui::layout::Rect;

const MENU_WIDTH: u16 = 44;

/// UI layout areas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Ticker strip, docked to the top.
    pub bar_area: Rect,
    /// Settings menu, opened below the strip.
    pub menu_area: Rect,
}

impl Layout {
    /// Create a new layout from the terminal area.
    pub fn new(area: Rect, config: &TickerConfig, cell: CellSize) -> Self {
        let bar_rows = cell.rows_for(config.bar_height()).min(area.height);
        let bar_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: bar_rows,
        };

        // Entries, borders and the symbol editor line.
        let menu_rows = MenuItem::ALL.len() as u16 + 4;
        let below = area.height.saturating_sub(bar_rows);
        let menu_area = Rect {
            x: area.x + 1u16.min(area.width),
            y: area.y + bar_rows,
            width: MENU_WIDTH.min(area.width.saturating_sub(1)),
            height: menu_rows.min(below),
        };

        Self {
            bar_area,
            menu_area,
        }
    }
}
