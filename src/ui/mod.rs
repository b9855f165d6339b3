//! UI rendering using ratatui.
//!
//! The ticker strip is laid out in pixels by [`TickerRenderer`] and painted
//! into the top rows of the terminal through a [`TerminalSurface`].

mod layout;
mod renderer;
mod scroll;
mod surface;
mod widgets;

pub use layout::Layout;
pub use renderer::{
    COLOR_DOWN, COLOR_FLAT, COLOR_UP, LOADING_TEXT, Segment, TIMESTAMP_FORMAT, TickerLayout,
    TickerRenderer, describe, quote_color, tile_origins,
};
pub use scroll::ScrollAnimator;
pub use surface::{CellSize, Font, Rgb, Surface, TerminalSurface, TextExtent};
pub use widgets::SettingsPanel;

use crate::config::TickerConfig;
use crate::state::{AppState, QuoteSnapshot};
use ratatui::Frame;

/// Everything one frame needs.
pub struct FrameContext<'a> {
    pub snapshot: &'a QuoteSnapshot,
    pub offset: f64,
    pub config: &'a TickerConfig,
    pub app: &'a AppState,
    pub renderer: &'a TickerRenderer,
    pub cell: CellSize,
}

/// Main UI renderer.
pub struct Ui;

impl Ui {
    /// Render the entire UI and return the strip's content width.
    pub fn render(frame: &mut Frame, ctx: &FrameContext<'_>) -> f64 {
        let layout = Layout::new(frame.area(), ctx.config, ctx.cell);

        let content_width = {
            let mut surface = TerminalSurface::new(frame.buffer_mut(), layout.bar_area, ctx.cell);
            ctx.renderer
                .render(&mut surface, ctx.snapshot, ctx.offset, ctx.config)
        };

        if ctx.app.show_settings {
            SettingsPanel::render(frame, layout.menu_area, &ctx.app.settings_menu, ctx.config);
        }

        content_width
    }
}
