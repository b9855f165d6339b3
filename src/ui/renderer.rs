//! Layout and painting of the ticker strip.

use super::surface::{Font, Rgb, Surface};
use crate::config::TickerConfig;
use crate::state::{Direction, Quote, QuoteSnapshot};
use chrono::{DateTime, Local};

pub const COLOR_UP: Rgb = Rgb::new(0.0, 0.9, 0.2);
pub const COLOR_DOWN: Rgb = Rgb::new(0.9, 0.15, 0.15);
pub const COLOR_FLAT: Rgb = Rgb::new(0.7, 0.7, 0.7);

const BACKGROUND: Rgb = Rgb::new(0.05, 0.05, 0.1);
const TIMESTAMP_COLOR: Rgb = Rgb::new(0.8, 0.8, 0.8);
const TIMESTAMP_ALPHA: f64 = 0.9;
const TRAILER_ALPHA: f64 = 0.85;
const LOADING_ALPHA: f64 = 0.8;
const LOADING_X: f64 = 20.0;

/// Placeholder shown until the first snapshot arrives.
pub const LOADING_TEXT: &str = "Loading stock data...";

/// strftime pattern of the leading timestamp.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d  %I:%M %p";

/// Color of a quote's symbol and trailer.
pub fn quote_color(direction: Direction) -> Rgb {
    match direction {
        Direction::Up => COLOR_UP,
        Direction::Down => COLOR_DOWN,
        Direction::Flat => COLOR_FLAT,
    }
}

/// One positioned piece of text, relative to the start of a content pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub text: String,
    pub font: Font,
    pub color: Rgb,
    pub alpha: f64,
}

/// Geometry of one untiled pass of the strip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickerLayout {
    pub content_width: f64,
    pub segments: Vec<Segment>,
}

/// X positions at which full copies of the content must be drawn so that
/// `[0, visible_width)` is covered for any offset.
pub fn tile_origins(offset: f64, content_width: f64, visible_width: f64) -> Vec<f64> {
    let mut origins = Vec::new();
    if content_width <= 0.0 || !content_width.is_finite() {
        return origins;
    }

    let mut x = offset.rem_euclid(content_width) - content_width;
    while x < visible_width {
        origins.push(x);
        x += content_width;
    }
    origins
}

/// Lays out quotes and paints tiled copies of them onto a [`Surface`].
#[derive(Debug, Clone)]
pub struct TickerRenderer {
    clock: fn() -> DateTime<Local>,
}

impl Default for TickerRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerRenderer {
    /// Create a renderer stamping the current local time.
    pub fn new() -> Self {
        Self { clock: Local::now }
    }

    /// Create a renderer with a custom time source.
    pub fn with_clock(clock: fn() -> DateTime<Local>) -> Self {
        Self { clock }
    }

    /// Text of the leading timestamp segment.
    pub fn timestamp(&self) -> String {
        (self.clock)().format(TIMESTAMP_FORMAT).to_string()
    }

    /// Measure every segment of one content pass.
    pub fn layout<S: Surface + ?Sized>(
        &self,
        surface: &S,
        snapshot: &QuoteSnapshot,
        config: &TickerConfig,
    ) -> TickerLayout {
        if snapshot.is_empty() {
            return TickerLayout::default();
        }

        let bar_height = f64::from(config.bar_height());
        let gap = f64::from(config.item_gap);
        let symbol_font = Font::bold(config.ticker_font_size);
        let price_font = Font::regular(config.price_font_size());

        let mut segments = Vec::with_capacity(1 + snapshot.len() * 2);
        let mut x = 0.0;
        let mut push = |x: f64, text: String, font: Font, color: Rgb, alpha: f64| {
            let extent = surface.measure(&text, font);
            segments.push(Segment {
                x,
                y: (bar_height - extent.height) / 2.0,
                width: extent.width,
                height: extent.height,
                text,
                font,
                color,
                alpha,
            });
            extent.width
        };

        x += push(x, self.timestamp(), price_font, TIMESTAMP_COLOR, TIMESTAMP_ALPHA) + gap;

        for quote in &snapshot.quotes {
            let color = quote_color(quote.direction);
            x += push(x, quote.symbol.clone(), symbol_font, color, 1.0);
            x += push(x, quote.trailer(), price_font, color, TRAILER_ALPHA) + gap;
        }

        TickerLayout {
            content_width: x,
            segments,
        }
    }

    /// Paint the strip at `offset` and return the content width laid out.
    ///
    /// Returns 0 while the snapshot is empty.
    pub fn render<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        snapshot: &QuoteSnapshot,
        offset: f64,
        config: &TickerConfig,
    ) -> f64 {
        surface.fill_background(BACKGROUND, config.bg_alpha);

        if snapshot.is_empty() {
            self.render_loading(surface, config);
            return 0.0;
        }

        let layout = self.layout(&*surface, snapshot, config);
        for origin in tile_origins(offset, layout.content_width, surface.width()) {
            for segment in &layout.segments {
                surface.draw_text(
                    origin + segment.x,
                    segment.y,
                    &segment.text,
                    segment.font,
                    segment.color,
                    segment.alpha,
                );
            }
        }

        layout.content_width
    }

    fn render_loading<S: Surface + ?Sized>(&self, surface: &mut S, config: &TickerConfig) {
        let font = Font::bold(config.ticker_font_size);
        let extent = surface.measure(LOADING_TEXT, font);
        let y = (f64::from(config.bar_height()) - extent.height) / 2.0;
        surface.draw_text(LOADING_X, y, LOADING_TEXT, font, COLOR_FLAT, LOADING_ALPHA);
    }
}

/// Quotes as they would read on the strip, for logs.
pub fn describe(quotes: &[Quote]) -> String {
    quotes
        .iter()
        .map(|q| format!("{}{}", q.symbol, q.trailer()))
        .collect::<Vec<_>>()
        .join(", ")
}
