//! Drawing surfaces for the ticker strip.
//!
//! The renderer works in pixels. [`TerminalSurface`] maps that geometry onto
//! the cells of a ratatui buffer.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Composite `self` at `alpha` over `under`.
    pub fn over(self, under: Rgb, alpha: f64) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        Rgb::new(
            under.r + (self.r - under.r) * a,
            under.g + (self.g - under.g) * a,
            under.b + (self.b - under.b) * a,
        )
    }

    /// Convert to a terminal true-color.
    pub fn to_color(self) -> Color {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color::Rgb(channel(self.r), channel(self.g), channel(self.b))
    }
}

/// Font used for a text segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Size in pixels.
    pub size: f64,
    pub bold: bool,
}

impl Font {
    pub fn regular(size: u32) -> Self {
        Self {
            size: f64::from(size),
            bold: false,
        }
    }

    pub fn bold(size: u32) -> Self {
        Self {
            size: f64::from(size),
            bold: true,
        }
    }
}

/// Measured size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Something the ticker can be painted on.
pub trait Surface {
    /// Visible width in pixels.
    fn width(&self) -> f64;

    /// Measure `text` in `font`.
    fn measure(&self, text: &str, font: Font) -> TextExtent;

    /// Fill the whole bar with `color` at `alpha`.
    fn fill_background(&mut self, color: Rgb, alpha: f64);

    /// Draw `text` with its top-left corner at `(x, y)`, composited at `alpha`.
    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: Font, color: Rgb, alpha: f64);
}

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 20.0,
        }
    }
}

impl CellSize {
    /// Ask the terminal for its cell size, falling back to the default when
    /// it does not report pixel dimensions.
    pub fn detect() -> Self {
        match crossterm::terminal::window_size() {
            Ok(size) if size.width > 0 && size.height > 0 && size.columns > 0 && size.rows > 0 => {
                Self {
                    width: f64::from(size.width) / f64::from(size.columns),
                    height: f64::from(size.height) / f64::from(size.rows),
                }
            }
            _ => Self::default(),
        }
    }

    /// Number of rows needed to hold `pixels` of height.
    pub fn rows_for(&self, pixels: u32) -> u16 {
        (f64::from(pixels) / self.height).ceil().max(1.0) as u16
    }
}

/// A [`Surface`] backed by a region of a ratatui buffer.
pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell: CellSize,
    background: Rgb,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cell: CellSize) -> Self {
        Self {
            buf,
            area,
            cell,
            background: Rgb::BLACK,
        }
    }

    /// Row (relative to the area) holding the vertical center of a segment.
    fn row_for(&self, y: f64, height: f64) -> Option<u16> {
        let row = ((y + height / 2.0) / self.cell.height).floor();
        (row >= 0.0 && row < f64::from(self.area.height)).then_some(row as u16)
    }
}

impl Surface for TerminalSurface<'_> {
    fn width(&self) -> f64 {
        f64::from(self.area.width) * self.cell.width
    }

    fn measure(&self, text: &str, font: Font) -> TextExtent {
        TextExtent {
            width: text.width() as f64 * self.cell.width,
            height: font.size,
        }
    }

    fn fill_background(&mut self, color: Rgb, alpha: f64) {
        self.background = color.over(Rgb::BLACK, alpha);
        let style = Style::default().bg(self.background.to_color());
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_style(style);
                }
            }
        }
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, font: Font, color: Rgb, alpha: f64) {
        let Some(row) = self.row_for(y, font.size) else {
            return;
        };

        let mut style = Style::default()
            .fg(color.over(self.background, alpha).to_color())
            .bg(self.background.to_color());
        if font.bold {
            style = style.add_modifier(Modifier::BOLD);
        }

        let width = i64::from(self.area.width);
        let mut col = (x / self.cell.width).floor() as i64;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as i64;
            if w == 0 {
                continue;
            }
            if col >= width {
                break;
            }
            if col >= 0 && col + w <= width {
                let pos = (self.area.x + col as u16, self.area.y + row);
                if let Some(cell) = self.buf.cell_mut(pos) {
                    cell.set_char(ch).set_style(style);
                }
            }
            col += w;
        }
    }
}
