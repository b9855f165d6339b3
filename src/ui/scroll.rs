//! Horizontal scroll state of the ticker strip.

/// Advances the strip's scroll offset once per animation tick.
///
/// The offset moves by `scroll_speed` pixels per tick regardless of how much
/// wall-clock time passed, so the visual speed scales with the frame rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrollAnimator {
    offset: f64,
    content_width: f64,
}

impl ScrollAnimator {
    /// Create an animator at offset 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current offset; always in `(-content_width, 0]` once wrapped.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Update the content width reported by the renderer.
    pub fn set_content_width(&mut self, content_width: f64) {
        self.content_width = content_width.max(0.0);
    }

    /// Advance one tick and return the new offset.
    pub fn tick(&mut self, scroll_speed: f64) -> f64 {
        self.offset -= scroll_speed;
        if self.content_width > 0.0 && self.offset <= -self.content_width {
            self.offset += self.content_width;
        }
        self.offset
    }
}
