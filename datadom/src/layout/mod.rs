mod rect;

pub use rect::Rect;

/// Visible area of the host document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    /// Vertical scroll offset of the document.
    pub scroll_y: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    pub const fn scrolled(mut self, scroll_y: f32) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Vertical midpoint of the visible area.
    pub fn midpoint(&self) -> f32 {
        self.height / 2.0
    }
}
