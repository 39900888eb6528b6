//! Pixel widgets for the orb panel: buttons, the name field, and wrapped text.

pub mod button;
pub mod input;
pub mod text_area;

use macroquad::prelude::*;

/// Draw a 1-pixel bordered rectangle (border inside bounds).
pub fn bordered_rect(area: &Rect2, fill: Color, border: Color) {
    let Rect2 { x, y, w, h } = *area;
    draw_rectangle(x, y, w, h, fill);
    draw_rectangle(x, y, w, 1.0, border);
    draw_rectangle(x, y + h - 1.0, w, 1.0, border);
    draw_rectangle(x, y, 1.0, h, border);
    draw_rectangle(x + w - 1.0, y, 1.0, h, border);
}

/// A simple rectangular area for layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect2 {
    /// X position.
    pub x: f32,
    /// Y position.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect2 {
    /// Create a new rect.
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Check if a point is inside this rect.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Inset the rect by a margin on all sides.
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            x: self.x + margin,
            y: self.y + margin,
            w: (self.w - margin * 2.0).max(0.0),
            h: (self.h - margin * 2.0).max(0.0),
        }
    }

    /// Take a fixed height from the top, return (top_strip, remainder).
    pub fn take_top(&self, height: f32) -> (Self, Self) {
        let h = height.min(self.h);
        (
            Self::new(self.x, self.y, self.w, h),
            Self::new(self.x, self.y + h, self.w, self.h - h),
        )
    }

    /// Split into `n` equal columns separated by `gap`.
    pub fn columns(&self, n: usize, gap: f32) -> Vec<Self> {
        if n == 0 {
            return Vec::new();
        }
        let w = ((self.w - gap * (n - 1) as f32) / n as f32).max(0.0);
        (0..n)
            .map(|i| Self::new(self.x + i as f32 * (w + gap), self.y, w, self.h))
            .collect()
    }
}
