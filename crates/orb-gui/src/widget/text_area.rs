//! Multi-line text with word wrap.

use macroquad::prelude::*;
use orb_core::wrap_words;

use super::Rect2;
use crate::theme::LINE_H;
use crate::theme::font::{PixelFont, draw_pixel_text, measure_text_width};

/// Draw word-wrapped `text` inside `area`, clipped to the lines that fit.
///
/// Returns the total number of wrapped lines.
pub fn draw_text_area(font: &PixelFont, text: &str, area: &Rect2, color: Color) -> usize {
    let lines = wrap_text(text, area.w);
    let visible = (area.h / LINE_H) as usize;
    for (i, line) in lines.iter().take(visible).enumerate() {
        draw_pixel_text(font, line, area.x, area.y + i as f32 * LINE_H, color);
    }
    lines.len()
}

/// Wrap `text` to lines no wider than `width` canvas pixels.
pub fn wrap_text(text: &str, width: f32) -> Vec<String> {
    wrap_words(text, width, measure_text_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_fit_width() {
        let text = "Звёзды сегодня особенно разговорчивы, слушай их внимательно.";
        let lines = wrap_text(text, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(measure_text_width(line) <= 100.0, "{line}");
        }
    }

    #[test]
    fn blank_text_has_no_lines() {
        assert!(wrap_text("   ", 100.0).is_empty());
    }
}
