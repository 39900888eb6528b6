//! Clickable button widget with hover and disabled states.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::font::{GLYPH_H, PixelFont, draw_pixel_text, measure_text_width};
use crate::theme::palette;

/// Draw a button and return true if it was clicked this frame.
///
/// A disabled button is drawn dimmed and never reports a click.
pub fn draw_button(
    font: &PixelFont,
    label: &str,
    area: &Rect2,
    enabled: bool,
    mouse: (f32, f32),
) -> bool {
    let hovered = enabled && area.contains(mouse.0, mouse.1);
    let clicked = hovered && is_mouse_button_pressed(MouseButton::Left);

    let (fill, border, text_color) = if !enabled {
        (palette::DEEP_PURPLE, palette::DIM, palette::DIM)
    } else if hovered {
        (palette::PURPLE, palette::GOLD, palette::GOLD)
    } else {
        (palette::DEEP_PURPLE, palette::LAVENDER, palette::WHITE)
    };

    super::bordered_rect(area, fill, border);

    let text_w = measure_text_width(label);
    let tx = area.x + ((area.w - text_w) / 2.0).max(2.0);
    let ty = area.y + (area.h - GLYPH_H) / 2.0;
    draw_pixel_text(font, label, tx.round(), ty.round(), text_color);

    clicked
}
