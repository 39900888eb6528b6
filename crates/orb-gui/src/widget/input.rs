//! Single-line text input field with blinking cursor.

use macroquad::prelude::*;

use super::Rect2;
use crate::theme::font::{ADVANCE, GLYPH_H, PixelFont, draw_pixel_text};
use crate::theme::palette;

/// Longest raw input the field accepts.
pub const MAX_INPUT_CHARS: usize = 64;

/// Draw a text input field with a blinking cursor.
///
/// `value` is the current text. `active` determines if the field accepts input.
/// Returns the updated text value.
pub fn draw_input(
    font: &PixelFont,
    value: &str,
    placeholder: &str,
    active: bool,
    area: &Rect2,
) -> String {
    let border = if active { palette::GOLD } else { palette::DIM };
    super::bordered_rect(area, palette::NIGHT, border);

    let text_x = area.x + 3.0;
    let text_y = (area.y + (area.h - GLYPH_H) / 2.0).round();
    let max_chars = ((area.w - 6.0) / ADVANCE) as usize;

    let text = if active {
        edit(
            value,
            &crate::input::typed_chars(),
            crate::input::backspace_pressed(),
        )
    } else {
        value.to_string()
    };

    if text.is_empty() && !active {
        draw_pixel_text(font, placeholder, text_x, text_y, palette::DIM);
        return text;
    }

    let visible = visible_tail(&text, max_chars);
    draw_pixel_text(font, visible, text_x, text_y, palette::WHITE);

    if active && (get_time() * 3.0) as u32 % 2 == 0 {
        let cursor_x = text_x + visible.chars().count() as f32 * ADVANCE;
        draw_rectangle(cursor_x, text_y, 1.0, GLYPH_H - 1.0, palette::GOLD);
    }

    text
}

/// Apply one frame of typing to `value`.
pub fn edit(value: &str, typed: &[char], backspace: bool) -> String {
    let mut text = value.to_string();
    if backspace {
        text.pop();
    }
    let room = MAX_INPUT_CHARS.saturating_sub(text.chars().count());
    text.extend(typed.iter().take(room));
    text
}

/// The last `max_chars` characters of `text`.
pub fn visible_tail(text: &str, max_chars: usize) -> &str {
    let count = text.chars().count();
    if count <= max_chars {
        return text;
    }
    let skip = count - max_chars;
    text.char_indices()
        .nth(skip)
        .map_or("", |(i, _)| &text[i..])
}
