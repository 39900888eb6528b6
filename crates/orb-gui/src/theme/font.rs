//! Pixel font atlas built from the renderer's bitmap glyphs.
//!
//! Each glyph sits in a 6x8 cell of one texture; text is drawn as textured
//! quads at one canvas pixel per font unit.

use std::collections::HashMap;

use macroquad::prelude::*;
use orb_render::font;

/// Glyph width in canvas pixels.
pub const GLYPH_W: f32 = font::GLYPH_COLS as f32;
/// Glyph height in canvas pixels.
pub const GLYPH_H: f32 = font::GLYPH_ROWS as f32;
/// Horizontal advance per character.
pub const ADVANCE: f32 = font::ADVANCE as f32;

const CELL_W: usize = font::ADVANCE as usize;
const CELL_H: usize = font::GLYPH_ROWS as usize;
const ATLAS_COLS: usize = 32;

/// Glyph bitmaps packed into RGBA rows, before upload.
#[derive(Debug, Clone)]
pub struct Atlas {
    /// Width in pixels.
    pub width: u16,
    /// Height in pixels.
    pub height: u16,
    /// RGBA8 pixels, white where a glyph is lit.
    pub pixels: Vec<u8>,
    slots: HashMap<char, usize>,
}

impl Atlas {
    /// Pack every supported character. Slot 0 holds the fallback box.
    pub fn build() -> Self {
        let chars: Vec<char> = (' '..='~')
            .chain('А'..='я')
            .chain("Ёё«»…—–".chars())
            .collect();
        let count = chars.len() + 1;
        let rows = count.div_ceil(ATLAS_COLS);
        let (width, height) = (ATLAS_COLS * CELL_W, rows * CELL_H);

        let mut atlas = Self {
            width: width as u16,
            height: height as u16,
            pixels: vec![0; width * height * 4],
            slots: HashMap::with_capacity(chars.len()),
        };
        atlas.blit(0, '\u{fffd}');
        for (i, &ch) in chars.iter().enumerate() {
            atlas.blit(i + 1, ch);
            atlas.slots.insert(ch, i + 1);
        }
        atlas
    }

    /// Slot of `ch`, or the fallback slot.
    pub fn slot(&self, ch: char) -> usize {
        self.slots.get(&ch).copied().unwrap_or(0)
    }

    /// Top-left corner of `slot` in the atlas.
    pub fn origin(slot: usize) -> (f32, f32) {
        (
            ((slot % ATLAS_COLS) * CELL_W) as f32,
            ((slot / ATLAS_COLS) * CELL_H) as f32,
        )
    }

    fn blit(&mut self, slot: usize, ch: char) {
        let bits = font::glyph(ch);
        let (ox, oy) = Self::origin(slot);
        let (ox, oy) = (ox as usize, oy as usize);
        for row in 0..font::GLYPH_ROWS {
            for col in 0..font::GLYPH_COLS {
                if font::lit(&bits, col, row) {
                    let x = ox + col as usize;
                    let y = oy + row as usize;
                    let i = (y * self.width as usize + x) * 4;
                    self.pixels[i..i + 4].copy_from_slice(&[255; 4]);
                }
            }
        }
    }
}

/// The uploaded atlas.
pub struct PixelFont {
    texture: Texture2D,
    atlas: Atlas,
}

/// Upload the glyph atlas as a nearest-filtered texture.
pub fn build_font_texture() -> PixelFont {
    let atlas = Atlas::build();
    let texture = Texture2D::from_rgba8(atlas.width, atlas.height, &atlas.pixels);
    texture.set_filter(FilterMode::Nearest);
    PixelFont { texture, atlas }
}

/// Draw `text` with its top-left corner at `x`, `y`.
pub fn draw_pixel_text(font: &PixelFont, text: &str, x: f32, y: f32, color: Color) {
    let mut pen = x;
    for ch in text.chars() {
        if !ch.is_whitespace() {
            let (sx, sy) = Atlas::origin(font.atlas.slot(ch));
            draw_texture_ex(
                &font.texture,
                pen,
                y,
                color,
                DrawTextureParams {
                    source: Some(Rect::new(sx, sy, GLYPH_W, GLYPH_H)),
                    dest_size: Some(vec2(GLYPH_W, GLYPH_H)),
                    ..Default::default()
                },
            );
        }
        pen += ADVANCE;
    }
}

/// Width of `text` in canvas pixels.
pub fn measure_text_width(text: &str) -> f32 {
    font::measure(text, font::UNITS_PER_EM)
}
