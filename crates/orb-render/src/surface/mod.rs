//! Software raster surface with a canvas-like drawing model.
//!
//! Pixels are stored premultiplied in `f32`. Drawing happens in logical
//! units; the surface maps them to device pixels through its scale factor,
//! the way a canvas maps CSS pixels through `devicePixelRatio`.

pub mod paint;
pub mod stroke;

use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::color::Color;
use crate::error::RenderResult;
use crate::font;

pub use paint::{Paint, Point, RadialGradient};
pub use stroke::{Glow, Stroke};

/// How new paint combines with what is already on the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal alpha compositing.
    #[default]
    SourceOver,
    /// Screen: overlaps brighten instead of occluding.
    Screen,
}

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    /// `x` is the left edge.
    #[default]
    Left,
    /// `x` is the center.
    Center,
}

/// Text paint and metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Pixel size (em height).
    pub size: f32,
    /// Fill color.
    pub color: Color,
    /// Anchoring.
    pub align: TextAlign,
}

#[derive(Debug, Clone, Copy)]
struct ClipCircle {
    center: Point,
    radius: f32,
}

#[derive(Debug, Clone, Default)]
struct DrawState {
    blend: BlendMode,
    clips: Vec<ClipCircle>,
}

/// Axis-aligned box in logical units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Bounds {
    min: Point,
    max: Point,
}

impl Bounds {
    pub(crate) fn around(center: Point, radius: f32) -> Self {
        Self {
            min: Point::new(center.x - radius, center.y - radius),
            max: Point::new(center.x + radius, center.y + radius),
        }
    }

    pub(crate) fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Point::new(x, y),
            max: Point::new(x + w, y + h),
        }
    }

    pub(crate) fn of_points(points: &[Point]) -> Option<Self> {
        let first = *points.first()?;
        let mut b = Self {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            b.min.x = b.min.x.min(p.x);
            b.min.y = b.min.y.min(p.y);
            b.max.x = b.max.x.max(p.x);
            b.max.y = b.max.y.max(p.y);
        }
        Some(b)
    }

    pub(crate) fn expand(self, margin: f32) -> Self {
        Self {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }
}

/// An RGBA drawing surface.
#[derive(Debug, Clone)]
pub struct Surface {
    width: u32,
    height: u32,
    scale: f32,
    pixels: Vec<[f32; 4]>,
    state: DrawState,
    saved: Vec<DrawState>,
}

impl Surface {
    /// Surface of `width`×`height` logical units at `scale` device pixels per unit.
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let mut surface = Self {
            width: 0,
            height: 0,
            scale: 1.0,
            pixels: Vec::new(),
            state: DrawState::default(),
            saved: Vec::new(),
        };
        surface.resize(width, height, scale);
        surface
    }

    /// Resize, discarding content. Non-positive sizes give an empty surface.
    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self.width = device_len(width, self.scale);
        self.height = device_len(height, self.scale);
        self.pixels.clear();
        self.pixels
            .resize(self.width as usize * self.height as usize, [0.0; 4]);
        self.state = DrawState::default();
        self.saved.clear();
    }

    /// Size in device pixels.
    pub fn device_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Size in logical units.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.width as f32 / self.scale,
            self.height as f32 / self.scale,
        )
    }

    /// Device pixels per logical unit.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// True when there is nothing to draw on.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.pixels.fill([0.0; 4]);
    }

    /// Push the blend mode and clip.
    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pop the blend mode and clip pushed by the last [`save`](Self::save).
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Set the blend mode for subsequent drawing.
    pub fn set_blend(&mut self, blend: BlendMode) {
        self.state.blend = blend;
    }

    /// Intersect the clip region with a circle.
    pub fn clip_circle(&mut self, center: Point, radius: f32) {
        self.state.clips.push(ClipCircle {
            center,
            radius: radius.max(0.0),
        });
    }

    /// Fill a circle.
    pub fn fill_circle(&mut self, center: Point, radius: f32, paint: impl Into<Paint>) {
        if radius <= 0.0 {
            return;
        }
        let paint = paint.into();
        let s = self.scale;
        self.shade(Bounds::around(center, radius + 1.0 / s), |p| {
            let cov = ((radius - p.distance(center)) * s + 0.5).clamp(0.0, 1.0);
            if cov <= 0.0 {
                return [0.0; 4];
            }
            paint.color_at(p).premultiplied(cov)
        });
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: impl Into<Paint>) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let paint = paint.into();
        let s = self.scale;
        let (x0, y0, x1, y1) = (x * s, y * s, (x + w) * s, (y + h) * s);
        self.shade(Bounds::rect(x, y, w, h), |p| {
            let (dx, dy) = (p.x * s - 0.5, p.y * s - 0.5);
            let cov_x = ((dx + 1.0).min(x1) - dx.max(x0)).clamp(0.0, 1.0);
            let cov_y = ((dy + 1.0).min(y1) - dy.max(y0)).clamp(0.0, 1.0);
            let cov = cov_x * cov_y;
            if cov <= 0.0 {
                return [0.0; 4];
            }
            paint.color_at(p).premultiplied(cov)
        });
    }

    /// Draw `image` scaled into the logical rectangle `x, y, w, h`.
    pub fn draw_image(&mut self, image: &RgbaImage, x: f32, y: f32, w: f32, h: f32) {
        let s = self.scale;
        let dw = (w * s).round();
        let dh = (h * s).round();
        if dw < 1.0 || dh < 1.0 || image.width() == 0 || image.height() == 0 {
            return;
        }
        let resized = imageops::resize(image, dw as u32, dh as u32, FilterType::Triangle);
        let (ox, oy) = ((x * s).round() as i64, (y * s).round() as i64);
        let blend = self.state.blend;

        for (ix, iy, px) in resized.enumerate_pixels() {
            let (tx, ty) = (ox + i64::from(ix), oy + i64::from(iy));
            if tx < 0 || ty < 0 || tx >= i64::from(self.width) || ty >= i64::from(self.height) {
                continue;
            }
            let p = Point::new((tx as f32 + 0.5) / s, (ty as f32 + 0.5) / s);
            let clip = self.clip_coverage(p);
            if clip <= 0.0 {
                continue;
            }
            let [r, g, b, a] = px.0;
            let src = Color::rgba(r, g, b, f32::from(a) / 255.0).premultiplied(clip);
            let idx = ty as usize * self.width as usize + tx as usize;
            composite(&mut self.pixels[idx], src, blend);
        }
    }

    /// Draw a single line of text with its baseline at `y`.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) {
        let unit = font::unit(style.size);
        if unit <= 0.0 {
            return;
        }
        let left = match style.align {
            TextAlign::Left => x,
            TextAlign::Center => x - font::measure(text, style.size) / 2.0,
        };
        let top = y - font::ASCENT_ROWS as f32 * unit;

        for (i, ch) in text.chars().enumerate() {
            let bits = font::glyph(ch);
            let gx = left + (i as u32 * font::ADVANCE) as f32 * unit;
            for row in 0..font::GLYPH_ROWS {
                for col in 0..font::GLYPH_COLS {
                    if font::lit(&bits, col, row) {
                        self.fill_rect(
                            gx + col as f32 * unit,
                            top + row as f32 * unit,
                            unit,
                            unit,
                            style.color,
                        );
                    }
                }
            }
        }
    }

    /// Straight-alpha copy of the surface at device resolution.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            Rgba(self.pixel(x, y).unwrap_or([0; 4]))
        })
    }

    /// Straight-alpha RGBA8 bytes, row-major.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&px| unpremultiply(px)).collect()
    }

    /// Straight-alpha value of one device pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let px = self.pixels[y as usize * self.width as usize + x as usize];
        Some(unpremultiply(px))
    }

    /// Encode the surface as PNG.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.to_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Run `src` for every device pixel inside `bounds` and the clip, and
    /// composite what it returns (premultiplied) with the current blend mode.
    pub(crate) fn shade<F>(&mut self, bounds: Bounds, mut src: F)
    where
        F: FnMut(Point) -> [f32; 4],
    {
        let Some((x0, y0, x1, y1)) = self.span(bounds) else {
            return;
        };
        let s = self.scale;
        let blend = self.state.blend;
        let width = self.width as usize;

        for y in y0..y1 {
            for x in x0..x1 {
                let p = Point::new((x as f32 + 0.5) / s, (y as f32 + 0.5) / s);
                let clip = self.clip_coverage(p);
                if clip <= 0.0 {
                    continue;
                }
                let mut color = src(p);
                if color[3] <= 0.0 {
                    continue;
                }
                if clip < 1.0 {
                    color = color.map(|c| c * clip);
                }
                composite(&mut self.pixels[y as usize * width + x as usize], color, blend);
            }
        }
    }

    fn clip_coverage(&self, p: Point) -> f32 {
        self.state.clips.iter().fold(1.0, |acc, clip| {
            let cov = ((clip.radius - p.distance(clip.center)) * self.scale + 0.5).clamp(0.0, 1.0);
            acc * cov
        })
    }

    // Device pixel range covered by `bounds`, intersected with the surface
    // and every clip circle's box.
    fn span(&self, bounds: Bounds) -> Option<(u32, u32, u32, u32)> {
        let mut b = bounds;
        for clip in &self.state.clips {
            let c = Bounds::around(clip.center, clip.radius + 1.0 / self.scale);
            b.min.x = b.min.x.max(c.min.x);
            b.min.y = b.min.y.max(c.min.y);
            b.max.x = b.max.x.min(c.max.x);
            b.max.y = b.max.y.min(c.max.y);
        }
        let s = self.scale;
        let to_device = |v: f32, limit: u32| (v * s).clamp(0.0, limit as f32);
        let x0 = to_device(b.min.x, self.width).floor() as u32;
        let y0 = to_device(b.min.y, self.height).floor() as u32;
        let x1 = to_device(b.max.x, self.width).ceil() as u32;
        let y1 = to_device(b.max.y, self.height).ceil() as u32;
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }
}

fn device_len(logical: f32, scale: f32) -> u32 {
    if logical.is_finite() && logical > 0.0 {
        (logical * scale).round() as u32
    } else {
        0
    }
}

fn composite(dst: &mut [f32; 4], src: [f32; 4], blend: BlendMode) {
    match blend {
        BlendMode::SourceOver => {
            let keep = 1.0 - src[3];
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s + *d * keep;
            }
        }
        BlendMode::Screen => {
            for (d, s) in dst.iter_mut().zip(src) {
                *d = s + *d - s * *d;
            }
        }
    }
}

fn unpremultiply(px: [f32; 4]) -> [u8; 4] {
    let a = px[3].clamp(0.0, 1.0);
    if a <= 0.0 {
        return [0; 4];
    }
    Color::new(px[0] / a, px[1] / a, px[2] / a, a).to_rgba8()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    #[test]
    fn device_size_follows_scale() {
        let s = Surface::new(100.0, 50.0, 2.0);
        assert_eq!(s.device_size(), (200, 100));
        assert_eq!(s.logical_size(), (100.0, 50.0));
    }

    #[test]
    fn degenerate_sizes_are_empty() {
        assert!(Surface::new(0.0, 10.0, 1.0).is_empty());
        assert!(Surface::new(-5.0, 10.0, 1.0).is_empty());
        assert!(Surface::new(f32::NAN, 10.0, 1.0).is_empty());
        let mut s = Surface::new(0.0, 0.0, 1.0);
        s.fill_circle(Point::new(0.0, 0.0), 10.0, WHITE);
        assert_eq!(s.to_rgba8(), Vec::<u8>::new());
    }

    #[test]
    fn filled_circle_covers_center_not_corner() {
        let mut s = Surface::new(20.0, 20.0, 1.0);
        s.fill_circle(Point::new(10.0, 10.0), 5.0, WHITE);
        assert_eq!(s.pixel(10, 10), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn source_over_half_alpha() {
        let mut s = Surface::new(4.0, 4.0, 1.0);
        s.fill_rect(0.0, 0.0, 4.0, 4.0, Color::new(0.0, 0.0, 0.0, 1.0));
        s.fill_rect(0.0, 0.0, 4.0, 4.0, Color::new(1.0, 1.0, 1.0, 0.5));
        assert_eq!(s.pixel(1, 1), Some([128, 128, 128, 255]));
    }

    #[test]
    fn screen_brightens() {
        let gray = Color::new(0.5, 0.5, 0.5, 1.0);
        let mut s = Surface::new(4.0, 4.0, 1.0);
        s.fill_rect(0.0, 0.0, 4.0, 4.0, gray);
        s.set_blend(BlendMode::Screen);
        s.fill_rect(0.0, 0.0, 4.0, 4.0, gray);
        // 0.5 + 0.5 - 0.25
        assert_eq!(s.pixel(2, 2), Some([191, 191, 191, 255]));
    }

    #[test]
    fn clip_limits_drawing_until_restore() {
        let mut s = Surface::new(20.0, 20.0, 1.0);
        s.save();
        s.clip_circle(Point::new(5.0, 5.0), 3.0);
        s.fill_rect(0.0, 0.0, 20.0, 20.0, WHITE);
        assert_eq!(s.pixel(5, 5).map(|p| p[3]), Some(255));
        assert_eq!(s.pixel(15, 15).map(|p| p[3]), Some(0));
        s.restore();
        s.fill_rect(14.0, 14.0, 2.0, 2.0, WHITE);
        assert_eq!(s.pixel(15, 15).map(|p| p[3]), Some(255));
    }

    #[test]
    fn restore_without_save_is_harmless() {
        let mut s = Surface::new(2.0, 2.0, 1.0);
        s.set_blend(BlendMode::Screen);
        s.restore();
        s.save();
        s.set_blend(BlendMode::SourceOver);
        s.restore();
        assert_eq!(s.state.blend, BlendMode::Screen);
    }

    #[test]
    fn text_lands_left_of_anchor_when_centered() {
        let style = TextStyle {
            size: 10.0,
            color: WHITE,
            align: TextAlign::Center,
        };
        let mut s = Surface::new(40.0, 20.0, 1.0);
        // "I" is 5 units wide, so it starts at 18; its top row is .###.
        s.fill_text("I", 20.5, 15.0, &style);
        assert_eq!(s.pixel(19, 8).map(|p| p[3]), Some(255));
        assert_eq!(s.pixel(18, 8).map(|p| p[3]), Some(0));
    }

    #[test]
    fn draw_image_scales_into_rect() {
        let src = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
        let mut s = Surface::new(10.0, 10.0, 1.0);
        s.draw_image(&src, 2.0, 2.0, 6.0, 6.0);
        assert_eq!(s.pixel(5, 5), Some([255, 0, 0, 255]));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(s.pixel(8, 8), Some([0, 0, 0, 0]));
    }

    #[test]
    fn png_has_signature() {
        let mut s = Surface::new(3.0, 3.0, 1.0);
        s.fill_rect(0.0, 0.0, 3.0, 3.0, WHITE);
        let png = s.encode_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 3));
    }
}
