//! Visual theme: color palette, layout constants, and virtual canvas scaling.

pub mod font;

use macroquad::prelude::*;

/// Virtual canvas width in pixels. The window scales this up.
pub const CANVAS_W: f32 = 480.0;
/// Virtual canvas height in pixels. The window scales this up.
pub const CANVAS_H: f32 = 270.0;

/// Line height for body text.
pub const LINE_H: f32 = 10.0;

/// Night-sky palette matching the orb's own colors.
pub mod palette {
    use macroquad::prelude::Color;

    /// Letterbox bars.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Canvas background.
    pub const NIGHT: Color = Color::new(0.043, 0.024, 0.094, 1.0);
    /// Panel fill.
    pub const DEEP_PURPLE: Color = Color::new(0.102, 0.055, 0.196, 1.0);
    /// Hovered fill.
    pub const PURPLE: Color = Color::new(0.243, 0.129, 0.420, 1.0);
    /// Borders of inactive elements.
    pub const DIM: Color = Color::new(0.333, 0.294, 0.431, 1.0);
    /// Secondary text and borders.
    pub const LAVENDER: Color = Color::new(0.761, 0.702, 0.949, 1.0);
    /// Primary text.
    pub const WHITE: Color = Color::new(0.965, 0.949, 1.0, 1.0);
    /// Highlights and the title.
    pub const GOLD: Color = Color::new(1.0, 0.839, 0.435, 1.0);
    /// Errors and notices.
    pub const ROSE: Color = Color::new(1.0, 0.420, 0.545, 1.0);
    /// Confirmations.
    pub const MINT: Color = Color::new(0.514, 0.949, 0.788, 1.0);
}

/// Window pixels per canvas pixel at the current window size.
pub fn canvas_scale() -> f32 {
    fit_scale(screen_width(), screen_height())
}

/// Scale that fits the canvas inside a `width`×`height` window.
pub fn fit_scale(width: f32, height: f32) -> f32 {
    (width / CANVAS_W).min(height / CANVAS_H)
}

/// Set up a `Camera2D` that maps the virtual canvas to the current window.
pub fn setup_virtual_canvas() {
    let scale = canvas_scale();
    let viewport_w = CANVAS_W * scale;
    let viewport_h = CANVAS_H * scale;
    let offset_x = (screen_width() - viewport_w) / 2.0;
    let offset_y = (screen_height() - viewport_h) / 2.0;

    set_camera(&Camera2D {
        zoom: vec2(2.0 / CANVAS_W, 2.0 / CANVAS_H),
        target: vec2(CANVAS_W / 2.0, CANVAS_H / 2.0),
        viewport: Some((
            offset_x as i32,
            offset_y as i32,
            viewport_w as i32,
            viewport_h as i32,
        )),
        ..Default::default()
    });
}

/// Convert screen-space mouse position to virtual canvas coordinates.
pub fn mouse_canvas_position() -> (f32, f32) {
    let (mx, my) = mouse_position();
    let scale = canvas_scale();
    let offset_x = (screen_width() - CANVAS_W * scale) / 2.0;
    let offset_y = (screen_height() - CANVAS_H * scale) / 2.0;
    ((mx - offset_x) / scale, (my - offset_y) / scale)
}
