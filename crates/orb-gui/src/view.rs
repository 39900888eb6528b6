//! The orb screen: the live orb on the left, the name form and the
//! prediction card on the right.

use std::time::Duration;

use macroquad::miniquad;
use macroquad::prelude::*;
use tracing::{debug, warn};

use crate::app::AppState;
use crate::theme::font::{PixelFont, draw_pixel_text};
use crate::theme::{canvas_scale, mouse_canvas_position, palette};
use crate::widget::button::draw_button;
use crate::widget::input::draw_input;
use crate::widget::text_area::draw_text_area;
use crate::widget::{Rect2, bordered_rect};

/// Where the orb is drawn on the canvas.
pub const ORB_AREA: Rect2 = Rect2::new(12.0, 12.0, 246.0, 246.0);
/// The form and card column.
pub const PANEL: Rect2 = Rect2::new(270.0, 12.0, 198.0, 246.0);

const TITLE: &str = "Шепот шара";
const NAME_LABEL: &str = "Как тебя зовут?";
const NAME_PLACEHOLDER: &str = "Имя";

/// Holds the GPU copy of the orb surface.
#[derive(Default)]
pub struct OrbScreen {
    texture: Option<Texture2D>,
}

impl OrbScreen {
    /// Create the screen; the texture is built on the first frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle input for this frame, advance the orb, and draw everything.
    pub fn frame(&mut self, app: &mut AppState, font: &PixelFont) {
        let now = Duration::from_secs_f64(get_time());

        if crate::input::escape_pressed() {
            app.should_quit = true;
        }

        let scale = canvas_scale() * screen_dpi_scale();
        if app.fit_orb(ORB_AREA.w, scale) {
            self.texture = None;
        }
        app.tick(now);
        self.upload(app);

        if let Some(texture) = &self.texture {
            draw_texture_ex(
                texture,
                ORB_AREA.x,
                ORB_AREA.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(ORB_AREA.w, ORB_AREA.h)),
                    ..Default::default()
                },
            );
        }

        self.panel(app, font, now);
    }

    // Re-upload the software surface, creating the texture after a resize.
    fn upload(&mut self, app: &AppState) {
        let surface = app.driver.surface();
        if surface.is_empty() {
            self.texture = None;
            return;
        }
        let (w, h) = surface.device_size();
        let bytes = surface.to_rgba8();
        match &self.texture {
            Some(texture) => texture.update_from_bytes(w, h, &bytes),
            None => {
                let (Ok(w), Ok(h)) = (u16::try_from(w), u16::try_from(h)) else {
                    warn!(w, h, "orb surface too large for a texture");
                    return;
                };
                debug!(w, h, "creating orb texture");
                let texture = Texture2D::from_rgba8(w, h, &bytes);
                texture.set_filter(FilterMode::Linear);
                self.texture = Some(texture);
            }
        }
    }

    fn panel(&self, app: &mut AppState, font: &PixelFont, now: Duration) {
        let mouse = mouse_canvas_position();
        let skip = |r: Rect2, h: f32| r.take_top(h).1;

        let (title, rest) = PANEL.take_top(14.0);
        draw_pixel_text(font, TITLE, title.x, title.y, palette::GOLD);

        let (label, rest) = rest.take_top(12.0);
        draw_pixel_text(font, NAME_LABEL, label.x, label.y, palette::LAVENDER);

        let (field, rest) = rest.take_top(16.0);
        let active = !app.session.is_busy();
        app.name = draw_input(font, &app.name, NAME_PLACEHOLDER, active, &field);

        let (button, rest) = skip(rest, 4.0).take_top(18.0);
        let enabled = app.session.button_enabled();
        let label = app.session.button_label();
        let clicked = draw_button(font, label, &button, enabled, mouse);
        if enabled && (clicked || crate::input::enter_pressed()) {
            app.submit(now);
        }

        let (error, rest) = skip(rest, 4.0).take_top(20.0);
        if let Some(msg) = app.session.error() {
            draw_text_area(font, msg, &error, palette::ROSE);
        }

        let (card, rest) = rest.take_top(rest.h - 36.0);
        if let Some(prediction) = app.session.prediction().filter(|_| app.session.card_visible()) {
            bordered_rect(&card, palette::DEEP_PURPLE, palette::LAVENDER);
            let inner = card.inset(5.0);
            let (head, body) = inner.take_top(14.0);
            let greeting = format!("Для {}:", app.session.state().name);
            draw_pixel_text(font, &greeting, head.x, head.y, palette::GOLD);
            draw_text_area(font, &prediction.text, &body, palette::WHITE);
        }

        let (row, status) = skip(rest, 4.0).take_top(16.0);
        if app.session.share_controls_visible() {
            let cols = row.columns(3, 4.0);
            if draw_button(font, "Скачать", &cols[0], true, mouse) {
                app.export();
            }
            if draw_button(font, "Поделиться", &cols[1], true, mouse) {
                app.share();
            }
            let copy = draw_button(font, "Ссылка", &cols[2], true, mouse);
            if let Some(link) = app.telegram_link().filter(|_| copy) {
                miniquad::window::clipboard_set(&link);
                app.link_copied();
            }
        }

        if let Some(line) = &app.status_line {
            let line_area = status.take_top(4.0).1;
            draw_text_area(font, line, &line_area, palette::MINT);
        }
    }
}
