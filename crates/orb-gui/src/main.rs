//! Desktop window for the mystic orb: macroquad entry point.
//!
//! The virtual canvas (480x270) is scaled to fit the window; the orb itself
//! is rendered in software at the window's real resolution and uploaded as a
//! texture every frame.

use macroquad::prelude::*;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use orb_gui::app::AppState;
use orb_gui::options::{REDUCED_MOTION_ENV, config_from_args};
use orb_gui::theme::font::build_font_texture;
use orb_gui::theme::{CANVAS_H, CANVAS_W, palette, setup_virtual_canvas};
use orb_gui::view::{ORB_AREA, OrbScreen};

fn window_conf() -> Conf {
    Conf {
        window_title: "Шепот шара".to_owned(),
        window_width: (CANVAS_W * 2.0) as i32,
        window_height: (CANVAS_H * 2.0) as i32,
        window_resizable: true,
        ..Default::default()
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

#[macroquad::main(window_conf)]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let env = std::env::var(REDUCED_MOTION_ENV).ok();
    let config = config_from_args(&args, env.as_deref(), ::rand::random());
    info!(seed = config.seed, reduced_motion = config.reduced_motion, "starting");

    let font = build_font_texture();
    let mut app = AppState::new(config, ORB_AREA.w, 1.0);
    let mut screen = OrbScreen::new();

    loop {
        clear_background(palette::BLACK);
        setup_virtual_canvas();
        draw_rectangle(0.0, 0.0, CANVAS_W, CANVAS_H, palette::NIGHT);

        screen.frame(&mut app, &font);

        if app.should_quit {
            break;
        }

        next_frame().await;
    }
}
