//! The shareable 1080×1350 prediction card.

use std::f32::consts::PI;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use orb_core::share::{ArtifactFile, artifact_file_name};
use orb_core::{Prediction, wrap_words};
use tracing::info;

use crate::color::Color;
use crate::error::{RenderError, RenderResult};
use crate::font;
use crate::surface::{Point, RadialGradient, Stroke, Surface, TextAlign, TextStyle};

/// Artifact width in pixels.
pub const WIDTH: f32 = 1080.0;
/// Artifact height in pixels.
pub const HEIGHT: f32 = 1350.0;
/// Side margin for the prediction text.
pub const PADDING: f32 = 90.0;
/// Side of the square slot the live orb is copied into.
pub const ORB_SIZE: f32 = 620.0;
/// Top edge of the orb slot.
pub const ORB_TOP: f32 = 140.0;
/// Baseline distance between wrapped prediction lines.
pub const LINE_HEIGHT: f32 = 48.0;
/// Heading above the prediction.
pub const TITLE: &str = "Шепот шара";
/// Footer text.
pub const FOOTER: &str = "the-ball-of-predictions";
/// MIME type of the encoded artifact.
pub const MIME: &str = "image/png";

const TEXT_SIZE: f32 = 36.0;

/// An encoded artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// `mystic-orb-<id>.png`.
    pub file_name: String,
    /// PNG bytes.
    pub png: Vec<u8>,
}

impl Artifact {
    /// The PNG as a `data:` URI.
    pub fn data_uri(&self) -> String {
        format!("data:{MIME};base64,{}", STANDARD.encode(&self.png))
    }

    /// Convert into the form the share chain takes.
    pub fn into_file(self) -> ArtifactFile {
        ArtifactFile {
            file_name: self.file_name,
            bytes: self.png,
            mime: MIME,
        }
    }
}

/// Wrap the prediction the way the card lays it out.
pub fn layout_prediction(text: &str) -> Vec<String> {
    wrap_words(text, WIDTH - PADDING * 2.0, |s| font::measure(s, TEXT_SIZE))
}

/// Paint the card for `prediction` around a snapshot of the live `orb`.
pub fn compose_artifact(orb: &Surface, prediction: &Prediction) -> Surface {
    let (w, h) = (WIDTH, HEIGHT);
    let mut card = Surface::new(w, h, 1.0);

    let backdrop = RadialGradient::new(
        Point::new(w * 0.3, h * 0.2),
        40.0,
        Point::new(w * 0.5, h * 0.45),
        h,
    )
    .stop(0.0, Color::hex(0x2a1146))
    .stop(0.5, Color::hex(0x110a22))
    .stop(1.0, Color::hex(0x06060a));
    card.fill_rect(0.0, 0.0, w, h, backdrop);

    card.stroke_ellipse(
        Point::new(w * 0.5, h * 0.34),
        340.0,
        330.0,
        PI / 8.0,
        &Stroke::new(Color::rgba(206, 180, 255, 0.28), 2.0),
    );

    let orb_x = (w - ORB_SIZE) / 2.0;
    let orb_center = Point::new(orb_x + ORB_SIZE / 2.0, ORB_TOP + ORB_SIZE / 2.0);
    let glow = RadialGradient::concentric(orb_center, ORB_SIZE * 0.15, ORB_SIZE * 0.62)
        .stop(0.0, Color::rgba(170, 130, 255, 0.35))
        .stop(1.0, Color::rgba(80, 40, 160, 0.0));
    card.fill_circle(orb_center, ORB_SIZE * 0.5, glow);

    card.draw_image(&orb.to_image(), orb_x, ORB_TOP, ORB_SIZE, ORB_SIZE);

    card.fill_text(
        TITLE,
        w / 2.0,
        ORB_TOP + ORB_SIZE + 90.0,
        &TextStyle {
            size: 52.0,
            color: Color::hex(0xf6f2ff),
            align: TextAlign::Center,
        },
    );

    let body = TextStyle {
        size: TEXT_SIZE,
        color: Color::rgba(238, 230, 255, 0.9),
        align: TextAlign::Left,
    };
    let top = ORB_TOP + ORB_SIZE + 150.0;
    for (i, line) in layout_prediction(&prediction.text).iter().enumerate() {
        card.fill_text(line, PADDING, top + i as f32 * LINE_HEIGHT, &body);
    }

    card.fill_text(
        FOOTER,
        w / 2.0,
        h - 60.0,
        &TextStyle {
            size: 26.0,
            color: Color::rgba(206, 184, 255, 0.65),
            align: TextAlign::Center,
        },
    );

    card
}

/// Build and encode a fresh artifact. Fails without a prediction.
pub fn build_artifact(orb: &Surface, prediction: Option<&Prediction>) -> RenderResult<Artifact> {
    let prediction = prediction.ok_or(RenderError::NoPrediction)?;
    let png = compose_artifact(orb, prediction).encode_png()?;
    info!(id = %prediction.id, bytes = png.len(), "artifact built");
    Ok(Artifact {
        file_name: artifact_file_name(&prediction.id),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction() -> Prediction {
        Prediction {
            id: "a1b2c3d4".into(),
            text: "Анна, звёзды уже выстроились в твою пользу. Доверься тишине.".into(),
        }
    }

    #[test]
    fn card_has_fixed_size() {
        let orb = Surface::new(100.0, 100.0, 2.0);
        let card = compose_artifact(&orb, &prediction());
        assert_eq!(card.device_size(), (1080, 1350));
        // the backdrop is opaque everywhere
        assert_eq!(card.pixel(0, 0).map(|p| p[3]), Some(255));
        assert_eq!(card.pixel(1079, 1349).map(|p| p[3]), Some(255));
    }

    #[test]
    fn lines_fit_the_text_column() {
        let long = "слово ".repeat(60);
        let lines = layout_prediction(&long);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(font::measure(line, TEXT_SIZE) <= WIDTH - PADDING * 2.0);
        }
    }

    #[test]
    fn card_wraps_at_forty_one_columns() {
        let text = "Сегодня звёзды шепчут тебе о неожиданной встрече у старого моста, \
                    а вечер принесёт добрую весть.";
        insta::assert_snapshot!(layout_prediction(text).join("\n"), @r"
        Сегодня звёзды шепчут тебе о неожиданной
        встрече у старого моста, а вечер принесёт
        добрую весть.
        ");
    }

    #[test]
    fn missing_prediction_is_an_error() {
        let orb = Surface::new(10.0, 10.0, 1.0);
        assert!(matches!(build_artifact(&orb, None), Err(RenderError::NoPrediction)));
    }

    #[test]
    fn data_uri_prefix() {
        let artifact = Artifact {
            file_name: "x.png".into(),
            png: vec![1, 2, 3],
        };
        assert_eq!(artifact.data_uri(), "data:image/png;base64,AQID");
        let file = artifact.into_file();
        assert_eq!(file.mime, "image/png");
        assert_eq!(file.bytes, vec![1, 2, 3]);
    }
}
