//! Software renderer for the mystic orb.
//!
//! A small canvas-like raster [`surface::Surface`] carries everything: the
//! animated [`frame::FrameRenderer`] with its procedural [`lightning`], the
//! per-refresh [`driver::AnimationDriver`], and the [`artifact`] compositor
//! that turns a live frame plus a prediction into a PNG card.

/// The shareable prediction card.
pub mod artifact;
/// Straight-alpha colors.
pub mod color;
/// The per-frame animation hook.
pub mod driver;
/// Error types for rendering and export.
pub mod error;
/// Bitmap font and text metrics.
pub mod font;
/// One animation frame of the orb.
pub mod frame;
/// Procedural lightning bolts.
pub mod lightning;
/// Raster surface, paints and strokes.
pub mod surface;

pub use artifact::{Artifact, build_artifact, compose_artifact};
pub use color::Color;
pub use driver::AnimationDriver;
pub use error::{RenderError, RenderResult};
pub use frame::{FrameRenderer, FrameStats};
pub use lightning::Bolt;
pub use surface::{BlendMode, Paint, Point, RadialGradient, Stroke, Surface, TextAlign, TextStyle};
