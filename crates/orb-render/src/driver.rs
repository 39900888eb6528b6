//! The per-frame animation hook.

use std::time::Duration;

use orb_core::InteractionState;
use rand::Rng;
use tracing::debug;

use crate::frame::{FrameRenderer, FrameStats};
use crate::surface::Surface;

/// Owns the live surface and renders it once per display refresh.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    surface: Surface,
    renderer: FrameRenderer,
    frames: u64,
}

impl AnimationDriver {
    /// Driver for a `width`×`height` logical surface at `scale`.
    pub fn new(width: f32, height: f32, scale: f32, renderer: FrameRenderer) -> Self {
        Self {
            surface: Surface::new(width, height, scale),
            renderer,
            frames: 0,
        }
    }

    /// Resize the live surface; the next tick redraws it in full.
    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        debug!(width, height, scale, "resizing orb surface");
        self.surface.resize(width, height, scale);
    }

    /// Advance to `timestamp`: store it as seconds in `state.time`, then
    /// draw a frame. A zero-size surface only updates the time.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        timestamp: Duration,
        state: &mut InteractionState,
        rng: &mut R,
    ) -> FrameStats {
        state.time = timestamp.as_secs_f64();
        self.frames += 1;
        self.renderer.render(&mut self.surface, state, rng)
    }

    /// The live surface.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The frame renderer.
    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Mutable frame renderer, for toggling reduced motion at runtime.
    pub fn renderer_mut(&mut self) -> &mut FrameRenderer {
        &mut self.renderer
    }

    /// Frames ticked so far, skipped ones included.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
