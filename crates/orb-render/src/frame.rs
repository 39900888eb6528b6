//! One animation frame of the orb.
//!
//! Every value is derived from the absolute animation time in the state, so
//! frames may be requested at any cadence. Randomness only feeds the arc
//! flicker and lightning, both of which are zero outside their conditions.

use std::f64::consts::TAU;

use orb_core::mode::ModeProfile;
use orb_core::random::{chance, random_between};
use orb_core::state::{CHARGE_WINDOW, RESULT_BURST_WINDOW};
use orb_core::{EffectSet, InteractionState, Status};
use rand::Rng;
use tracing::trace;

use crate::color::Color;
use crate::lightning::Bolt;
use crate::surface::{BlendMode, Point, RadialGradient, Stroke, Surface};

/// Body radius as a share of the smaller surface side.
pub const BODY_RATIO: f32 = 0.33;
/// Soft dots in the particle field.
pub const PARTICLES: usize = 18;
/// Concentric pulse rings while thinking.
pub const RINGS: usize = 4;
/// Rotating glow arcs while thinking.
pub const ARCS: usize = 5;
/// Bolts per strike while thinking.
pub const THINKING_BOLTS: usize = 10;
/// Bolts per strike otherwise.
pub const CALM_BOLTS: usize = 3;

/// What a frame ended up drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameStats {
    /// Body radius in logical units, zero for a skipped frame.
    pub radius: f32,
    /// Arc flicker value used for this frame.
    pub flicker: f32,
    /// Whether the thinking rings and arcs were drawn.
    pub thinking_overlays: bool,
    /// Number of lightning bolts drawn.
    pub bolts: usize,
    /// Whether the charge ring was drawn.
    pub charge: bool,
    /// Whether the flash ring was drawn.
    pub flash: bool,
    /// Whether the result burst was drawn.
    pub burst: bool,
}

/// The body's breathing offset: `sin(t·(2+speed))·r·pulse·0.08`, or zero
/// under reduced motion.
pub fn pulse_offset(time: f64, radius: f32, profile: &ModeProfile, reduced_motion: bool) -> f32 {
    if reduced_motion {
        return 0.0;
    }
    let wave = (time * (2.0 + profile.rotation_speed)).sin();
    (wave * f64::from(radius) * profile.pulse_amplitude * 0.08) as f32
}

/// Flicker scalar for the glow and arcs: two fast sines plus noise, zero
/// unless thinking with motion allowed.
pub fn arc_flicker<R: Rng + ?Sized>(
    time: f64,
    status: Status,
    reduced_motion: bool,
    rng: &mut R,
) -> f32 {
    if reduced_motion || status != Status::Thinking {
        return 0.0;
    }
    let noise = random_between(rng, 0.0, 0.25);
    ((time * 24.0).sin() * 0.5 + (time * 41.0).sin() * 0.35 + noise) as f32
}

/// Whether lightning strikes this frame.
pub fn should_strike<R: Rng + ?Sized>(
    profile: &ModeProfile,
    reduced_motion: bool,
    rng: &mut R,
) -> bool {
    !reduced_motion && chance(rng, profile.lightning_chance)
}

fn tint(r: u8, g: u8, b: u8, alpha: f64) -> Color {
    Color::rgba(r, g, b, 1.0).with_alpha(alpha as f32)
}

/// Draws frames of the orb onto a surface.
#[derive(Debug, Clone, Default)]
pub struct FrameRenderer {
    /// Suppress pulse, flicker, thinking overlays, lightning, charge and burst.
    pub reduced_motion: bool,
    /// Which optional overlays are enabled.
    pub effects: EffectSet,
}

impl FrameRenderer {
    /// Renderer with the given accessibility flag and effect set.
    pub fn new(reduced_motion: bool, effects: EffectSet) -> Self {
        Self {
            reduced_motion,
            effects,
        }
    }

    /// Draw one frame for `state` onto `surface`.
    ///
    /// The orb is centered in the leading square of side `min(w, h)`. An
    /// empty surface yields a skipped frame with default stats.
    pub fn render<R: Rng + ?Sized>(
        &self,
        surface: &mut Surface,
        state: &InteractionState,
        rng: &mut R,
    ) -> FrameStats {
        let (w, h) = surface.logical_size();
        let size = w.min(h);
        if surface.is_empty() || size <= 0.0 {
            trace!("skipping frame on empty surface");
            return FrameStats::default();
        }

        let center = Point::new(size / 2.0, size / 2.0);
        let radius = size * BODY_RATIO;
        let profile = ModeProfile::for_status(state.status);
        let t = state.time;
        let glow = profile.glow_multiplier;
        let pulse = pulse_offset(t, radius, profile, self.reduced_motion);
        let flicker = arc_flicker(t, state.status, self.reduced_motion, rng);
        let fl = f64::from(flicker);

        let mut stats = FrameStats {
            radius,
            flicker,
            ..FrameStats::default()
        };

        surface.clear();

        let halo = RadialGradient::concentric(center, radius * 0.2, radius * 1.3)
            .stop(0.0, tint(206, 168, 255, (0.45 + fl * 0.18) * glow))
            .stop(0.55, tint(102, 51, 182, (0.36 + fl * 0.08) * glow))
            .stop(1.0, Color::rgba(17, 7, 34, 0.0));
        surface.fill_circle(center, radius * 1.35, halo);

        let body_radius = radius + pulse;
        let highlight = Point::new(center.x - radius * 0.28, center.y - radius * 0.28);
        let body = RadialGradient::new(highlight, radius * 0.1, center, body_radius)
            .stop(0.0, tint(247, 230, 255, (0.9 + fl * 0.12) * glow))
            .stop(0.3, tint(174, 120, 255, (0.75 + fl * 0.18) * glow))
            .stop(0.7, tint(58, 23, 120, 0.85 * glow))
            .stop(1.0, Color::rgba(11, 5, 26, 1.0));

        surface.save();
        surface.clip_circle(center, body_radius);
        surface.fill_rect(
            center.x - body_radius,
            center.y - body_radius,
            body_radius * 2.0,
            body_radius * 2.0,
            body,
        );
        surface.set_blend(BlendMode::Screen);

        draw_particles(surface, center, radius, t, profile);

        if state.status == Status::Thinking && !self.reduced_motion && self.effects.thinking_rings {
            draw_rings(surface, center, radius, t);
            draw_arcs(surface, center, radius, t, profile, fl);
            stats.thinking_overlays = true;
        }

        if should_strike(profile, self.reduced_motion, rng) {
            let bolts = if state.status == Status::Thinking {
                THINKING_BOLTS
            } else {
                CALM_BOLTS
            };
            for _ in 0..bolts {
                Bolt::generate(center, radius, rng).draw(surface);
            }
            stats.bolts = bolts;
        }

        surface.restore();

        let now = state.now();
        let motion = !self.reduced_motion;

        let charge = state.charge.remaining_fraction(now, CHARGE_WINDOW);
        if let Some(left) = charge.filter(|_| motion) {
            let grown = radius * (1.0 + (1.0 - left as f32) * 0.25);
            surface.fill_circle(center, grown, tint(235, 218, 255, 0.18 + left * 0.3));
            stats.charge = true;
        }

        if state.flash.is_active(now) {
            surface.fill_circle(center, radius * 1.08, Color::rgba(238, 222, 255, 0.18));
            stats.flash = true;
        }

        let burst = state.result_burst.remaining_fraction(now, RESULT_BURST_WINDOW);
        if let Some(left) = burst.filter(|_| motion) {
            let grown = radius * (1.15 + (1.0 - left as f32) * 0.4);
            surface.fill_circle(center, grown, tint(250, 240, 255, 0.32 * left));
            stats.burst = true;
        }

        stats
    }
}

fn draw_particles(
    surface: &mut Surface,
    center: Point,
    radius: f32,
    t: f64,
    profile: &ModeProfile,
) {
    let dot = tint(196, 148, 255, 0.07 * profile.glow_multiplier);
    let r = f64::from(radius);
    for i in 0..PARTICLES {
        let fi = i as f64;
        let angle = fi / PARTICLES as f64 * TAU + t * profile.rotation_speed * 0.15;
        let wave = (t * (1.2 + fi * 0.02) + fi).sin() * r * 0.18;
        let at = Point::new(
            center.x + (angle.cos() * wave) as f32,
            center.y + ((angle * 1.2).sin() * wave) as f32,
        );
        surface.fill_circle(at, radius * 0.16, dot);
    }
}

fn draw_rings(surface: &mut Surface, center: Point, radius: f32, t: f64) {
    let halo = Color::rgba(176, 140, 255, 0.8);
    for i in 0..RINGS {
        let offset = (t * 0.9 + i as f64 * 0.35).rem_euclid(1.0);
        let fade = 1.0 - offset;
        let stroke = Stroke::new(tint(208, 178, 255, 0.18 * fade), 1.1 + fade as f32 * 1.2)
            .with_glow(14.0, halo);
        surface.stroke_circle(center, radius * (0.2 + offset as f32 * 0.9), &stroke);
    }
}

fn draw_arcs(
    surface: &mut Surface,
    center: Point,
    radius: f32,
    t: f64,
    profile: &ModeProfile,
    flicker: f64,
) {
    let stroke = Stroke::new(tint(223, 189, 255, 0.18 + flicker.abs() * 0.22), 1.4)
        .with_glow(16.0, Color::rgba(187, 156, 255, 0.9));
    for i in 0..ARCS {
        let fi = i as f64;
        let start = t * profile.rotation_speed + fi * 0.9;
        let sweep = 0.45 + (t * 5.0 + fi).sin() * 0.18;
        surface.stroke_arc(
            center,
            radius * (0.45 + i as f32 * 0.11),
            start.rem_euclid(TAU) as f32,
            sweep as f32,
            &stroke,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orb_core::mode::{IDLE, THINKING};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::time::Duration;

    fn state(status: Status, time: f64) -> InteractionState {
        InteractionState {
            status,
            time,
            ..InteractionState::default()
        }
    }

    #[test]
    fn pulse_formula() {
        let t: f64 = 0.7;
        let expected = (t * (2.0 + 1.7)).sin() * 100.0 * 0.55 * 0.08;
        let got = pulse_offset(t, 100.0, &THINKING, false);
        assert!((f64::from(got) - expected).abs() < 1e-4);
        assert_eq!(pulse_offset(t, 100.0, &THINKING, true), 0.0);
    }

    #[test]
    fn flicker_only_while_thinking_with_motion() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(arc_flicker(1.3, Status::Idle, false, &mut rng), 0.0);
        assert_eq!(arc_flicker(1.3, Status::Result, false, &mut rng), 0.0);
        assert_eq!(arc_flicker(1.3, Status::Thinking, true, &mut rng), 0.0);
        let v = arc_flicker(1.3, Status::Thinking, false, &mut rng);
        assert!(v.abs() <= 0.5 + 0.35 + 0.25);
    }

    #[test]
    fn reduced_motion_never_strikes() {
        let mut rng = StdRng::seed_from_u64(2);
        let always = ModeProfile {
            lightning_chance: 1.0,
            ..IDLE
        };
        assert!(!should_strike(&always, true, &mut rng));
        assert!(should_strike(&always, false, &mut rng));
    }

    #[test]
    fn empty_surface_is_a_noop_frame() {
        let mut surface = Surface::new(0.0, 0.0, 1.0);
        let stats = FrameRenderer::default().render(
            &mut surface,
            &state(Status::Thinking, 1.0),
            &mut StdRng::seed_from_u64(3),
        );
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn idle_frame_has_bright_core_and_clear_corners() {
        let mut surface = Surface::new(120.0, 120.0, 1.0);
        let stats = FrameRenderer::default().render(
            &mut surface,
            &state(Status::Idle, 2.0),
            &mut StdRng::seed_from_u64(4),
        );
        assert!((stats.radius - 39.6).abs() < 1e-4);
        assert!(!stats.thinking_overlays);
        assert!(surface.pixel(60, 60).is_some_and(|p| p[3] > 100));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn thinking_draws_overlays_and_armed_rings() {
        let mut s = state(Status::Thinking, 10.0);
        let now = s.now();
        s.flash.arm(now, Duration::from_millis(260));
        s.charge.arm(now, CHARGE_WINDOW);
        let mut surface = Surface::new(100.0, 100.0, 1.0);
        let stats = FrameRenderer::default().render(
            &mut surface,
            &s,
            &mut StdRng::seed_from_u64(5),
        );
        assert!(stats.thinking_overlays);
        assert!(stats.flash);
        assert!(stats.charge);
        assert!(!stats.burst);
    }

    #[test]
    fn reduced_motion_keeps_flash_only() {
        let mut s = state(Status::Thinking, 10.0);
        let now = s.now();
        s.flash.arm(now, Duration::from_millis(260));
        s.charge.arm(now, CHARGE_WINDOW);
        s.result_burst.arm(now, RESULT_BURST_WINDOW);
        let renderer = FrameRenderer::new(true, EffectSet::all());
        let mut surface = Surface::new(100.0, 100.0, 1.0);
        for seed in 0..20 {
            let stats = renderer.render(&mut surface, &s, &mut StdRng::seed_from_u64(seed));
            assert!(stats.flash);
            assert!(!stats.charge && !stats.burst && !stats.thinking_overlays);
            assert_eq!(stats.bolts, 0);
            assert_eq!(stats.flicker, 0.0);
        }
    }

    #[test]
    fn rings_can_be_switched_off() {
        let renderer = FrameRenderer::new(false, EffectSet::minimal());
        let mut surface = Surface::new(100.0, 100.0, 1.0);
        let stats = renderer.render(
            &mut surface,
            &state(Status::Thinking, 3.0),
            &mut StdRng::seed_from_u64(6),
        );
        assert!(!stats.thinking_overlays);
    }

    #[test]
    fn same_seed_same_pixels() {
        let s = state(Status::Thinking, 4.25);
        let renderer = FrameRenderer::default();
        let mut a = Surface::new(80.0, 80.0, 1.5);
        let mut b = Surface::new(80.0, 80.0, 1.5);
        renderer.render(&mut a, &s, &mut StdRng::seed_from_u64(7));
        renderer.render(&mut b, &s, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.to_rgba8(), b.to_rgba8());
    }

    #[test]
    fn expired_overlays_are_not_drawn() {
        let mut s = state(Status::Result, 5.0);
        s.result_burst.arm(Duration::from_secs(4), RESULT_BURST_WINDOW);
        let mut surface = Surface::new(60.0, 60.0, 1.0);
        let stats = FrameRenderer::default().render(
            &mut surface,
            &s,
            &mut StdRng::seed_from_u64(8),
        );
        assert!(!stats.burst);
    }
}
