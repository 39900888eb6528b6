//! Procedural lightning bolts.

use std::f64::consts::TAU;

use orb_core::random::random_between;
use rand::Rng;

use crate::color::Color;
use crate::surface::{Point, Stroke, Surface};

/// Straight-line subdivisions per bolt.
pub const SEGMENTS: usize = 8;
/// Maximum per-axis displacement of an interior vertex, in logical pixels.
pub const JITTER: f64 = 6.0;

/// The stroke every bolt is drawn with.
pub fn bolt_stroke() -> Stroke {
    Stroke::new(Color::rgba(223, 233, 255, 0.75), 1.2)
        .with_glow(12.0, Color::rgba(170, 196, 255, 0.9))
}

/// A jagged polyline from the inner orb toward its rim.
#[derive(Debug, Clone, PartialEq)]
pub struct Bolt {
    /// `SEGMENTS + 1` vertices; the endpoints are never jittered.
    pub points: Vec<Point>,
}

impl Bolt {
    /// Generate a bolt inside the orb of `radius` around `center`.
    ///
    /// The start sits 0.1–0.55 radii out at a uniform angle, the end 0.4–0.95
    /// radii out within one radian of it. Each coordinate draws its own
    /// radius, so bolts are not confined to rays.
    pub fn generate<R: Rng + ?Sized>(center: Point, radius: f32, rng: &mut R) -> Self {
        let r = f64::from(radius);
        let (cx, cy) = (f64::from(center.x), f64::from(center.y));

        let start_angle = random_between(rng, 0.0, TAU);
        let end_angle = start_angle + random_between(rng, -1.0, 1.0);
        let sx = cx + start_angle.cos() * random_between(rng, r * 0.1, r * 0.55);
        let sy = cy + start_angle.sin() * random_between(rng, r * 0.1, r * 0.55);
        let ex = cx + end_angle.cos() * random_between(rng, r * 0.4, r * 0.95);
        let ey = cy + end_angle.sin() * random_between(rng, r * 0.4, r * 0.95);

        let mut points = Vec::with_capacity(SEGMENTS + 1);
        points.push(Point::new(sx as f32, sy as f32));
        for i in 1..SEGMENTS {
            let t = i as f64 / SEGMENTS as f64;
            let nx = sx + (ex - sx) * t + random_between(rng, -JITTER, JITTER);
            let ny = sy + (ey - sy) * t + random_between(rng, -JITTER, JITTER);
            points.push(Point::new(nx as f32, ny as f32));
        }
        points.push(Point::new(ex as f32, ey as f32));

        Self { points }
    }

    /// Stroke the bolt with its glow.
    pub fn draw(&self, surface: &mut Surface) {
        surface.stroke_polyline(&self.points, &bolt_stroke());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bolt_has_nine_vertices() {
        let mut rng = StdRng::seed_from_u64(3);
        let bolt = Bolt::generate(Point::new(100.0, 100.0), 60.0, &mut rng);
        assert_eq!(bolt.points.len(), SEGMENTS + 1);
    }

    #[test]
    fn same_seed_same_bolt() {
        let a = Bolt::generate(Point::new(0.0, 0.0), 50.0, &mut StdRng::seed_from_u64(9));
        let b = Bolt::generate(Point::new(0.0, 0.0), 50.0, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn glow_matches_bolt_palette() {
        let stroke = bolt_stroke();
        assert_eq!(stroke.width, 1.2);
        let glow = stroke.glow.unwrap();
        assert_eq!(glow.blur, 12.0);
        assert_eq!(glow.color.to_rgba8()[..3], [170, 196, 255]);
        assert!((glow.color.a - 0.9).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn vertices_stay_near_the_chord(seed in any::<u64>(), radius in 10.0f32..400.0) {
            let center = Point::new(500.0, 500.0);
            let bolt = Bolt::generate(center, radius, &mut StdRng::seed_from_u64(seed));
            let first = bolt.points[0];
            let last = bolt.points[SEGMENTS];
            let start_dist = first.distance(center);
            let end_dist = last.distance(center);
            prop_assert!(start_dist <= radius * 0.55 + 1e-3);
            prop_assert!(end_dist <= radius * 0.95 + 1e-3);
            for (i, p) in bolt.points.iter().enumerate().take(SEGMENTS).skip(1) {
                let t = i as f32 / SEGMENTS as f32;
                let on_chord = Point::new(
                    first.x + (last.x - first.x) * t,
                    first.y + (last.y - first.y) * t,
                );
                prop_assert!((p.x - on_chord.x).abs() <= 6.0 + 1e-3);
                prop_assert!((p.y - on_chord.y).abs() <= 6.0 + 1e-3);
            }
        }
    }
}
