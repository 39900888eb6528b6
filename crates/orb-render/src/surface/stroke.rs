//! Stroked outlines with an optional blurred glow underneath.

use std::f32::consts::{SQRT_2, TAU};

use super::{Bounds, Point, Surface};
use crate::color::Color;

/// A blurred shadow drawn beneath a stroke, like canvas `shadowBlur`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    /// Blur radius in logical units; the gaussian sigma is half of it.
    pub blur: f32,
    /// Shadow color.
    pub color: Color,
}

/// Line paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line color.
    pub color: Color,
    /// Line width in logical units.
    pub width: f32,
    /// Optional glow.
    pub glow: Option<Glow>,
}

impl Stroke {
    /// A plain stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            glow: None,
        }
    }

    /// Add a glow.
    pub fn with_glow(mut self, blur: f32, color: Color) -> Self {
        self.glow = Some(Glow { blur, color });
        self
    }
}

impl Surface {
    /// Stroke a full circle.
    pub fn stroke_circle(&mut self, center: Point, radius: f32, stroke: &Stroke) {
        self.stroke_shape(Bounds::around(center, radius), stroke, |p| {
            (p.distance(center) - radius).abs()
        });
    }

    /// Stroke the arc from `start` to `start + sweep` (radians, clockwise in
    /// screen space).
    pub fn stroke_arc(&mut self, center: Point, radius: f32, start: f32, sweep: f32, stroke: &Stroke) {
        if sweep.abs() >= TAU {
            self.stroke_circle(center, radius, stroke);
            return;
        }
        let (start, sweep) = if sweep < 0.0 {
            (start + sweep, -sweep)
        } else {
            (start, sweep)
        };
        let a = center.polar(start, radius);
        let b = center.polar(start + sweep, radius);
        self.stroke_shape(Bounds::around(center, radius), stroke, |p| {
            let along = ((p.y - center.y).atan2(p.x - center.x) - start).rem_euclid(TAU);
            if along <= sweep {
                (p.distance(center) - radius).abs()
            } else {
                p.distance(a).min(p.distance(b))
            }
        });
    }

    /// Stroke an open polyline.
    pub fn stroke_polyline(&mut self, points: &[Point], stroke: &Stroke) {
        let Some(bounds) = Bounds::of_points(points) else {
            return;
        };
        self.stroke_shape(bounds, stroke, |p| {
            if points.len() == 1 {
                return p.distance(points[0]);
            }
            points
                .windows(2)
                .map(|seg| segment_distance(p, seg[0], seg[1]))
                .fold(f32::INFINITY, f32::min)
        });
    }

    /// Stroke an ellipse with radii `rx`, `ry` rotated by `rotation` radians.
    pub fn stroke_ellipse(
        &mut self,
        center: Point,
        rx: f32,
        ry: f32,
        rotation: f32,
        stroke: &Stroke,
    ) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let (sin, cos) = rotation.sin_cos();
        self.stroke_shape(Bounds::around(center, rx.max(ry)), stroke, |p| {
            let (dx, dy) = (p.x - center.x, p.y - center.y);
            let qx = dx * cos + dy * sin;
            let qy = -dx * sin + dy * cos;
            // first-order distance to the implicit curve
            let f = (qx / rx).powi(2) + (qy / ry).powi(2) - 1.0;
            let grad = (2.0 * qx / (rx * rx)).hypot(2.0 * qy / (ry * ry));
            if grad <= f32::EPSILON {
                f32::INFINITY
            } else {
                f.abs() / grad
            }
        });
    }

    fn stroke_shape<D>(&mut self, shape: Bounds, stroke: &Stroke, distance: D)
    where
        D: Fn(Point) -> f32,
    {
        if stroke.width <= 0.0 || stroke.color.a <= 0.0 {
            return;
        }
        let s = self.scale;
        let half = stroke.width * s / 2.0;

        if let Some(glow) = stroke.glow.filter(|g| g.blur > 0.0 && g.color.a > 0.0) {
            let sigma = glow.blur * s / 2.0;
            let shadow = glow.color.with_alpha(glow.color.a * stroke.color.a);
            let reach = stroke.width / 2.0 + 3.0 * glow.blur / 2.0;
            self.shade(shape.expand(reach), |p| {
                let cov = blurred_band(distance(p) * s, half, sigma);
                shadow.premultiplied(cov)
            });
        }

        let color = stroke.color;
        self.shade(shape.expand(stroke.width / 2.0 + 1.0 / s), |p| {
            let cov = (half + 0.5 - distance(p) * s).clamp(0.0, 1.0).min(half * 2.0);
            color.premultiplied(cov)
        });
    }
}

fn segment_distance(p: Point, a: Point, b: Point) -> f32 {
    let (abx, aby) = (b.x - a.x, b.y - a.y);
    let len2 = abx * abx + aby * aby;
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * abx + (p.y - a.y) * aby) / len2).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + abx * t, a.y + aby * t))
}

// Coverage of a band of half-width `half` blurred by a gaussian, sampled at
// distance `d` from its center line.
fn blurred_band(d: f32, half: f32, sigma: f32) -> f32 {
    let k = SQRT_2 * sigma;
    (0.5 * (erf((d + half) / k) - erf((d - half) / k))).clamp(0.0, 1.0)
}

// Abramowitz and Stegun 7.1.26, max error 1.5e-7.
fn erf(x: f32) -> f32 {
    let sign = x.signum();
    let x = f64::from(x.abs());
    let t = 1.0 / (1.0 + 0.327_591_1 * x);
    let poly = t
        * (0.254_829_592
            + t * (-0.284_496_736
                + t * (1.421_413_741 + t * (-1.453_152_027 + t * 1.061_405_429))));
    sign * (1.0 - poly * (-x * x).exp()) as f32
}
