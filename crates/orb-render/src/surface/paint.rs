//! Fill sources: solid colors and two-circle radial gradients.

use crate::color::Color;

/// A point in logical (CSS-pixel) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Build a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point at `radius` from `self` in direction `angle` (radians).
    pub fn polar(self, angle: f32, radius: f32) -> Self {
        Self::new(self.x + angle.cos() * radius, self.y + angle.sin() * radius)
    }
}

/// A gradient running between two circles, with color stops over `0..=1`.
///
/// Matches the canvas two-point conical model: for each pixel the largest
/// `t` whose interpolated circle passes through the pixel picks the color.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    start: Point,
    start_radius: f32,
    end: Point,
    end_radius: f32,
    stops: Vec<(f32, Color)>,
}

impl RadialGradient {
    /// Gradient from circle `(start, start_radius)` to `(end, end_radius)`.
    pub fn new(start: Point, start_radius: f32, end: Point, end_radius: f32) -> Self {
        Self {
            start,
            start_radius,
            end,
            end_radius,
            stops: Vec::new(),
        }
    }

    /// Gradient between two circles sharing a center.
    pub fn concentric(center: Point, inner: f32, outer: f32) -> Self {
        Self::new(center, inner, center, outer)
    }

    /// Add a color stop. Stops must be added in increasing offset order.
    pub fn stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push((offset.clamp(0.0, 1.0), color));
        self
    }

    /// Gradient parameter at `p`, or `None` where the gradient paints nothing.
    pub fn param_at(&self, p: Point) -> Option<f32> {
        let cdx = self.end.x - self.start.x;
        let cdy = self.end.y - self.start.y;
        let dr = self.end_radius - self.start_radius;
        let pdx = p.x - self.start.x;
        let pdy = p.y - self.start.y;

        let a = cdx * cdx + cdy * cdy - dr * dr;
        let b = pdx * cdx + pdy * cdy + self.start_radius * dr;
        let c = pdx * pdx + pdy * pdy - self.start_radius * self.start_radius;
        let radius_ok = |t: f32| self.start_radius + t * dr >= 0.0;

        if a.abs() < f32::EPSILON {
            if b.abs() < f32::EPSILON {
                return None;
            }
            let t = c / (2.0 * b);
            return radius_ok(t).then_some(t);
        }

        let disc = b * b - a * c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let (hi, lo) = {
            let t1 = (b + root) / a;
            let t2 = (b - root) / a;
            (t1.max(t2), t1.min(t2))
        };
        [hi, lo].into_iter().find(|&t| radius_ok(t))
    }

    /// Color at `p` with the parameter clamped to the stop range.
    pub fn color_at(&self, p: Point) -> Color {
        match self.param_at(p) {
            Some(t) => self.sample(t.clamp(0.0, 1.0)),
            None => Color::TRANSPARENT,
        }
    }

    fn sample(&self, t: f32) -> Color {
        let Some(&(first_offset, first)) = self.stops.first() else {
            return Color::TRANSPARENT;
        };
        if t <= first_offset {
            return first;
        }
        for pair in self.stops.windows(2) {
            let (o0, c0) = pair[0];
            let (o1, c1) = pair[1];
            if t <= o1 {
                let span = o1 - o0;
                if span <= f32::EPSILON {
                    return c1;
                }
                return c0.lerp(c1, (t - o0) / span);
            }
        }
        self.stops.last().map_or(first, |&(_, c)| c)
    }
}

/// What a fill paints with.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// A single color.
    Solid(Color),
    /// A radial gradient.
    Radial(RadialGradient),
}

impl Paint {
    /// Color at logical point `p`.
    pub fn color_at(&self, p: Point) -> Color {
        match self {
            Self::Solid(c) => *c,
            Self::Radial(g) => g.color_at(p),
        }
    }
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Self::Solid(c)
    }
}

impl From<RadialGradient> for Paint {
    fn from(g: RadialGradient) -> Self {
        Self::Radial(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn concentric_param_is_linear_in_distance() {
        let g = RadialGradient::concentric(Point::new(0.0, 0.0), 10.0, 110.0);
        assert!(close(g.param_at(Point::new(10.0, 0.0)).unwrap(), 0.0));
        assert!(close(g.param_at(Point::new(0.0, 60.0)).unwrap(), 0.5));
        assert!(close(g.param_at(Point::new(110.0, 0.0)).unwrap(), 1.0));
    }

    #[test]
    fn inside_inner_circle_clamps_to_first_stop() {
        let inner = Color::rgba(255, 0, 0, 1.0);
        let g = RadialGradient::concentric(Point::new(0.0, 0.0), 10.0, 20.0)
            .stop(0.0, inner)
            .stop(1.0, Color::TRANSPARENT);
        assert_eq!(g.color_at(Point::new(1.0, 1.0)), inner);
        assert_eq!(g.color_at(Point::new(500.0, 0.0)), Color::TRANSPARENT);
    }

    #[test]
    fn offset_focus_gradient() {
        // focus at (-28, -28) radius 10, outer circle at origin radius 100
        let g = RadialGradient::new(Point::new(-28.0, -28.0), 10.0, Point::new(0.0, 0.0), 100.0);
        assert!(close(g.param_at(Point::new(-28.0, -18.0)).unwrap(), 0.0));
        assert!(close(g.param_at(Point::new(100.0, 0.0)).unwrap(), 1.0));
        let mid = g.param_at(Point::new(0.0, 0.0)).unwrap();
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn stops_interpolate() {
        let g = RadialGradient::concentric(Point::default(), 0.0, 100.0)
            .stop(0.0, Color::new(0.0, 0.0, 0.0, 1.0))
            .stop(0.5, Color::new(1.0, 1.0, 1.0, 1.0))
            .stop(1.0, Color::new(1.0, 1.0, 1.0, 0.0));
        let c = g.color_at(Point::new(25.0, 0.0));
        assert!(close(c.r, 0.5));
        let c = g.color_at(Point::new(75.0, 0.0));
        assert!(close(c.a, 0.5));
    }

    #[test]
    fn polar_point() {
        let p = Point::new(1.0, 1.0).polar(0.0, 2.0);
        assert_eq!(p, Point::new(3.0, 1.0));
    }
}
