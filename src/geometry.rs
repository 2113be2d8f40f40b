//! Ring layout inside a view: center, radii and hit tests.

use crate::tracker::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    width: f32,
    height: f32,
    ring_width_factor: f32,
}

impl RingGeometry {
    /// `ring_width_factor` is the ring thickness as a share of the outer
    /// radius; it is clamped into `[0, 1]`.
    pub fn new(width: f32, height: f32, ring_width_factor: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            ring_width_factor: clamp_factor(ring_width_factor),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn ring_width_factor(&self) -> f32 {
        self.ring_width_factor
    }

    pub fn with_ring_width_factor(self, factor: f32) -> Self {
        Self {
            ring_width_factor: clamp_factor(factor),
            ..self
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn diameter(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn outer_radius(&self) -> f32 {
        self.diameter() / 2.0
    }

    pub fn inner_radius(&self) -> f32 {
        self.outer_radius() * (1.0 - self.ring_width_factor)
    }

    pub fn distance_to_center(&self, p: Point) -> f32 {
        let c = self.center();
        (p.x - c.x).hypot(p.y - c.y)
    }

    /// Touchable band: `inner <= d < outer`.
    pub fn in_band(&self, p: Point) -> bool {
        let d = self.distance_to_center(p);
        d >= self.inner_radius() && d < self.outer_radius()
    }

    pub fn in_inner_disc(&self, p: Point) -> bool {
        let r = self.outer_radius();
        self.distance_to_center(p) <= r - r * self.ring_width_factor
    }

    /// Square `(left, top, right, bottom)` the ring is drawn in.
    pub fn view_box(&self) -> (f32, f32, f32, f32) {
        let c = self.center();
        let h = self.diameter() / 2.0;
        (c.x - h, c.y - h, c.x + h, c.y + h)
    }
}

fn clamp_factor(f: f32) -> f32 {
    if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radii_follow_shorter_side() {
        let g = RingGeometry::new(200.0, 100.0, 0.5);
        assert_eq!(g.center(), Point::new(100.0, 50.0));
        assert_eq!(g.diameter(), 100.0);
        assert_eq!(g.outer_radius(), 50.0);
        assert_eq!(g.inner_radius(), 25.0);
        assert_eq!(g.view_box(), (50.0, 0.0, 150.0, 100.0));
    }

    #[test]
    fn band_is_half_open() {
        let g = RingGeometry::new(100.0, 100.0, 0.5);
        assert!(g.in_band(Point::new(50.0, 25.0))); // d == inner
        assert!(g.in_band(Point::new(50.0, 10.0)));
        assert!(!g.in_band(Point::new(50.0, 0.0))); // d == outer
        assert!(!g.in_band(Point::new(50.0, 40.0)));
        assert!(!g.in_band(Point::new(50.0, 50.0)));
    }

    #[test]
    fn inner_disc_hits() {
        let g = RingGeometry::new(100.0, 100.0, 0.5);
        assert!(g.in_inner_disc(Point::new(50.0, 50.0)));
        assert!(g.in_inner_disc(Point::new(50.0, 25.0)));
        assert!(!g.in_inner_disc(Point::new(50.0, 10.0)));
    }

    #[test]
    fn factor_is_clamped() {
        assert_eq!(RingGeometry::new(10.0, 10.0, 3.0).ring_width_factor(), 1.0);
        assert_eq!(RingGeometry::new(10.0, 10.0, -1.0).ring_width_factor(), 0.0);
        assert_eq!(RingGeometry::new(10.0, 10.0, f32::NAN).ring_width_factor(), 0.0);

        let g = RingGeometry::new(10.0, 10.0, 1.0);
        assert_eq!(g.inner_radius(), 0.0);
        assert!(g.in_band(Point::new(5.0, 5.0)));
    }
}
