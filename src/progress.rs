//! Bounded progress value driven by angular velocity.

use crate::tracker::{AngularSampleTracker, Point};

/// Raw touch angle in degrees, 0 = north of `center`, clockwise positive on a
/// y-down screen (east = 90, west = -90, south = -180). Not normalised.
pub fn angle_for_point(center: Point, p: Point) -> f32 {
    -(center.x - p.x).atan2(center.y - p.y).to_degrees()
}

/// Value-derived angle in `[0, 360)`: `progress / max * 360`.
/// A zero or non-finite `max` yields 0.
pub fn angle_for_progress(progress: f32, max: f32) -> f32 {
    if max == 0.0 || !max.is_finite() {
        return 0.0;
    }
    let a = progress / max * 360.0;
    if !a.is_finite() {
        return 0.0;
    }
    normalize_deg(a)
}

/// Wraps any finite angle into `[0, 360)`.
pub fn normalize_deg(a: f32) -> f32 {
    let n = a.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negatives
    if n >= 360.0 { 0.0 } else { n }
}

/// Upper bound first, then lower. With `lo > hi` this lands on `lo`.
fn clamp_lo_hi(v: f32, lo: f32, hi: f32) -> f32 {
    v.min(hi).max(lo)
}

#[derive(Debug, Clone)]
pub struct ProgressController {
    min: f32,
    max: f32,
    progress: f32,
    speed_multiplier: f32,
    current_angle: f32,
    tracker: AngularSampleTracker,
}

impl ProgressController {
    pub fn new(center: Point) -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            progress: 0.0,
            speed_multiplier: 1.0,
            current_angle: 0.0,
            tracker: AngularSampleTracker::new(center),
        }
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Last indicator angle in `[0, 360)`.
    pub fn current_angle(&self) -> f32 {
        self.current_angle
    }

    pub fn center(&self) -> Point {
        self.tracker.center()
    }

    pub fn tracker(&self) -> &AngularSampleTracker {
        &self.tracker
    }

    pub fn tracker_mut(&mut self) -> &mut AngularSampleTracker {
        &mut self.tracker
    }

    /// Drops the old tracker; its samples are meaningless around a new center.
    pub fn set_center(&mut self, center: Point) {
        self.tracker = AngularSampleTracker::new(center);
    }

    pub fn angle_for_point(&self, p: Point) -> f32 {
        angle_for_point(self.center(), p)
    }

    /// Applies `velocity` (percent of range per ms) and re-clamps into
    /// `[min, max]`. Also moves the indicator to `p`.
    pub fn update_progress(&mut self, p: Point, velocity: f32) {
        self.current_angle = normalize_deg(self.angle_for_point(p));
        let delta = (self.max - self.min) / 100.0 * velocity * self.speed_multiplier;
        self.progress = clamp_lo_hi(self.progress + delta, self.min, self.max);
    }

    /// Unclamped assignment; the indicator follows the value.
    pub fn set_progress(&mut self, v: f32) {
        self.progress = v;
        self.current_angle = angle_for_progress(v, self.max);
    }

    /// One-sided: can only pull progress down.
    pub fn set_min(&mut self, v: f32) {
        self.min = v;
        self.set_progress(self.min.min(self.progress));
    }

    /// One-sided: can only push progress up.
    pub fn set_max(&mut self, v: f32) {
        self.max = v;
        self.set_progress(self.max.max(self.progress));
    }

    /// Negative inputs are stored as 0.
    pub fn set_speed_multiplier(&mut self, m: f32) {
        self.speed_multiplier = m.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn controller(min: f32, max: f32, progress: f32) -> ProgressController {
        let mut c = ProgressController::new(Point::new(0.0, 0.0));
        c.min = min;
        c.max = max;
        c.progress = progress;
        c
    }

    #[test]
    fn cardinal_directions() {
        let c = Point::new(50.0, 50.0);
        assert_eq!(angle_for_point(c, Point::new(50.0, 10.0)), 0.0);
        assert!(close(angle_for_point(c, Point::new(90.0, 50.0)), 90.0));
        assert!(close(angle_for_point(c, Point::new(50.0, 90.0)), -180.0));
        assert!(close(angle_for_point(c, Point::new(10.0, 50.0)), -90.0));
    }

    #[test]
    fn point_on_center_is_zero() {
        let c = Point::new(5.0, 5.0);
        assert_eq!(angle_for_point(c, c), 0.0);
    }

    #[test]
    fn progress_angle_wraps() {
        assert!(close(angle_for_progress(25.0, 100.0), 90.0));
        assert!(close(angle_for_progress(0.0, 100.0), 0.0));
        assert!(close(angle_for_progress(100.0, 100.0), 0.0));
        assert!(close(angle_for_progress(-25.0, 100.0), 270.0));
        assert_eq!(angle_for_progress(10.0, 0.0), 0.0);
    }

    #[test]
    fn velocity_scales_with_range() {
        let mut c = controller(0.0, 100.0, 50.0);
        c.update_progress(Point::new(0.0, -10.0), 2.0);
        assert!(close(c.progress(), 52.0));

        let mut c = controller(0.0, 1000.0, 500.0);
        c.update_progress(Point::new(0.0, -10.0), 2.0);
        assert!(close(c.progress(), 520.0));
    }

    #[test]
    fn multiplier_scales_delta() {
        let mut c = controller(0.0, 100.0, 50.0);
        c.set_speed_multiplier(0.5);
        c.update_progress(Point::new(0.0, -10.0), 2.0);
        assert!(close(c.progress(), 51.0));

        c.set_speed_multiplier(-3.0);
        assert_eq!(c.speed_multiplier(), 0.0);
    }

    #[test]
    fn update_clamps_to_max_and_min() {
        let mut c = controller(0.0, 100.0, 99.0);
        c.update_progress(Point::new(0.0, -10.0), 50.0);
        assert_eq!(c.progress(), 100.0);

        let mut c = controller(0.0, 100.0, 1.0);
        c.update_progress(Point::new(0.0, -10.0), -50.0);
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn update_pulls_out_of_range_value_back() {
        let mut c = controller(0.0, 100.0, 0.0);
        c.set_progress(250.0);
        c.update_progress(Point::new(0.0, -10.0), 0.0);
        assert_eq!(c.progress(), 100.0);
    }

    #[test]
    fn inverted_bounds_land_on_min() {
        let mut c = controller(10.0, 5.0, 7.0);
        c.update_progress(Point::new(0.0, -10.0), 0.0);
        assert_eq!(c.progress(), 10.0);
    }

    #[test]
    fn update_sets_normalised_angle() {
        let mut c = controller(0.0, 100.0, 50.0);
        c.update_progress(Point::new(-10.0, 0.0), 0.0);
        assert!(close(c.current_angle(), 270.0));
        c.update_progress(Point::new(10.0, 0.0), 0.0);
        assert!(close(c.current_angle(), 90.0));
    }

    #[test]
    fn set_progress_is_unclamped() {
        let mut c = controller(0.0, 100.0, 0.0);
        for v in [-5.0, 0.0, 42.5, 100.0, 1e6] {
            c.set_progress(v);
            assert_eq!(c.progress(), v);
        }
        c.set_progress(50.0);
        assert!(close(c.current_angle(), 180.0));
    }

    #[test]
    fn set_min_never_raises() {
        let mut c = controller(0.0, 100.0, 50.0);
        c.set_min(20.0);
        assert_eq!(c.progress(), 20.0);
        c.set_min(80.0);
        assert_eq!(c.progress(), 20.0);
        assert_eq!(c.min(), 80.0);
    }

    #[test]
    fn set_max_never_lowers() {
        let mut c = controller(0.0, 100.0, 50.0);
        c.set_max(70.0);
        assert_eq!(c.progress(), 70.0);
        c.set_max(10.0);
        assert_eq!(c.progress(), 70.0);
        assert_eq!(c.max(), 10.0);
    }

    #[test]
    fn recentering_resets_tracker() {
        let mut c = controller(0.0, 100.0, 50.0);
        c.tracker_mut().add_movement(Point::new(0.0, -100.0), 0);
        c.tracker_mut().add_movement(Point::new(5.0, -100.0), 10);
        assert!(c.tracker().angular_velocity() != 0.0);

        c.set_center(Point::new(40.0, 40.0));
        assert_eq!(c.center(), Point::new(40.0, 40.0));
        assert_eq!(c.tracker().angular_velocity(), 0.0);
    }
}
