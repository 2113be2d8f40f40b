//! Two-sample angular velocity tracking around a fixed center.

use log::trace;

/// Single-step angular swings at or above this many degrees are dropped.
/// atan2 jumps across the 0/360 seam, so a tiny real movement can look huge.
pub const SPIKE_LIMIT_DEG: f32 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sample {
    pub pos: Point,
    pub t_ms: i64,
}

#[derive(Debug, Clone)]
pub struct AngularSampleTracker {
    center: Point,
    initial: Sample,
    last: Sample,
    // samples seen since the last clear, saturating at 2
    seen: u8,
}

impl AngularSampleTracker {
    pub fn new(center: Point) -> Self {
        Self {
            center,
            initial: Sample::default(),
            last: Sample::default(),
            seen: 0,
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn initial(&self) -> Sample {
        self.initial
    }

    pub fn last(&self) -> Sample {
        self.last
    }

    /// Slides the window: the previous sample becomes `initial`.
    /// Callers feed samples in chronological order; nothing is re-sorted.
    pub fn add_movement(&mut self, pos: Point, t_ms: i64) {
        self.initial = self.last;
        self.last = Sample { pos, t_ms };
        self.seen = (self.seen + 1).min(2);
    }

    /// Degrees per millisecond between the two held samples.
    ///
    /// The divisor is `initial - last` (negative for forward time), so a
    /// clockwise drag on a y-down screen yields a positive value.
    pub fn angular_velocity(&self) -> f32 {
        if self.seen < 2 || self.initial.t_ms == self.last.t_ms {
            return 0.0;
        }
        // stamps from a trace can be arbitrarily far apart
        let lapse = self.initial.t_ms as f64 - self.last.t_ms as f64;
        let a0 = self.sample_angle(self.initial.pos);
        let a1 = self.sample_angle(self.last.pos);
        let swing = a1 - a0;
        if swing.abs() >= SPIKE_LIMIT_DEG {
            trace!("dropping angular spike of {swing:.1} deg over {lapse} ms");
            return 0.0;
        }
        (swing as f64 / lapse) as f32
    }

    pub fn clear(&mut self) {
        self.initial = Sample::default();
        self.last = Sample::default();
        self.seen = 0;
    }

    fn sample_angle(&self, p: Point) -> f32 {
        (self.center.x - p.x).atan2(self.center.y - p.y).to_degrees()
    }
}
