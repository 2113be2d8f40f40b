//! Touch model for a circular seek bar: angular velocity from two touch
//! samples around the ring center, mapped onto a bounded progress value.

pub mod cli;
pub mod config;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod progress;
pub mod seekbar;
pub mod tracker;

pub use geometry::RingGeometry;
pub use input::{TouchEvent, TouchPhase};
pub use progress::{ProgressController, angle_for_point, angle_for_progress};
pub use seekbar::{SeekBar, SeekEvent, SeekListener, SessionState};
pub use tracker::{AngularSampleTracker, Point, Sample};
