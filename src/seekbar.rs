//! Touch session handling for a circular seek bar.
//!
//! `SeekBar` gates samples on the ring band, drives the tracker and the
//! progress controller, and reports what happened as [`SeekEvent`]s. Callers
//! forward those to their own listeners.

use log::debug;
use serde::Serialize;

use crate::geometry::RingGeometry;
use crate::input::{TouchEvent, TouchPhase};
use crate::progress::ProgressController;
use crate::tracker::Point;

const INDICATOR_OFFSET_DEG: f32 = 105.0;
const INDICATOR_SWEEP_DEG: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SeekEvent {
    StartTrackingTouch,
    ProgressChanged { progress: f32, from_user: bool },
    StopTrackingTouch,
}

pub trait SeekListener {
    fn on_progress_changed(&mut self, _progress: f32, _from_user: bool) {}
    fn on_start_tracking_touch(&mut self) {}
    fn on_stop_tracking_touch(&mut self) {}
}

impl SeekEvent {
    pub fn dispatch(&self, l: &mut dyn SeekListener) {
        match *self {
            SeekEvent::StartTrackingTouch => l.on_start_tracking_touch(),
            SeekEvent::ProgressChanged { progress, from_user } => {
                l.on_progress_changed(progress, from_user)
            }
            SeekEvent::StopTrackingTouch => l.on_stop_tracking_touch(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Tracking,
}

#[derive(Debug, Clone)]
pub struct SeekBar {
    geometry: RingGeometry,
    ctl: ProgressController,
    state: SessionState,
    enabled: bool,
    show_indicator: bool,
    progress_text: Option<String>,
    text_decimals: usize,
}

impl SeekBar {
    pub fn new(geometry: RingGeometry) -> Self {
        Self {
            geometry,
            ctl: ProgressController::new(geometry.center()),
            state: SessionState::Idle,
            enabled: true,
            show_indicator: true,
            progress_text: None,
            text_decimals: 1,
        }
    }

    pub fn geometry(&self) -> &RingGeometry {
        &self.geometry
    }

    pub fn controller(&self) -> &ProgressController {
        &self.ctl
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == SessionState::Tracking
    }

    pub fn progress(&self) -> f32 {
        self.ctl.progress()
    }

    pub fn current_angle(&self) -> f32 {
        self.ctl.current_angle()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, en: bool) {
        self.enabled = en;
    }

    pub fn is_indicator_enabled(&self) -> bool {
        self.show_indicator
    }

    pub fn set_indicator(&mut self, en: bool) {
        self.show_indicator = en;
    }

    /// New view size: the tracker is rebuilt around the new center and any
    /// session in flight ends with `StopTrackingTouch`.
    pub fn resize(&mut self, width: f32, height: f32) -> Option<SeekEvent> {
        self.geometry = RingGeometry::new(width, height, self.geometry.ring_width_factor());
        self.ctl.set_center(self.geometry.center());
        debug!("resized to {width}x{height}, center {:?}", self.geometry.center());
        self.stop_tracking("resized")
    }

    pub fn set_ring_width_factor(&mut self, factor: f32) {
        self.geometry = self.geometry.with_ring_width_factor(factor);
    }

    pub fn handle_touch(&mut self, ev: &TouchEvent) -> Option<SeekEvent> {
        if !self.enabled {
            return None;
        }
        let pos = ev.pos();

        if !self.geometry.in_band(pos) {
            self.ctl.tracker_mut().clear();
            return self.stop_tracking("left band");
        }

        match ev.phase {
            TouchPhase::Down if self.state == SessionState::Tracking => {
                // same session, fresh sample window
                self.start_tracking(pos);
                None
            }
            TouchPhase::Down => Some(self.start_tracking(pos)),
            TouchPhase::Move if self.state == SessionState::Idle => Some(self.start_tracking(pos)),
            TouchPhase::Move => {
                self.ctl.tracker_mut().add_movement(pos, ev.t);
                let v = self.ctl.tracker().angular_velocity();
                self.ctl.update_progress(pos, v);
                Some(SeekEvent::ProgressChanged {
                    progress: self.ctl.progress(),
                    from_user: true,
                })
            }
            TouchPhase::Up | TouchPhase::Cancel => {
                self.ctl.tracker_mut().clear();
                self.stop_tracking("released")
            }
        }
    }

    fn start_tracking(&mut self, pos: Point) -> SeekEvent {
        self.ctl.tracker_mut().clear();
        let v = self.ctl.tracker().angular_velocity();
        self.ctl.update_progress(pos, v);
        self.state = SessionState::Tracking;
        debug!("tracking started at {pos:?}");
        SeekEvent::StartTrackingTouch
    }

    fn stop_tracking(&mut self, why: &str) -> Option<SeekEvent> {
        if self.state != SessionState::Tracking {
            return None;
        }
        self.state = SessionState::Idle;
        debug!("tracking stopped ({why}) at {:.2}", self.ctl.progress());
        Some(SeekEvent::StopTrackingTouch)
    }

    pub fn set_progress(&mut self, v: f32) -> SeekEvent {
        self.ctl.set_progress(v);
        self.programmatic_change()
    }

    pub fn set_min(&mut self, v: f32) -> SeekEvent {
        self.ctl.set_min(v);
        self.programmatic_change()
    }

    pub fn set_max(&mut self, v: f32) -> SeekEvent {
        self.ctl.set_max(v);
        self.programmatic_change()
    }

    pub fn set_speed_multiplier(&mut self, m: f32) {
        self.ctl.set_speed_multiplier(m);
    }

    fn programmatic_change(&self) -> SeekEvent {
        SeekEvent::ProgressChanged {
            progress: self.ctl.progress(),
            from_user: false,
        }
    }

    /// Wedge under the finger as `(start_deg, sweep_deg)`, drawn only while
    /// a session is live.
    pub fn indicator_arc(&self) -> Option<(f32, f32)> {
        if !self.show_indicator || self.state != SessionState::Tracking {
            return None;
        }
        Some((self.ctl.current_angle() - INDICATOR_OFFSET_DEG, INDICATOR_SWEEP_DEG))
    }

    pub fn set_progress_text(&mut self, text: Option<String>) {
        self.progress_text = text;
    }

    pub fn set_text_decimals(&mut self, decimals: usize) {
        self.text_decimals = decimals;
    }

    /// Center label: the fixed text if one is set, else the formatted value.
    pub fn progress_text(&self) -> String {
        match &self.progress_text {
            Some(t) => t.clone(),
            None => format_grouped(self.ctl.progress(), self.text_decimals),
        }
    }
}

/// `1234567.25` with 1 decimal -> `"1,234,567.3"`.
pub fn format_grouped(v: f32, decimals: usize) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let raw = format!("{:.*}", decimals, v.abs());
    let (int_part, frac) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = v < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0');
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if let Some(f) = frac {
        out.push('.');
        out.push_str(f);
    }
    out
}
