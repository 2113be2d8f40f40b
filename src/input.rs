//! Touch samples and JSON-lines trace reading.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use thiserror::Error;

use crate::tracker::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub x: f32,
    pub y: f32,
    /// event clock, milliseconds
    pub t: i64,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, x: f32, y: f32, t: i64) -> Self {
        Self { phase, x, y, t }
    }

    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One event per line, e.g. `{"phase":"move","x":10,"y":4,"t":16}`.
/// Blank lines and lines starting with `#` are skipped.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TouchEvent>, TraceError> {
    let mut out = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let s = line.trim();
        if s.is_empty() || s.starts_with('#') {
            continue;
        }
        let ev: TouchEvent =
            serde_json::from_str(s).map_err(|source| TraceError::Parse { line: idx + 1, source })?;
        out.push(ev);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_events_and_skips_noise() {
        let txt = "# drag\n\n{\"phase\":\"down\",\"x\":1,\"y\":2,\"t\":0}\n  {\"phase\":\"cancel\",\"x\":1.5,\"y\":2,\"t\":9}  \n";
        let evs = read_trace(txt.as_bytes()).unwrap();
        assert_eq!(evs.len(), 2);
        assert_eq!(evs[0], TouchEvent::new(TouchPhase::Down, 1.0, 2.0, 0));
        assert_eq!(evs[1].phase, TouchPhase::Cancel);
        assert_eq!(evs[1].pos(), Point::new(1.5, 2.0));
    }

    #[test]
    fn bad_line_reports_position() {
        let txt = "{\"phase\":\"down\",\"x\":1,\"y\":2,\"t\":0}\n{\"phase\":\"hover\",\"x\":1,\"y\":2,\"t\":3}\n";
        match read_trace(txt.as_bytes()) {
            Err(TraceError::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
