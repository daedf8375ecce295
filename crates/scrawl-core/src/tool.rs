//! Tool modes and the per-gesture capture state machine.

use crate::input::PointerId;
use crate::stroke::{Stroke, StrokeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tool modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    #[default]
    Ink,
    Erase,
    Lasso,
}

impl ToolMode {
    /// Kind of stroke captured in this mode; erase captures none.
    pub fn stroke_kind(self) -> Option<StrokeKind> {
        match self {
            ToolMode::Ink => Some(StrokeKind::Ink),
            ToolMode::Lasso => Some(StrokeKind::Lasso),
            ToolMode::Erase => None,
        }
    }

    /// Get display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            ToolMode::Ink => "ink",
            ToolMode::Erase => "erase",
            ToolMode::Lasso => "lasso",
        }
    }
}

/// The in-progress stroke plus how much of it is already on screen.
#[derive(Debug, Clone)]
pub struct ActiveStroke {
    pub stroke: Stroke,
    /// Index of the last point already painted.
    pub last_painted: usize,
}

impl ActiveStroke {
    pub fn new(kind: StrokeKind, point: Point) -> Self {
        Self {
            stroke: Stroke::begin(kind, point),
            last_painted: 0,
        }
    }

    /// Points not yet painted, preceded by the last painted one so the new
    /// segment connects to what is already on screen. `None` when nothing new.
    pub fn unpainted(&self) -> Option<&[Point]> {
        let points = &self.stroke.points;
        if points.len() <= self.last_painted + 1 {
            return None;
        }
        Some(&points[self.last_painted..])
    }

    /// Mark every captured point as painted.
    pub fn mark_painted(&mut self) {
        self.last_painted = self.stroke.points.len().saturating_sub(1);
    }
}

/// What the captured pointer is doing.
#[derive(Debug, Clone)]
pub enum Gesture {
    /// Capturing an ink or lasso stroke.
    Draw(ActiveStroke),
    /// Erasing; holds the latest pointer position to hit-test.
    Erase { latest: Point },
}

/// State of the surface's pointer capture.
#[derive(Debug, Clone, Default)]
pub enum CaptureState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A pointer is captured and a gesture is in progress.
    Capturing { pointer: PointerId, gesture: Gesture },
}

impl CaptureState {
    /// Check if a gesture is in progress.
    pub fn is_capturing(&self) -> bool {
        matches!(self, CaptureState::Capturing { .. })
    }

    /// The captured pointer, if any.
    pub fn pointer(&self) -> Option<PointerId> {
        match self {
            CaptureState::Capturing { pointer, .. } => Some(*pointer),
            CaptureState::Idle => None,
        }
    }

    /// The stroke being drawn, if the gesture is an ink or lasso capture.
    pub fn active_stroke(&self) -> Option<&ActiveStroke> {
        match self {
            CaptureState::Capturing {
                gesture: Gesture::Draw(active),
                ..
            } => Some(active),
            _ => None,
        }
    }

    /// Leave the capturing state, returning the gesture that was in progress.
    pub fn take(&mut self) -> Option<(PointerId, Gesture)> {
        match std::mem::take(self) {
            CaptureState::Capturing { pointer, gesture } => Some((pointer, gesture)),
            CaptureState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_stroke_kind() {
        assert_eq!(ToolMode::Ink.stroke_kind(), Some(StrokeKind::Ink));
        assert_eq!(ToolMode::Lasso.stroke_kind(), Some(StrokeKind::Lasso));
        assert_eq!(ToolMode::Erase.stroke_kind(), None);
    }

    #[test]
    fn test_unpainted_tracks_last_painted() {
        let mut active = ActiveStroke::new(StrokeKind::Ink, Point::new(0.0, 0.0));
        assert!(active.unpainted().is_none());

        active.stroke.add_point(Point::new(1.0, 0.0));
        active.stroke.add_point(Point::new(2.0, 0.0));
        assert_eq!(active.unpainted().map(<[Point]>::len), Some(3));

        active.mark_painted();
        assert_eq!(active.last_painted, 2);
        assert!(active.unpainted().is_none());

        active.stroke.add_point(Point::new(3.0, 0.0));
        let pending = active.unpainted().unwrap();
        assert_eq!(pending, &[Point::new(2.0, 0.0), Point::new(3.0, 0.0)]);
    }

    #[test]
    fn test_capture_take() {
        let mut state = CaptureState::Capturing {
            pointer: PointerId(3),
            gesture: Gesture::Erase { latest: Point::ZERO },
        };
        assert!(state.is_capturing());
        assert_eq!(state.pointer(), Some(PointerId(3)));
        assert!(state.active_stroke().is_none());

        let (pointer, _) = state.take().unwrap();
        assert_eq!(pointer, PointerId(3));
        assert!(!state.is_capturing());
        assert!(state.take().is_none());
    }
}
