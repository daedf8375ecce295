//! Pointer input events delivered to the stroke surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifier of a physical pointer (mouse, pen or a single touch).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PointerId(pub u64);

impl PointerId {
    /// The primary mouse pointer.
    pub const MOUSE: PointerId = PointerId(1);
}

/// Pointer event type for unified mouse/pen/touch handling.
///
/// Positions are in viewport coordinates; the surface converts them to its
/// local space on receipt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEvent {
    Down {
        #[serde(default = "mouse")]
        pointer: PointerId,
        position: Point,
    },
    Move {
        #[serde(default = "mouse")]
        pointer: PointerId,
        position: Point,
    },
    Up {
        #[serde(default = "mouse")]
        pointer: PointerId,
        position: Point,
    },
    Cancel {
        #[serde(default = "mouse")]
        pointer: PointerId,
    },
}

fn mouse() -> PointerId {
    PointerId::MOUSE
}

impl PointerEvent {
    /// Mouse-down at a viewport position.
    pub fn down(position: Point) -> Self {
        Self::Down {
            pointer: PointerId::MOUSE,
            position,
        }
    }

    /// Mouse-move to a viewport position.
    pub fn moved(position: Point) -> Self {
        Self::Move {
            pointer: PointerId::MOUSE,
            position,
        }
    }

    /// Mouse-up at a viewport position.
    pub fn up(position: Point) -> Self {
        Self::Up {
            pointer: PointerId::MOUSE,
            position,
        }
    }

    /// Mouse gesture cancelled by the platform.
    pub fn cancel() -> Self {
        Self::Cancel {
            pointer: PointerId::MOUSE,
        }
    }

    /// The pointer this event belongs to.
    pub fn pointer(&self) -> PointerId {
        match *self {
            Self::Down { pointer, .. }
            | Self::Move { pointer, .. }
            | Self::Up { pointer, .. }
            | Self::Cancel { pointer } => pointer,
        }
    }

    /// Viewport position, if the event carries one.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Down { position, .. } | Self::Move { position, .. } | Self::Up { position, .. } => {
                Some(position)
            }
            Self::Cancel { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_use_mouse_pointer() {
        let e = PointerEvent::down(Point::new(1.0, 2.0));
        assert_eq!(e.pointer(), PointerId::MOUSE);
        assert_eq!(e.position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(PointerEvent::cancel().position(), None);
    }

    #[test]
    fn test_deserialize_without_pointer() {
        let e: PointerEvent = serde_json::from_str(r#"{ "move": { "position": { "x": 3.0, "y": 4.0 } } }"#).unwrap();
        assert_eq!(e, PointerEvent::moved(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_deserialize_with_pointer() {
        let e: PointerEvent =
            serde_json::from_str(r#"{ "down": { "pointer": 7, "position": { "x": 0.0, "y": 0.0 } } }"#).unwrap();
        assert_eq!(e.pointer(), PointerId(7));
    }
}
