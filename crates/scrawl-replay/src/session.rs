//! Recorded sessions and their replay.

use crate::error::ReplayResult;
use kurbo::{Point, Rect};
use scrawl_core::{
    InkDocument, PointerId, SpatialRegistry, Stroke, StrokeSurface, SurfaceConfig, SurfaceEvent, ToolMode,
};
use scrawl_render::{DrawCommand, RecordingBackend};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn mouse() -> PointerId {
    PointerId::MOUSE
}

fn default_dpr() -> f64 {
    1.0
}

/// `[x, y, width, height]` to a rectangle.
fn rect_from(xywh: [f64; 4]) -> Rect {
    let [x, y, width, height] = xywh;
    Rect::from_origin_size((x, y), (width, height))
}

/// An externally rendered element, in viewport space.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementSpec {
    pub id: String,
    pub rect: [f64; 4],
}

impl ElementSpec {
    pub fn bounds(&self) -> Rect {
        rect_from(self.rect)
    }
}

/// One recorded input step. Pointer positions are in viewport space.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default = "mouse")]
        pointer: PointerId,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default = "mouse")]
        pointer: PointerId,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default = "mouse")]
        pointer: PointerId,
    },
    /// Cancel the given pointer, or the mouse when `null`.
    Cancel(Option<PointerId>),
    /// A render tick.
    Frame,
    Mode(ToolMode),
    Active(bool),
    /// Move or resize the container.
    Layout {
        bounds: [f64; 4],
        #[serde(default = "default_dpr")]
        dpr: f64,
    },
}

/// A recorded pointer session.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub config: SurfaceConfig,
    /// Container rectangle `[x, y, width, height]` in viewport space.
    pub bounds: [f64; 4],
    #[serde(default = "default_dpr")]
    pub dpr: f64,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub events: Vec<Step>,
}

impl Session {
    /// Parse and validate a session.
    pub fn from_json(json: &str) -> ReplayResult<Self> {
        let session: Self = serde_json::from_str(json)?;
        session.config.validate()?;
        Ok(session)
    }

    /// Load a session file.
    pub fn load(path: impl AsRef<Path>) -> ReplayResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// A resolved lasso selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Lasso rectangle in the surface's local space.
    pub rect: Rect,
    /// Ids of intersecting elements, in registration order.
    pub ids: Vec<String>,
}

/// Outcome of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    /// Committed strokes left after every removal.
    pub strokes: Vec<Stroke>,
    /// Number of strokes the eraser removed.
    pub removed: usize,
    pub selections: Vec<Selection>,
    pub backing_size: (u32, u32),
    /// Every command the surface issued to its backend.
    pub draw_commands: Vec<DrawCommand>,
}

/// Replay a session against a recording surface.
pub fn replay(session: &Session) -> ReplayResult<ReplayReport> {
    let mut surface = StrokeSurface::new(session.config.clone(), RecordingBackend::new());
    surface.set_layout(rect_from(session.bounds), session.dpr);

    let mut registry = SpatialRegistry::new();
    for element in &session.elements {
        registry.register(element.id.clone(), element.bounds());
    }

    let mut document = InkDocument::new();
    let mut selections = Vec::new();
    let mut removed = 0;

    log::info!(
        "Replaying {} steps over {} elements",
        session.events.len(),
        session.elements.len()
    );

    for step in &session.events {
        let event = match *step {
            Step::Down { x, y, pointer } => surface.pointer_down(pointer, Point::new(x, y)),
            Step::Move { x, y, pointer } => {
                surface.pointer_move(pointer, Point::new(x, y));
                None
            }
            Step::Up { x, y, pointer } => surface.pointer_up(pointer, Point::new(x, y)),
            Step::Cancel(pointer) => {
                surface.pointer_cancel(pointer.unwrap_or(PointerId::MOUSE));
                None
            }
            Step::Frame => surface.on_frame(),
            Step::Mode(mode) => {
                surface.set_mode(mode);
                None
            }
            Step::Active(active) => {
                surface.set_active(active);
                None
            }
            Step::Layout { bounds, dpr } => {
                surface.set_layout(rect_from(bounds), dpr);
                None
            }
        };

        let Some(event) = event else {
            continue;
        };
        match event {
            SurfaceEvent::LassoSelect(rect) => {
                let ids = registry.query_intersecting(rect, surface.bounds().origin());
                log::debug!("Lasso {:?} selected {:?}", rect, ids);
                selections.push(Selection { rect, ids });
            }
            SurfaceEvent::StrokeRemoved(_) => {
                document.apply(&event)?;
                removed += 1;
                surface.set_strokes(document.snapshot());
            }
            SurfaceEvent::StrokeCommitted(_) => {
                document.apply(&event)?;
                surface.set_strokes(document.snapshot());
            }
        }
    }

    let backing_size = surface.backing_size();
    let draw_commands = surface
        .backend_mut()
        .map(RecordingBackend::take_commands)
        .unwrap_or_default();

    Ok(ReplayReport {
        strokes: document.strokes().to_vec(),
        removed,
        selections,
        backing_size,
        draw_commands,
    })
}
