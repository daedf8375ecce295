//! The stroke surface: pointer capture, incremental rendering and erasing.
//!
//! A [`StrokeSurface`] sits over one rectangular container. It converts
//! viewport pointer events into local points, paints the in-progress stroke a
//! segment at a time, and reports finished gestures as [`SurfaceEvent`]s.
//!
//! The committed strokes belong to the caller. The surface only reads them
//! (for redraw and erase hit-testing) through a revision-tagged
//! [`StrokeSnapshot`], and asks for changes by returning events.
//!
//! Painting during a gesture is coalesced: pointer moves only mark a frame as
//! pending, and the host calls [`StrokeSurface::on_frame`] once per render
//! tick to paint whatever arrived since the last frame.

use crate::backend::{BackendResult, SurfaceBackend};
use crate::config::SurfaceConfig;
use crate::geometry::{sanitize_scale, to_local};
use crate::input::{PointerEvent, PointerId};
use crate::stroke::{Revision, Stroke, StrokeKind, StrokeSnapshot, find_hit};
use crate::style::StrokeStyle;
use crate::tool::{ActiveStroke, CaptureState, Gesture, ToolMode};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Requests emitted by the surface when a gesture produces a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceEvent {
    /// An ink gesture finished; the caller should append the stroke.
    StrokeCommitted(Stroke),
    /// The eraser hit the stroke at this position of the caller's list.
    StrokeRemoved(usize),
    /// A lasso gesture finished with this local-space bounding rectangle.
    LassoSelect(Rect),
}

/// A drawing surface bound to one container.
#[derive(Debug)]
pub struct StrokeSurface<B> {
    config: SurfaceConfig,
    /// `None` when no rendering context could be obtained.
    backend: Option<B>,
    /// Container rectangle in viewport space.
    bounds: Rect,
    /// Device pixel ratio in effect.
    scale: f64,
    /// Backing raster size in device pixels.
    backing_size: (u32, u32),
    laid_out: bool,
    strokes: StrokeSnapshot,
    drawn_revision: Option<Revision>,
    capture: CaptureState,
    frame_pending: bool,
}

impl<B: SurfaceBackend> StrokeSurface<B> {
    /// Create a surface drawing into `backend`.
    pub fn new(config: SurfaceConfig, backend: B) -> Self {
        Self::with_backend(config, Some(backend))
    }

    /// Create a surface from the result of acquiring a rendering context.
    ///
    /// On failure the surface stays usable but draws nothing.
    pub fn from_backend(config: SurfaceConfig, backend: BackendResult<B>) -> Self {
        let backend = match backend {
            Ok(backend) => Some(backend),
            Err(e) => {
                log::warn!("Stroke surface has no rendering context, drawing disabled: {}", e);
                None
            }
        };
        Self::with_backend(config, backend)
    }

    /// Create a surface without a rendering context.
    pub fn inert(config: SurfaceConfig) -> Self {
        Self::with_backend(config, None)
    }

    fn with_backend(config: SurfaceConfig, backend: Option<B>) -> Self {
        Self {
            config,
            backend,
            bounds: Rect::ZERO,
            scale: 1.0,
            backing_size: (0, 0),
            laid_out: false,
            strokes: StrokeSnapshot::default(),
            drawn_revision: None,
            capture: CaptureState::Idle,
            frame_pending: false,
        }
    }

    // --- configuration ---

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// Whether input is accepted.
    pub fn is_active(&self) -> bool {
        self.config.active
    }

    pub fn mode(&self) -> ToolMode {
        self.config.mode
    }

    /// Enable or disable input. Disabling aborts a gesture in progress.
    pub fn set_active(&mut self, active: bool) {
        if self.config.active == active {
            return;
        }
        if !active {
            self.abort_capture();
        }
        self.config.active = active;
    }

    /// Switch tool mode. Switching aborts a gesture in progress.
    pub fn set_mode(&mut self, mode: ToolMode) {
        if self.config.mode == mode {
            return;
        }
        self.abort_capture();
        log::debug!("Tool mode: {} -> {}", self.config.mode.name(), mode.name());
        self.config.mode = mode;
    }

    /// Replace the style used for strokes of `kind` and redraw.
    pub fn set_style(&mut self, kind: StrokeKind, style: StrokeStyle) {
        match kind {
            StrokeKind::Ink => self.config.ink = style,
            StrokeKind::Lasso => self.config.lasso = style,
        }
        self.redraw();
    }

    /// Set the erase hit-test threshold in CSS pixels.
    ///
    /// A non-finite or non-positive threshold is ignored and the current one
    /// kept.
    pub fn set_erase_threshold(&mut self, threshold: f64) {
        if !(threshold.is_finite() && threshold > 0.0) {
            log::warn!(
                "Ignoring invalid erase threshold {}, keeping {}",
                threshold,
                self.config.erase_threshold
            );
            return;
        }
        self.config.erase_threshold = threshold;
    }

    // --- backend and layout ---

    /// Whether drawing is disabled for lack of a rendering context.
    pub fn is_inert(&self) -> bool {
        self.backend.is_none()
    }

    pub fn backend(&self) -> Option<&B> {
        self.backend.as_ref()
    }

    pub fn backend_mut(&mut self) -> Option<&mut B> {
        self.backend.as_mut()
    }

    /// Container rectangle in viewport space.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Device pixel ratio in effect.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Backing raster size in device pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        self.backing_size
    }

    /// Track the container's on-screen rectangle and the device pixel ratio.
    ///
    /// A change of size or ratio resizes the backing raster to the CSS size
    /// times the ratio and fully redraws before returning. A pure move only
    /// updates the origin used to convert pointer positions.
    pub fn set_layout(&mut self, bounds: Rect, device_pixel_ratio: f64) {
        let bounds = bounds.abs();
        let scale = sanitize_scale(device_pixel_ratio);
        let resized = !self.laid_out || bounds.size() != self.bounds.size() || scale != self.scale;

        self.bounds = bounds;
        if !resized {
            return;
        }

        self.laid_out = true;
        self.scale = scale;
        self.backing_size = backing_size(bounds.size(), scale);
        log::debug!(
            "Surface resized to {}x{} CSS px at {}x ({}x{} device px)",
            bounds.width(),
            bounds.height(),
            scale,
            self.backing_size.0,
            self.backing_size.1
        );
        if let Some(backend) = self.backend.as_mut() {
            backend.resize(self.backing_size.0, self.backing_size.1);
        }
        self.redraw();
    }

    // --- committed strokes ---

    /// The committed strokes last handed to the surface.
    pub fn strokes(&self) -> &StrokeSnapshot {
        &self.strokes
    }

    /// Hand over the caller's committed strokes.
    ///
    /// Redraws when the revision differs from the one last drawn.
    pub fn set_strokes(&mut self, snapshot: StrokeSnapshot) {
        let changed = self.drawn_revision != Some(snapshot.revision);
        self.strokes = snapshot;
        if changed {
            self.redraw();
        }
    }

    /// Clear the raster and draw every committed stroke.
    ///
    /// While a stroke is being captured, its already painted part is drawn on
    /// top so incremental painting can continue where it left off.
    pub fn redraw(&mut self) {
        self.drawn_revision = Some(self.strokes.revision);
        let Some(backend) = self.backend.as_mut() else {
            return;
        };

        backend.clear();
        backend.set_scale(self.scale);
        for stroke in self.strokes.strokes.iter() {
            draw_points(backend, &stroke.points, style_for(&self.config, stroke.kind));
        }

        if let Some(active) = self.capture.active_stroke() {
            let style = style_for(&self.config, active.stroke.kind);
            draw_points(backend, &active.stroke.points[..=active.last_painted], style);
        }
    }

    // --- capture ---

    /// Whether a gesture is in progress.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_capturing()
    }

    /// The stroke being captured, if any.
    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.capture.active_stroke().map(|active| &active.stroke)
    }

    /// Whether a paint or erase test is waiting for the next frame.
    pub fn needs_frame(&self) -> bool {
        self.frame_pending
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<SurfaceEvent> {
        match event {
            PointerEvent::Down { pointer, position } => self.pointer_down(pointer, position),
            PointerEvent::Move { pointer, position } => {
                self.pointer_move(pointer, position);
                None
            }
            PointerEvent::Up { pointer, position } => self.pointer_up(pointer, position),
            PointerEvent::Cancel { pointer } => {
                self.pointer_cancel(pointer);
                None
            }
        }
    }

    /// Start a gesture at a viewport position.
    ///
    /// Ink and lasso seed a stroke and paint a dot. Erase hit-tests at once and
    /// may return [`SurfaceEvent::StrokeRemoved`].
    pub fn pointer_down(&mut self, pointer: PointerId, position: Point) -> Option<SurfaceEvent> {
        if !self.config.active {
            return None;
        }
        if self.capture.is_capturing() {
            log::trace!("Ignoring pointer {:?} down during capture", pointer);
            return None;
        }

        let local = to_local(position, self.bounds.origin());
        if let Some(backend) = self.backend.as_mut() {
            if let Err(e) = backend.capture_pointer(pointer) {
                log::warn!("Continuing without pointer capture: {}", e);
            }
        }

        match self.config.mode.stroke_kind() {
            Some(kind) => {
                log::debug!("Begin {:?} stroke at ({}, {})", kind, local.x, local.y);
                if let Some(backend) = self.backend.as_mut() {
                    backend.fill_dot(local, style_for(&self.config, kind));
                }
                self.capture = CaptureState::Capturing {
                    pointer,
                    gesture: Gesture::Draw(ActiveStroke::new(kind, local)),
                };
                None
            }
            None => {
                self.capture = CaptureState::Capturing {
                    pointer,
                    gesture: Gesture::Erase { latest: local },
                };
                self.erase_at(local)
            }
        }
    }

    /// Record a pointer move and schedule a frame.
    pub fn pointer_move(&mut self, pointer: PointerId, position: Point) {
        let local = to_local(position, self.bounds.origin());
        let CaptureState::Capturing {
            pointer: captured,
            gesture,
        } = &mut self.capture
        else {
            return;
        };
        if *captured != pointer {
            return;
        }

        match gesture {
            Gesture::Draw(active) => active.stroke.add_point(local),
            Gesture::Erase { latest } => *latest = local,
        }
        self.frame_pending = true;
    }

    /// Finish the gesture of `pointer`.
    ///
    /// Ink returns [`SurfaceEvent::StrokeCommitted`] when at least two points
    /// were captured. Lasso erases its preview and returns
    /// [`SurfaceEvent::LassoSelect`]. Erase returns nothing.
    pub fn pointer_up(&mut self, pointer: PointerId, _position: Point) -> Option<SurfaceEvent> {
        if self.capture.pointer() != Some(pointer) {
            return None;
        }
        let (pointer, gesture) = self.capture.take()?;
        self.frame_pending = false;
        self.release(pointer);

        let Gesture::Draw(active) = gesture else {
            return None;
        };
        let stroke = active.stroke;
        match stroke.kind {
            StrokeKind::Ink => {
                if stroke.is_committable() {
                    log::debug!("Committing ink stroke with {} points", stroke.len());
                    Some(SurfaceEvent::StrokeCommitted(stroke))
                } else {
                    log::debug!("Dropping ink stroke with {} point(s)", stroke.len());
                    None
                }
            }
            StrokeKind::Lasso => {
                let rect = stroke.bounds().unwrap_or(Rect::ZERO);
                self.redraw();
                log::debug!("Lasso selection {:?}", rect);
                Some(SurfaceEvent::LassoSelect(rect))
            }
        }
    }

    /// Abort the gesture of `pointer` without committing anything.
    pub fn pointer_cancel(&mut self, pointer: PointerId) {
        if self.capture.pointer() != Some(pointer) {
            return;
        }
        self.abort_capture();
    }

    /// Run the work coalesced since the last frame.
    ///
    /// Paints only the segment between the last painted point and the newest
    /// one, or runs one erase hit-test at the latest pointer position.
    pub fn on_frame(&mut self) -> Option<SurfaceEvent> {
        if !std::mem::take(&mut self.frame_pending) {
            return None;
        }

        let erase_point = match &mut self.capture {
            CaptureState::Capturing {
                gesture: Gesture::Draw(active),
                ..
            } => {
                if let Some(points) = active.unpainted() {
                    log::trace!("Painting {} new segment(s)", points.len() - 1);
                    if let Some(backend) = self.backend.as_mut() {
                        backend.stroke_polyline(points, style_for(&self.config, active.stroke.kind));
                    }
                }
                active.mark_painted();
                None
            }
            CaptureState::Capturing {
                gesture: Gesture::Erase { latest },
                ..
            } => Some(*latest),
            CaptureState::Idle => None,
        };

        erase_point.and_then(|point| self.erase_at(point))
    }

    /// Index of the first committed stroke hit at a local point.
    pub fn hit_test(&self, local: Point) -> Option<usize> {
        find_hit(&self.strokes.strokes, local, self.config.erase_threshold)
    }

    fn erase_at(&self, local: Point) -> Option<SurfaceEvent> {
        let index = self.hit_test(local)?;
        log::debug!("Eraser hit stroke {} at ({}, {})", index, local.x, local.y);
        Some(SurfaceEvent::StrokeRemoved(index))
    }

    fn release(&mut self, pointer: PointerId) {
        if let Some(backend) = self.backend.as_mut() {
            backend.release_pointer(pointer);
        }
    }

    fn abort_capture(&mut self) {
        let Some((pointer, gesture)) = self.capture.take() else {
            return;
        };
        self.frame_pending = false;
        self.release(pointer);
        if let Gesture::Draw(active) = gesture {
            log::debug!("Discarding {:?} stroke with {} points", active.stroke.kind, active.stroke.len());
            self.redraw();
        }
    }
}

/// Backing raster size for a CSS size at a device pixel ratio.
pub fn backing_size(css: Size, scale: f64) -> (u32, u32) {
    let width = (css.width * scale).floor().max(0.0) as u32;
    let height = (css.height * scale).floor().max(0.0) as u32;
    (width, height)
}

fn style_for(config: &SurfaceConfig, kind: StrokeKind) -> &StrokeStyle {
    match kind {
        StrokeKind::Ink => &config.ink,
        StrokeKind::Lasso => &config.lasso,
    }
}

fn draw_points<B: SurfaceBackend>(backend: &mut B, points: &[Point], style: &StrokeStyle) {
    match points {
        [] => {}
        [point] => backend.fill_dot(*point, style),
        _ => backend.stroke_polyline(points, style),
    }
}
