//! Display-list backend that records every drawing command.
//!
//! Used headless (the replay tool prints its commands) and as the reference
//! backend when checking that incremental painting matches a full redraw.

use kurbo::{Affine, Point};
use scrawl_core::backend::{BackendError, BackendResult, SurfaceBackend};
use scrawl_core::input::PointerId;
use scrawl_core::style::StrokeStyle;
use serde::Serialize;

/// A single recorded drawing command, in CSS pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawCommand {
    Resize { width: u32, height: u32 },
    SetScale(f64),
    Clear,
    Polyline { points: Vec<Point>, style: StrokeStyle },
    Dot { center: Point, style: StrokeStyle },
}

/// Records drawing commands instead of rasterizing them.
#[derive(Debug, Clone)]
pub struct RecordingBackend {
    commands: Vec<DrawCommand>,
    size: (u32, u32),
    scale: f64,
    captured: Option<PointerId>,
    /// Simulate a platform that refuses pointer capture.
    pub refuse_capture: bool,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            size: (0, 0),
            scale: 1.0,
            captured: None,
            refuse_capture: false,
        }
    }

    /// Every command recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the recorded commands.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Commands whose output is still on the raster (everything after the
    /// last clear or resize).
    pub fn visible_commands(&self) -> &[DrawCommand] {
        let start = self
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear | DrawCommand::Resize { .. }))
            .map_or(0, |i| i + 1);
        &self.commands[start..]
    }

    /// Visible line segments in device pixels.
    ///
    /// Each polyline is split into its segments and mapped through the scale
    /// in effect when it was drawn, so an incrementally painted stroke and a
    /// redraw of the same stroke compare equal.
    pub fn device_segments(&self) -> Vec<(Point, Point)> {
        let mut transform = Affine::IDENTITY;
        let mut segments = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::Resize { .. } => {
                    transform = Affine::IDENTITY;
                    segments.clear();
                }
                DrawCommand::Clear => segments.clear(),
                DrawCommand::SetScale(scale) => transform = Affine::scale(*scale),
                DrawCommand::Polyline { points, .. } => {
                    segments.extend(points.windows(2).map(|w| (transform * w[0], transform * w[1])));
                }
                DrawCommand::Dot { .. } => {}
            }
        }
        segments
    }

    /// Backing size in device pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Current CSS-to-device scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// The pointer currently captured, if any.
    pub fn captured_pointer(&self) -> Option<PointerId> {
        self.captured
    }
}

impl SurfaceBackend for RecordingBackend {
    fn resize(&mut self, width: u32, height: u32) {
        self.size = (width, height);
        self.scale = 1.0;
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
        self.commands.push(DrawCommand::SetScale(scale));
    }

    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    fn fill_dot(&mut self, center: Point, style: &StrokeStyle) {
        self.commands.push(DrawCommand::Dot {
            center,
            style: style.clone(),
        });
    }

    fn capture_pointer(&mut self, pointer: PointerId) -> BackendResult<()> {
        if self.refuse_capture {
            return Err(BackendError::Capture(format!("pointer {} not capturable", pointer.0)));
        }
        self.captured = Some(pointer);
        Ok(())
    }

    fn release_pointer(&mut self, pointer: PointerId) {
        if self.captured == Some(pointer) {
            self.captured = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use scrawl_core::{PointerEvent, Revision, Stroke, StrokeKind, StrokeSnapshot, StrokeSurface, SurfaceConfig, SurfaceEvent};

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn surface(dpr: f64) -> StrokeSurface<RecordingBackend> {
        let mut surface = StrokeSurface::new(SurfaceConfig::default(), RecordingBackend::new());
        surface.set_layout(Rect::new(0.0, 0.0, 200.0, 100.0), dpr);
        surface
    }

    #[test]
    fn test_visible_commands_after_clear() {
        let mut backend = RecordingBackend::new();
        backend.stroke_polyline(&[pt(0.0, 0.0), pt(1.0, 1.0)], &StrokeStyle::ink());
        backend.clear();
        backend.fill_dot(pt(2.0, 2.0), &StrokeStyle::ink());
        assert_eq!(backend.visible_commands().len(), 1);
        assert_eq!(backend.commands().len(), 3);
        assert_eq!(backend.take_commands().len(), 3);
        assert!(backend.commands().is_empty());
    }

    #[test]
    fn test_incremental_equals_batch_in_device_space() {
        let points: Vec<Point> = (0..20).map(|i| pt(i as f64 * 3.0, (i % 4) as f64 * 2.5)).collect();

        let mut s = surface(2.0);
        s.handle_pointer(PointerEvent::down(points[0]));
        for p in &points[1..] {
            s.handle_pointer(PointerEvent::moved(*p));
            s.on_frame();
        }
        let incremental = s.backend().unwrap().device_segments();

        let Some(SurfaceEvent::StrokeCommitted(stroke)) = s.handle_pointer(PointerEvent::up(points[19])) else {
            panic!("expected commit");
        };
        s.set_strokes(StrokeSnapshot::new(Revision(1), vec![stroke]));
        let batch = s.backend().unwrap().device_segments();

        assert_eq!(incremental, batch);
        assert_eq!(batch[0], (pt(0.0, 0.0), pt(6.0, 5.0)));
    }

    #[test]
    fn test_resize_preserves_logical_polylines() {
        let stroke = Stroke::from_points(StrokeKind::Ink, vec![pt(10.0, 10.0), pt(20.0, 30.0)]);
        let mut s = surface(1.0);
        s.set_strokes(StrokeSnapshot::new(Revision(1), vec![stroke.clone()]));
        assert_eq!(s.backend().unwrap().device_segments(), vec![(pt(10.0, 10.0), pt(20.0, 30.0))]);

        s.set_layout(Rect::new(0.0, 0.0, 200.0, 100.0), 3.0);
        let backend = s.backend().unwrap();
        assert_eq!(backend.size(), (600, 300));
        assert!((backend.scale() - 3.0).abs() < f64::EPSILON);
        assert_eq!(
            backend.visible_commands(),
            &[
                DrawCommand::SetScale(3.0),
                DrawCommand::Polyline {
                    points: stroke.points.clone(),
                    style: StrokeStyle::ink(),
                },
            ]
        );
        assert_eq!(backend.device_segments(), vec![(pt(30.0, 30.0), pt(60.0, 90.0))]);
    }

    #[test]
    fn test_pointer_capture_tracking() {
        let mut s = surface(1.0);
        s.handle_pointer(PointerEvent::down(pt(1.0, 1.0)));
        assert_eq!(s.backend().unwrap().captured_pointer(), Some(scrawl_core::PointerId::MOUSE));
        s.handle_pointer(PointerEvent::up(pt(1.0, 1.0)));
        assert_eq!(s.backend().unwrap().captured_pointer(), None);
    }

    #[test]
    fn test_refused_capture() {
        let mut backend = RecordingBackend::new();
        backend.refuse_capture = true;
        assert!(backend.capture_pointer(PointerId(9)).is_err());
        assert_eq!(backend.captured_pointer(), None);
    }
}
