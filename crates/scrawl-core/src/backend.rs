//! Drawing backend abstraction for the stroke surface.

use crate::input::PointerId;
use crate::style::StrokeStyle;
use kurbo::Point;
use thiserror::Error;

/// Backend errors.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Rendering context unavailable: {0}")]
    Unavailable(String),
    #[error("Pointer capture failed: {0}")]
    Capture(String),
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// A 2D raster the stroke surface draws into.
///
/// All drawing coordinates are CSS pixels; the backend maps them to device
/// pixels through the scale set with [`set_scale`](Self::set_scale).
/// Implementations can record commands, build a Vello scene, or drive a
/// platform canvas.
pub trait SurfaceBackend {
    /// Resize the backing raster to `width × height` device pixels.
    ///
    /// Resizing discards the raster's contents and resets its transform.
    fn resize(&mut self, width: u32, height: u32);

    /// Set the uniform CSS-to-device scale applied to subsequent drawing.
    fn set_scale(&mut self, scale: f64);

    /// Clear the whole raster.
    fn clear(&mut self);

    /// Stroke a polyline through `points` (round joins and caps).
    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle);

    /// Fill a dot of the style's width centred on `center`.
    fn fill_dot(&mut self, center: Point, style: &StrokeStyle);

    /// Route all further events of `pointer` to this surface.
    fn capture_pointer(&mut self, _pointer: PointerId) -> BackendResult<()> {
        Ok(())
    }

    /// Release a pointer previously captured.
    fn release_pointer(&mut self, _pointer: PointerId) {}
}
