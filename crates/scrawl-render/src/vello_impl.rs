//! Vello-based backend implementation.

use kurbo::{Affine, Circle, Point};
use peniko::Fill;
use scrawl_core::backend::SurfaceBackend;
use scrawl_core::stroke::polyline;
use scrawl_core::style::StrokeStyle;
use vello::Scene;

/// Backend that appends strokes to a Vello scene.
///
/// The scene is retained: incremental segments accumulate until the next
/// clear, and the host renders it to its texture each frame.
pub struct VelloBackend {
    /// The Vello scene being built.
    scene: Scene,
    /// CSS-to-device transform.
    transform: Affine,
    /// Target texture size in device pixels.
    size: (u32, u32),
}

impl Default for VelloBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloBackend {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            transform: Affine::IDENTITY,
            size: (0, 0),
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Texture size the scene should be rendered at.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }
}

impl SurfaceBackend for VelloBackend {
    fn resize(&mut self, width: u32, height: u32) {
        log::debug!("Vello target resized to {}x{}", width, height);
        self.size = (width, height);
        self.transform = Affine::IDENTITY;
        self.scene.reset();
    }

    fn set_scale(&mut self, scale: f64) {
        self.transform = Affine::scale(scale);
    }

    fn clear(&mut self) {
        self.scene.reset();
    }

    fn stroke_polyline(&mut self, points: &[Point], style: &StrokeStyle) {
        if points.len() < 2 {
            return;
        }
        let path = polyline(points);
        self.scene.stroke(&style.to_kurbo(), self.transform, style.color(), None, &path);
    }

    fn fill_dot(&mut self, center: Point, style: &StrokeStyle) {
        let dot = Circle::new(center, style.dot_radius());
        self.scene.fill(Fill::NonZero, self.transform, style.color(), None, &dot);
    }
}
