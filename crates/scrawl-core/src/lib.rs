//! Scrawl Core Library
//!
//! Platform-agnostic freehand annotation and spatial-selection engine: a
//! pointer-driven stroke surface with incremental rendering and erase
//! hit-testing, plus a spatial registry that resolves lasso rectangles against
//! externally rendered elements.

pub mod backend;
pub mod config;
pub mod document;
pub mod geometry;
pub mod input;
pub mod registry;
pub mod stroke;
pub mod style;
pub mod surface;
pub mod tool;

pub use backend::{BackendError, BackendResult, SurfaceBackend};
pub use config::{ConfigError, DEFAULT_ERASE_THRESHOLD, SurfaceConfig};
pub use document::{DocumentError, InkDocument};
pub use input::{PointerEvent, PointerId};
pub use registry::{BoundsFn, ElementHandle, LiveBounds, SpatialRegistry};
pub use stroke::{Revision, Stroke, StrokeKind, StrokeSnapshot};
pub use style::{SerializableColor, StrokeStyle};
pub use surface::{StrokeSurface, SurfaceEvent};
pub use tool::ToolMode;
