//! Scrawl Render Library
//!
//! Drawing backends for the stroke surface. The recording backend keeps a
//! display list for headless use; the Vello backend builds a GPU scene.

mod recording;

#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use recording::{DrawCommand, RecordingBackend};

#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloBackend;
