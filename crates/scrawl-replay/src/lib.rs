//! Scrawl Replay
//!
//! Drives a [`StrokeSurface`](scrawl_core::StrokeSurface) from a recorded
//! pointer session, applying its events to an ink document and resolving
//! lasso selections against a spatial registry.

mod error;
mod session;

pub use error::{ReplayError, ReplayResult};
pub use session::{ElementSpec, ReplayReport, Selection, Session, Step, replay};
