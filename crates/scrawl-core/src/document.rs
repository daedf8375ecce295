//! Caller-side owner of committed strokes.
//!
//! The surface never mutates strokes itself; an [`InkDocument`] is the
//! minimal owner a host can use to apply [`SurfaceEvent`]s and hand the
//! result back as a [`StrokeSnapshot`].

use crate::stroke::{Revision, Stroke, StrokeSnapshot};
use crate::surface::SurfaceEvent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Document errors.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("Stroke index {index} out of range (document has {len} strokes)")]
    OutOfRange { index: usize, len: usize },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// An ordered list of committed strokes with a revision counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InkDocument {
    /// Unique document identifier.
    pub id: String,
    strokes: Vec<Stroke>,
    #[serde(skip)]
    revision: Revision,
}

impl Default for InkDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl InkDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            strokes: Vec::new(),
            revision: Revision::fresh(),
        }
    }

    /// Current revision; replaced by a fresh one on every mutation.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Append a committed stroke.
    pub fn push(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.revision = Revision::fresh();
    }

    /// Remove the stroke at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Stroke, DocumentError> {
        if index >= self.strokes.len() {
            return Err(DocumentError::OutOfRange {
                index,
                len: self.strokes.len(),
            });
        }
        self.revision = Revision::fresh();
        Ok(self.strokes.remove(index))
    }

    /// Remove every stroke.
    pub fn clear(&mut self) {
        if self.strokes.is_empty() {
            return;
        }
        self.strokes.clear();
        self.revision = Revision::fresh();
    }

    /// Apply a surface event that requests a stroke mutation.
    ///
    /// Returns `true` when the document changed. Lasso selections do not touch
    /// the document.
    pub fn apply(&mut self, event: &SurfaceEvent) -> Result<bool, DocumentError> {
        match event {
            SurfaceEvent::StrokeCommitted(stroke) => {
                self.push(stroke.clone());
                Ok(true)
            }
            SurfaceEvent::StrokeRemoved(index) => {
                self.remove(*index)?;
                Ok(true)
            }
            SurfaceEvent::LassoSelect(_) => Ok(false),
        }
    }

    /// Revision-tagged view to hand to the surface.
    pub fn snapshot(&self) -> StrokeSnapshot {
        StrokeSnapshot::new(self.revision, Arc::from(self.strokes.as_slice()))
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON. The loaded document gets a revision no other
    /// document has.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let mut document: Self = serde_json::from_str(json)?;
        document.revision = Revision::fresh();
        Ok(document)
    }
}
