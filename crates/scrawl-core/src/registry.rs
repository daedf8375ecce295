//! Spatial registry of externally rendered elements.
//!
//! The registry maps opaque ids to handles that report an element's *current*
//! on-screen rectangle. It never owns the elements: entries are added and
//! removed only by explicit [`register`](SpatialRegistry::register) and
//! [`unregister`](SpatialRegistry::unregister) calls. Callers must unregister
//! an element when it leaves the document; a stale handle keeps answering
//! queries with whatever rectangle it last reports.
//!
//! Queries are a linear scan. Element counts are expected in the tens and
//! elements move freely, so no index is maintained between queries.

use crate::geometry::{aabb_overlaps, rect_to_local};
use kurbo::{Point, Rect};
use std::cell::Cell;
use std::collections::HashMap;
use std::hash::Hash;
use std::rc::{Rc, Weak};
use std::sync::Arc;

/// Something that can report its current bounding rectangle in viewport space.
pub trait ElementHandle {
    /// Read the element's bounding rectangle now.
    fn bounding_rect(&self) -> Rect;

    /// Whether the element still exists. Detached elements never match.
    fn is_live(&self) -> bool {
        true
    }
}

impl ElementHandle for Rect {
    fn bounding_rect(&self) -> Rect {
        *self
    }
}

/// Adapts a closure into an [`ElementHandle`].
pub struct BoundsFn<F>(pub F);

impl<F: Fn() -> Rect> ElementHandle for BoundsFn<F> {
    fn bounding_rect(&self) -> Rect {
        (self.0)()
    }
}

impl<F> std::fmt::Debug for BoundsFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BoundsFn { .. }")
    }
}

impl<T: ElementHandle + ?Sized> ElementHandle for Rc<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}

impl<T: ElementHandle + ?Sized> ElementHandle for Arc<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}

impl<T: ElementHandle + ?Sized> ElementHandle for Box<T> {
    fn bounding_rect(&self) -> Rect {
        (**self).bounding_rect()
    }

    fn is_live(&self) -> bool {
        (**self).is_live()
    }
}

/// A dropped element reports a zero rectangle and is no longer live.
impl<T: ElementHandle + ?Sized> ElementHandle for Weak<T> {
    fn bounding_rect(&self) -> Rect {
        self.upgrade()
            .map(|element| element.bounding_rect())
            .unwrap_or(Rect::ZERO)
    }

    fn is_live(&self) -> bool {
        self.upgrade().is_some_and(|element| element.is_live())
    }
}

/// Shared, mutable bounds for elements laid out by the caller.
///
/// The element owner keeps an `Rc<LiveBounds>` and updates it as the element
/// moves; the registry holds a `Weak` to the same cell.
#[derive(Debug, Default)]
pub struct LiveBounds(Cell<Rect>);

impl LiveBounds {
    pub fn new(rect: Rect) -> Self {
        Self(Cell::new(rect))
    }

    /// Update the element's current rectangle.
    pub fn set(&self, rect: Rect) {
        self.0.set(rect);
    }

    pub fn get(&self) -> Rect {
        self.0.get()
    }
}

impl ElementHandle for LiveBounds {
    fn bounding_rect(&self) -> Rect {
        self.get()
    }
}

/// Id-indexed table of element handles answering AABB queries.
#[derive(Debug)]
pub struct SpatialRegistry<K, H> {
    entries: HashMap<K, H>,
    /// Registration order (first registration of each id).
    order: Vec<K>,
}

impl<K, H> Default for SpatialRegistry<K, H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<K, H> SpatialRegistry<K, H>
where
    K: Eq + Hash + Clone,
    H: ElementHandle,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the handle for `id`.
    ///
    /// A replaced id keeps its original position in iteration order.
    pub fn register(&mut self, id: K, handle: H) {
        if self.entries.insert(id.clone(), handle).is_none() {
            self.order.push(id);
        }
    }

    /// Remove the handle for `id`. Returns whether an entry existed.
    pub fn unregister(&mut self, id: &K) -> bool {
        if self.entries.remove(id).is_some() {
            self.order.retain(|existing| existing != id);
            true
        } else {
            false
        }
    }

    /// Check if `id` is registered.
    pub fn contains(&self, id: &K) -> bool {
        self.entries.contains_key(id)
    }

    /// Get the handle registered for `id`.
    pub fn get(&self, id: &K) -> Option<&H> {
        self.entries.get(id)
    }

    /// Registered ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = &K> {
        self.order.iter()
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Ids whose current rectangle overlaps `rect`.
    ///
    /// `rect` is in the surface's local space; each element rectangle is read
    /// fresh and translated into that space by subtracting `container_origin`.
    /// Edge-touching rectangles do not overlap. A zero-area `rect` matches
    /// nothing; a zero-width or zero-height element still matches when it
    /// lies strictly inside `rect`. Elements whose handle is no longer live
    /// are skipped.
    pub fn query_intersecting(&self, rect: Rect, container_origin: Point) -> Vec<K> {
        if rect.is_zero_area() {
            return Vec::new();
        }

        self.order
            .iter()
            .filter(|id| {
                let Some(handle) = self.entries.get(*id) else {
                    return false;
                };
                handle.is_live() && aabb_overlaps(rect, rect_to_local(handle.bounding_rect(), container_origin))
            })
            .cloned()
            .collect()
    }
}
