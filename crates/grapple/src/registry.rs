//! Drop-zone registry and hit testing.
//!
//! Zone owners push their current on-screen geometry into a [`DropZoneRegistry`]
//! whenever it changes. Drag consumers (usually classifier and resolver callbacks)
//! query it to find which zones lie under the pointer.

use std::hash::Hash;
use std::sync::Arc;

use grapple_core::alloc::{HashMap, HashSet};
use grapple_core::geometry::Rect;
use grapple_core::math::Vec2;
use grapple_core::profile_function;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use static_assertions::assert_impl_all;

/// Receives drop-area geometry for a zone id.
///
/// Implemented by the registry itself and by host models that want to intercept
/// geometry updates before storing them.
pub trait DropAreaSink<K> {
    fn set_drop_area(&mut self, area: Rect<f32>, id: K);
}

/// Maps drop-zone ids to their current rectangles.
///
/// Keys are unique and geometry updates are last-write-wins. Entries carry no
/// ordering and overlapping zones have no precedence: [`hit_test`](Self::hit_test)
/// reports every zone under the point.
#[derive(Debug, Clone)]
pub struct DropZoneRegistry<K> {
    zones: HashMap<K, Rect<f32>>,
}

impl<K> Default for DropZoneRegistry<K> {
    fn default() -> Self {
        Self {
            zones: HashMap::default(),
        }
    }
}

impl<K: Eq + Hash> DropZoneRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the rectangle for `id`.
    pub fn set_zone(&mut self, id: K, rect: Rect<f32>) {
        self.zones.insert(id, rect);
    }

    /// Current rectangle for `id`, if it is registered.
    pub fn zone(&self, id: &K) -> Option<Rect<f32>> {
        self.zones.get(id).copied()
    }

    /// Forget `id`, returning its last rectangle.
    pub fn remove_zone(&mut self, id: &K) -> Option<Rect<f32>> {
        self.zones.remove(id)
    }

    pub fn contains_zone(&self, id: &K) -> bool {
        self.zones.contains_key(id)
    }

    /// Iterate over ids of zones containing `location`.
    pub fn hits(&self, location: Vec2) -> impl Iterator<Item = &K> + '_ {
        self.zones
            .iter()
            .filter(move |(_, rect)| rect.contains(location))
            .map(|(id, _)| id)
    }

    /// Check whether `id` is registered and contains `location`.
    pub fn zone_contains(&self, id: &K, location: Vec2) -> bool {
        self.zones
            .get(id)
            .is_some_and(|rect| rect.contains(location))
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Rect<f32>)> {
        self.zones.iter()
    }

    pub fn clear(&mut self) {
        self.zones.clear();
    }
}

impl<K: Eq + Hash + Clone> DropZoneRegistry<K> {
    /// Every zone whose rectangle contains `location`, under half-open containment.
    pub fn hit_test(&self, location: Vec2) -> HashSet<K> {
        profile_function!();
        self.hits(location).cloned().collect()
    }
}

impl<K: Eq + Hash> DropAreaSink<K> for DropZoneRegistry<K> {
    fn set_drop_area(&mut self, area: Rect<f32>, id: K) {
        self.set_zone(id, area);
    }
}

/// Why a zone's geometry is being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryChange {
    /// The zone was laid out for the first time.
    Appeared,
    /// The device orientation changed.
    Rotated,
    /// The zone was resized or moved by a layout pass.
    Resized,
}

/// Binds a drop-zone id to the view that owns it.
///
/// The owning view calls [`notify`](Self::notify) from its geometry callbacks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DropArea<K> {
    id: K,
}

impl<K: Clone> DropArea<K> {
    pub fn new(id: K) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    /// Forward a geometry change for this area to `sink`.
    pub fn notify<S>(&self, sink: &mut S, change: GeometryChange, area: Rect<f32>)
    where
        S: DropAreaSink<K> + ?Sized,
    {
        tracing::trace!(?change, ?area, "Drop area geometry changed");
        sink.set_drop_area(area, self.id.clone());
    }
}

/// A [`DropZoneRegistry`] that can be shared across threads.
///
/// Cloning is cheap and every clone sees the same zones. Writers take an exclusive
/// lock; hit tests and lookups share a read lock.
#[derive(Debug)]
pub struct SharedDropZoneRegistry<K> {
    inner: Arc<RwLock<DropZoneRegistry<K>>>,
}

impl<K> Clone for SharedDropZoneRegistry<K> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K> Default for SharedDropZoneRegistry<K> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(DropZoneRegistry::default())),
        }
    }
}

impl<K: Eq + Hash> SharedDropZoneRegistry<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_registry(registry: DropZoneRegistry<K>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(registry)),
        }
    }

    pub fn set_zone(&self, id: K, rect: Rect<f32>) {
        self.inner.write().set_zone(id, rect);
    }

    pub fn zone(&self, id: &K) -> Option<Rect<f32>> {
        self.inner.read().zone(id)
    }

    pub fn remove_zone(&self, id: &K) -> Option<Rect<f32>> {
        self.inner.write().remove_zone(id)
    }

    pub fn zone_contains(&self, id: &K, location: Vec2) -> bool {
        self.inner.read().zone_contains(id, location)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Hold the read lock for a batch of queries.
    pub fn read(&self) -> RwLockReadGuard<'_, DropZoneRegistry<K>> {
        self.inner.read()
    }

    /// Hold the write lock for a batch of updates.
    pub fn write(&self) -> RwLockWriteGuard<'_, DropZoneRegistry<K>> {
        self.inner.write()
    }
}

impl<K: Eq + Hash + Clone> SharedDropZoneRegistry<K> {
    pub fn hit_test(&self, location: Vec2) -> HashSet<K> {
        self.inner.read().hit_test(location)
    }
}

impl<K: Eq + Hash> DropAreaSink<K> for SharedDropZoneRegistry<K> {
    fn set_drop_area(&mut self, area: Rect<f32>, id: K) {
        self.set_zone(id, area);
    }
}

assert_impl_all!(DropZoneRegistry<String>: Send, Sync);
assert_impl_all!(SharedDropZoneRegistry<String>: Send, Sync, Clone);
