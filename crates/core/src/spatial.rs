//! Spatial index for overlap queries.
//!
//! A uniform bucket grid: every rectangle is registered in each bucket it
//! touches, and a query only tests rectangles found in the buckets the query
//! rectangle touches. Sprites are small and the screen is bounded, so a flat
//! grid keeps updates cheap without tree rebalancing.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::EngineError;
use crate::types::{EntityId, Rect};

/// Bucket edge length in cells.
pub const DEFAULT_BUCKET_SIZE: i32 = 8;

type BucketKey = (i32, i32);

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    bucket_size: i32,
    rects: FxHashMap<EntityId, Rect>,
    buckets: FxHashMap<BucketKey, Vec<EntityId>>,
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::with_bucket_size(DEFAULT_BUCKET_SIZE)
    }

    pub fn with_bucket_size(bucket_size: i32) -> Self {
        Self {
            bucket_size: bucket_size.max(1),
            rects: FxHashMap::default(),
            buckets: FxHashMap::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.rects.contains_key(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    /// Add an entity. Each entity is inserted once; later moves go through [`update`](Self::update).
    pub fn insert(&mut self, id: EntityId, rect: Rect) -> Result<(), EngineError> {
        if self.rects.contains_key(&id) {
            return Err(EngineError::DuplicateIndexEntry(id));
        }
        self.rects.insert(id, rect);
        self.link(id, rect);
        Ok(())
    }

    /// Replace an entity's rectangle in place. Returns `false` if the entity was never inserted.
    pub fn update(&mut self, id: EntityId, rect: Rect) -> bool {
        let Some(slot) = self.rects.get_mut(&id) else {
            return false;
        };
        let old = std::mem::replace(slot, rect);
        if old == rect {
            return true;
        }
        if self.bucket_span(old) != self.bucket_span(rect) {
            self.unlink(id, old);
            self.link(id, rect);
        }
        true
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Rect> {
        let rect = self.rects.remove(&id)?;
        self.unlink(id, rect);
        Some(rect)
    }

    /// All entities whose rectangle shares a cell with `rect`, in id order.
    ///
    /// An entity querying with its own rectangle is part of the result.
    pub fn query(&self, rect: Rect) -> Vec<EntityId> {
        let Some((x0, y0, x1, y1)) = self.bucket_span(rect) else {
            return Vec::new();
        };

        let mut seen = FxHashSet::default();
        let mut hits = Vec::new();
        for by in y0..=y1 {
            for bx in x0..=x1 {
                let Some(bucket) = self.buckets.get(&(bx, by)) else {
                    continue;
                };
                for &id in bucket {
                    if !seen.insert(id) {
                        continue;
                    }
                    if self.rects.get(&id).is_some_and(|r| r.intersects(&rect)) {
                        hits.push(id);
                    }
                }
            }
        }
        hits.sort_unstable();
        hits
    }

    fn bucket_span(&self, rect: Rect) -> Option<(i32, i32, i32, i32)> {
        if rect.is_empty() {
            return None;
        }
        let s = self.bucket_size;
        Some((
            rect.x.div_euclid(s),
            rect.y.div_euclid(s),
            (rect.right() - 1).div_euclid(s),
            (rect.bottom() - 1).div_euclid(s),
        ))
    }

    fn link(&mut self, id: EntityId, rect: Rect) {
        let Some((x0, y0, x1, y1)) = self.bucket_span(rect) else {
            return;
        };
        for by in y0..=y1 {
            for bx in x0..=x1 {
                self.buckets.entry((bx, by)).or_default().push(id);
            }
        }
    }

    fn unlink(&mut self, id: EntityId, rect: Rect) {
        let Some((x0, y0, x1, y1)) = self.bucket_span(rect) else {
            return;
        };
        for by in y0..=y1 {
            for bx in x0..=x1 {
                if let Some(bucket) = self.buckets.get_mut(&(bx, by)) {
                    bucket.retain(|&other| other != id);
                    if bucket.is_empty() {
                        self.buckets.remove(&(bx, by));
                    }
                }
            }
        }
    }
}
