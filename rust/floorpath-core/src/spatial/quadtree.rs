//! Bounded point quadtree with window-limited k-nearest queries.
//!
//! Leaves hold up to `capacity` entries and split into four quadrants when they
//! overflow. Splitting stops at `max_depth`, where a leaf keeps growing; this is
//! what makes stacks of identical coordinates legal.

use crate::errors::FloorPathError;
use crate::geometry::{Aabb, Coord};
use crate::models::{Point, PointIndex};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct QuadTreeConfig {
    pub bounds: Aabb,
    pub capacity: usize,
    pub max_depth: u32,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Entry {
    pub index: PointIndex,
    pub coord: Coord,
}

/// A query hit, with its distance to the window center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub index: PointIndex,
    pub coord: Coord,
    pub distance: f64,
}

struct Node {
    bounds: Aabb,
    depth: u32,
    entries: Vec<Entry>,
    children: Option<Box<[Node; 4]>>,
}

impl Node {
    fn leaf(bounds: Aabb, depth: u32) -> Self {
        Self { bounds, depth, entries: Vec::new(), children: None }
    }

    fn insert(&mut self, e: Entry, capacity: usize, max_depth: u32) {
        if let Some(children) = self.children.as_mut() {
            children[self.bounds.quadrant_of(e.coord)].insert(e, capacity, max_depth);
            return;
        }
        self.entries.push(e);
        if self.entries.len() > capacity && self.depth < max_depth {
            self.split(capacity, max_depth);
        }
    }

    fn split(&mut self, capacity: usize, max_depth: u32) {
        let depth = self.depth + 1;
        let mut children = Box::new(self.bounds.quadrants().map(|b| Node::leaf(b, depth)));
        for e in self.entries.drain(..) {
            children[self.bounds.quadrant_of(e.coord)].insert(e, capacity, max_depth);
        }
        self.entries.shrink_to_fit();
        self.children = Some(children);
    }

    fn collect<F>(&self, window: &Aabb, keep: &F, out: &mut Vec<Neighbor>)
    where
        F: Fn(PointIndex) -> bool,
    {
        if !self.bounds.intersects(window) {
            return;
        }
        for e in &self.entries {
            if window.contains(e.coord) && keep(e.index) {
                out.push(Neighbor { index: e.index, coord: e.coord, distance: e.coord.distance(window.center) });
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.collect(window, keep, out);
            }
        }
    }

    fn depth(&self) -> u32 {
        match &self.children {
            Some(children) => children.iter().map(Node::depth).max().unwrap_or(self.depth),
            None => self.depth,
        }
    }
}

pub struct SpatialIndex {
    root: Node,
    capacity: usize,
    max_depth: u32,
    len: usize,
}

impl SpatialIndex {
    pub fn new(cfg: QuadTreeConfig) -> Self {
        Self {
            root: Node::leaf(cfg.bounds, 0),
            capacity: cfg.capacity.max(1),
            max_depth: cfg.max_depth,
            len: 0,
        }
    }

    pub fn insert(&mut self, point: &Point) -> Result<(), FloorPathError> {
        self.insert_at(point.index, point.coord)
    }

    /// Rejects points outside the root bound (including non-finite ones)
    /// without touching the tree.
    pub fn insert_at(&mut self, index: PointIndex, coord: Coord) -> Result<(), FloorPathError> {
        if !self.root.bounds.contains(coord) {
            return Err(FloorPathError::OutOfBounds { x: coord.x, y: coord.y });
        }
        self.root.insert(Entry { index, coord }, self.capacity, self.max_depth);
        self.len += 1;
        Ok(())
    }

    pub fn k_nearest(&self, window: &Aabb, max_results: usize) -> Vec<Neighbor> {
        self.k_nearest_filtered(window, max_results, |_| true)
    }

    /// Up to `max_results` points inside `window`, closest to its center first.
    /// Equal distances are ordered by insertion index.
    pub fn k_nearest_filtered<F>(&self, window: &Aabb, max_results: usize, keep: F) -> Vec<Neighbor>
    where
        F: Fn(PointIndex) -> bool,
    {
        if max_results == 0 {
            return Vec::new();
        }
        let mut out = Vec::new();
        self.root.collect(window, &keep, &mut out);
        out.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.index.cmp(&b.index)));
        out.truncate(max_results);
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bounds(&self) -> Aabb {
        self.root.bounds
    }

    /// Deepest level currently in use (0 = root only).
    pub fn depth(&self) -> u32 {
        self.root.depth()
    }
}
