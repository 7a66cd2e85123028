//! Cursor picking: nearest routable point and nearest named room.

use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Coord};
use crate::models::{Point, PointIndex};
use crate::spatial::SpatialIndex;

/// What the cursor is over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Pick {
    Room { label: String, index: PointIndex },
    Point { index: PointIndex },
    Nothing,
}

pub struct ProximityPicker<'a> {
    index: &'a SpatialIndex,
    points: &'a [Point],
    half_extent: f64,
    max_candidates: usize,
}

impl<'a> ProximityPicker<'a> {
    pub fn new(index: &'a SpatialIndex, points: &'a [Point], half_extent: f64, max_candidates: usize) -> Self {
        Self { index, points, half_extent, max_candidates }
    }

    pub fn nearest_point(&self, q: Coord) -> Option<PointIndex> {
        self.scan(q, |_| true)
    }

    pub fn nearest_named_anchor(&self, q: Coord) -> Option<PointIndex> {
        self.scan(q, Point::is_room)
    }

    /// A room when one is within the window, otherwise the nearest waypoint.
    pub fn pick(&self, q: Coord) -> Pick {
        if let Some(i) = self.nearest_named_anchor(q) {
            if let Some(label) = self.points[i as usize].label() {
                return Pick::Room { label: label.to_string(), index: i };
            }
        }
        match self.nearest_point(q) {
            Some(index) => Pick::Point { index },
            None => Pick::Nothing,
        }
    }

    fn scan(&self, q: Coord, accept: impl Fn(&Point) -> bool) -> Option<PointIndex> {
        let window = Aabb::square(q, self.half_extent);
        let mut best: Option<(PointIndex, f64)> = None;
        for n in self.index.k_nearest(&window, self.max_candidates) {
            let Some(p) = self.points.get(n.index as usize) else { continue };
            if !accept(p) {
                continue;
            }
            let d = p.coord.distance(q);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((n.index, d));
            }
        }
        best.map(|(i, _)| i)
    }
}
