use std::time::Instant;

use tracing::debug;

use crate::geometry::Aabb;
use crate::models::{Point, PointIndex};
use crate::spatial::SpatialIndex;

/// Directed edge list in parallel arrays. Every proximity link is stored twice,
/// once per direction, with the same weight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeList {
    pub src: Vec<PointIndex>,
    pub dst: Vec<PointIndex>,
    pub w: Vec<f64>,
}

impl EdgeList {
    pub fn with_capacity(n: usize) -> Self {
        Self { src: Vec::with_capacity(n), dst: Vec::with_capacity(n), w: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, u: PointIndex, v: PointIndex, w: f64) {
        self.src.push(u);
        self.dst.push(v);
        self.w.push(w);
    }

    /// Adds `(u, v)` and `(v, u)`.
    pub fn push_undirected(&mut self, u: PointIndex, v: PointIndex, w: f64) {
        self.push(u, v, w);
        self.push(v, u, w);
    }

    pub fn len(&self) -> usize {
        self.src.len()
    }

    pub fn is_empty(&self) -> bool {
        self.src.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointIndex, PointIndex, f64)> + '_ {
        self.src.iter().zip(&self.dst).zip(&self.w).map(|((&u, &v), &w)| (u, v, w))
    }

    /// Outgoing directed entries of `u`, duplicates included.
    pub fn degree(&self, u: PointIndex) -> usize {
        self.src.iter().filter(|&&s| s == u).count()
    }
}

/// Connects every point to its nearest neighbors inside a square window.
///
/// Links come from proximity alone: two rooms on either side of a thin wall
/// can end up adjacent.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GraphBuilder {
    /// Side length of the square search window.
    pub window: f64,
    pub neighbors: usize,
}

impl GraphBuilder {
    pub fn new(window: f64, neighbors: usize) -> Self {
        Self { window, neighbors }
    }

    pub fn build(&self, points: &[Point], index: &SpatialIndex) -> EdgeList {
        let started = Instant::now();
        let mut edges = EdgeList::with_capacity(points.len() * self.neighbors * 2);
        let half = self.window / 2.0;
        for p in points {
            let window = Aabb::square(p.coord, half);
            let i = p.index;
            for n in index.k_nearest_filtered(&window, self.neighbors, |j| j != i) {
                edges.push_undirected(i, n.index, n.distance);
            }
        }
        debug!(
            points = points.len(),
            edges = edges.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "proximity edges collected"
        );
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Coord;
    use crate::models::PointRecord;
    use crate::spatial::QuadTreeConfig;

    fn setup(records: &[PointRecord]) -> (Vec<Point>, SpatialIndex) {
        let points = Point::from_records(records);
        let mut idx = SpatialIndex::new(QuadTreeConfig {
            bounds: Aabb::square(Coord::new(0.0, 0.0), 1000.0),
            capacity: 4,
            max_depth: 6,
        });
        for p in &points {
            idx.insert(p).unwrap();
        }
        (points, idx)
    }

    #[test]
    fn line_of_points_links_neighbors_both_ways() {
        let recs: Vec<_> = (0..4).map(|i| PointRecord::waypoint(i as f64 * 10.0, 0.0)).collect();
        let (points, idx) = setup(&recs);
        let edges = GraphBuilder::new(24.0, 10).build(&points, &idx);
        for (u, v, w) in edges.iter() {
            assert_ne!(u, v, "no self edges");
            assert!((w - 10.0).abs() < 1e-12);
        }
        // 3 links discovered from both ends, stored in both directions.
        assert_eq!(edges.len(), 12);
        assert_eq!(edges.degree(0), 2);
        assert_eq!(edges.degree(1), 4);
    }

    #[test]
    fn neighbor_count_caps_links_per_point() {
        let recs: Vec<_> = (0..6).map(|i| PointRecord::waypoint(i as f64, 0.0)).collect();
        let (points, idx) = setup(&recs);
        let edges = GraphBuilder::new(100.0, 1).build(&points, &idx);
        // One query hit per point, each emitted in both directions.
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn weights_are_symmetric() {
        let recs = vec![
            PointRecord::waypoint(0.0, 0.0),
            PointRecord::room("a", 3.0, 4.0),
            PointRecord::waypoint(-2.0, 1.0),
        ];
        let (points, idx) = setup(&recs);
        let edges = GraphBuilder::new(20.0, 10).build(&points, &idx);
        for (u, v, w) in edges.iter() {
            let back = edges.iter().find(|&(a, b, _)| a == v && b == u).map(|(_, _, w)| w);
            assert_eq!(back, Some(w));
        }
    }

    #[test]
    fn isolated_point_gets_no_edges() {
        let recs = vec![PointRecord::waypoint(0.0, 0.0), PointRecord::waypoint(500.0, 500.0)];
        let (points, idx) = setup(&recs);
        let edges = GraphBuilder::new(120.0, 10).build(&points, &idx);
        assert!(edges.is_empty());
    }
}
