//! The immutable product of one floor-plan build: points, label map, spatial
//! index, and all-pairs path table.

use std::time::Instant;

use indexmap::IndexMap;
use itertools::Itertools;
use serde::Serialize;
use tracing::{info, info_span};

use crate::errors::FloorPathError;
use crate::geometry::Coord;
use crate::graph::{GraphBuilder, ShortestPathTable};
use crate::models::{Point, PointIndex, PointRecord, Route};
use crate::options::BuildOptions;
use crate::picker::{Pick, ProximityPicker};
use crate::spatial::{QuadTreeConfig, SpatialIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TableStats {
    pub points: usize,
    pub rooms: usize,
    pub edges: usize,
    pub generation: u64,
}

pub struct RouteTable {
    options: BuildOptions,
    points: Vec<Point>,
    labels: IndexMap<String, PointIndex>,
    index: SpatialIndex,
    paths: ShortestPathTable,
    edges: usize,
    pub(crate) generation: u64,
}

impl RouteTable {
    /// Runs index population, edge collection and the all-pairs pass. Any
    /// input-contract violation aborts the whole build.
    pub fn build(records: &[PointRecord], options: &BuildOptions) -> Result<Self, FloorPathError> {
        let span = info_span!("route_table_build", points = records.len());
        let _enter = span.enter();

        if records.len() > options.max_points {
            return Err(FloorPathError::TooManyPoints { count: records.len(), cap: options.max_points });
        }
        let started = Instant::now();
        let points = Point::from_records(records);
        let labels = label_map(&points)?;

        let mut index = SpatialIndex::new(QuadTreeConfig {
            bounds: options.bounds(),
            capacity: options.node_capacity,
            max_depth: options.max_depth,
        });
        for p in &points {
            index.insert(p)?;
        }

        let edges = GraphBuilder::new(options.neighbor_window, options.neighbor_count).build(&points, &index);
        let paths = ShortestPathTable::build(points.len(), &edges, options.max_points)?;

        info!(
            points = points.len(),
            rooms = labels.len(),
            edges = edges.len(),
            index_depth = index.depth(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "route table built"
        );
        Ok(Self {
            options: options.clone(),
            points,
            labels,
            index,
            paths,
            edges: edges.len(),
            generation: 0,
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn paths(&self) -> &ShortestPathTable {
        &self.paths
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build number assigned by the owning cache; 0 for a standalone table.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Room labels in floor-plan order.
    pub fn rooms(&self) -> impl Iterator<Item = &str> + '_ {
        self.labels.keys().map(String::as_str)
    }

    pub fn stats(&self) -> TableStats {
        TableStats {
            points: self.points.len(),
            rooms: self.labels.len(),
            edges: self.edges,
            generation: self.generation,
        }
    }

    pub fn lookup(&self, label: &str) -> Result<PointIndex, FloorPathError> {
        self.labels
            .get(label)
            .copied()
            .ok_or_else(|| FloorPathError::UnknownLabel(label.to_string()))
    }

    pub fn coord(&self, i: PointIndex) -> Option<Coord> {
        self.points.get(i as usize).map(|p| p.coord)
    }

    /// Route between two rooms. An unreachable pair yields an empty route.
    pub fn route(&self, src: &str, dst: &str) -> Result<Route, FloorPathError> {
        let u = self.lookup(src)?;
        let v = self.lookup(dst)?;
        let nodes = self.paths.reconstruct_path(u, v);
        let path: Vec<Coord> = nodes.iter().map(|&i| self.points[i as usize].coord).collect();
        let length = if nodes.is_empty() {
            None
        } else {
            Some(path.iter().tuple_windows().map(|(a, b)| a.distance(*b)).sum::<f64>())
        };
        Ok(Route { nodes, path, length })
    }

    /// Shortest distance between two rooms; `NoPathFound` when unreachable.
    pub fn distance_between(&self, src: &str, dst: &str) -> Result<f64, FloorPathError> {
        let u = self.lookup(src)?;
        let v = self.lookup(dst)?;
        self.paths.distance(u, v).ok_or(FloorPathError::NoPathFound)
    }

    pub fn picker(&self) -> ProximityPicker<'_> {
        ProximityPicker::new(&self.index, &self.points, self.options.pick_half_extent, self.options.pick_candidates)
    }

    pub fn nearest_point(&self, q: Coord) -> Option<PointIndex> {
        self.picker().nearest_point(q)
    }

    /// Label of the closest room within the picking window.
    pub fn nearest_room(&self, q: Coord) -> Option<&str> {
        let i = self.picker().nearest_named_anchor(q)?;
        self.points[i as usize].label()
    }

    pub fn pick(&self, q: Coord) -> Pick {
        self.picker().pick(q)
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("points", &self.points.len())
            .field("rooms", &self.labels.len())
            .field("edges", &self.edges)
            .field("generation", &self.generation)
            .finish()
    }
}

fn label_map(points: &[Point]) -> Result<IndexMap<String, PointIndex>, FloorPathError> {
    let mut labels = IndexMap::new();
    for p in points {
        if let Some(label) = p.label() {
            if labels.insert(label.to_string(), p.index).is_some() {
                return Err(FloorPathError::DuplicateLabel(label.to_string()));
            }
        }
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_labels_rejected() {
        let recs = vec![PointRecord::room("a", 0.0, 0.0), PointRecord::room("a", 5.0, 0.0)];
        let err = RouteTable::build(&recs, &BuildOptions::default()).err();
        assert_eq!(err, Some(FloorPathError::DuplicateLabel("a".into())));
    }

    #[test]
    fn out_of_bounds_aborts_build() {
        let recs = vec![PointRecord::room("a", 0.0, 0.0), PointRecord::waypoint(9_000.0, 0.0)];
        let err = RouteTable::build(&recs, &BuildOptions::default()).err();
        assert_eq!(err, Some(FloorPathError::OutOfBounds { x: 9_000.0, y: 0.0 }));
    }

    #[test]
    fn route_through_corridor() {
        let recs = vec![
            PointRecord::waypoint(50.0, 0.0),
            PointRecord::waypoint(100.0, 0.0),
            PointRecord::room("a", 0.0, 0.0),
            PointRecord::room("b", 150.0, 0.0),
        ];
        let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
        let r = t.route("a", "b").unwrap();
        assert_eq!(r.nodes, vec![2, 0, 1, 3]);
        assert_eq!(r.path.first(), Some(&Coord::new(0.0, 0.0)));
        assert!((r.length.unwrap() - 150.0).abs() < 1e-9);
        assert!((t.distance_between("a", "b").unwrap() - 150.0).abs() < 1e-9);
        assert_eq!(t.route("a", "nowhere").err(), Some(FloorPathError::UnknownLabel("nowhere".into())));
        assert_eq!(t.rooms().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(t.nearest_room(Coord::new(140.0, 3.0)), Some("b"));
        assert_eq!(t.stats().points, 4);
    }

    #[test]
    fn debug_shows_stats_not_matrices() {
        let recs = vec![PointRecord::room("a", 0.0, 0.0), PointRecord::waypoint(10.0, 0.0)];
        let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
        assert_eq!(format!("{t:?}"), "RouteTable { points: 2, rooms: 1, edges: 4, generation: 0 }");
    }

    #[test]
    fn same_room_route_is_single_point() {
        let recs = vec![PointRecord::room("a", 0.0, 0.0)];
        let t = RouteTable::build(&recs, &BuildOptions::default()).unwrap();
        let r = t.route("a", "a").unwrap();
        assert_eq!(r.nodes, vec![0]);
        assert_eq!(r.length, Some(0.0));
    }
}
