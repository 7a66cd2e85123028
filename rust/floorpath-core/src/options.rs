use serde::{Deserialize, Serialize};

use crate::geometry::{Aabb, Coord};

pub const DEFAULT_BOUNDS_HALF_EXTENT: f64 = 3_000.0;
pub const DEFAULT_NODE_CAPACITY: usize = 8;
pub const DEFAULT_MAX_DEPTH: u32 = 6;
/// Side of the square window searched for graph neighbors.
pub const DEFAULT_NEIGHBOR_WINDOW: f64 = 120.0;
pub const DEFAULT_NEIGHBOR_COUNT: usize = 10;
pub const DEFAULT_MAX_POINTS: usize = 1_000;
/// Half extent of the cursor picking window.
pub const DEFAULT_PICK_HALF_EXTENT: f64 = 100.0;
pub const DEFAULT_PICK_CANDIDATES: usize = 200;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    pub bounds_center: Coord,
    pub bounds_half_extent: f64,
    pub node_capacity: usize,
    pub max_depth: u32,

    pub neighbor_window: f64,
    pub neighbor_count: usize,
    pub max_points: usize,

    pub pick_half_extent: f64,
    pub pick_candidates: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            bounds_center: Coord::new(0.0, 0.0),
            bounds_half_extent: DEFAULT_BOUNDS_HALF_EXTENT,
            node_capacity: DEFAULT_NODE_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            neighbor_window: DEFAULT_NEIGHBOR_WINDOW,
            neighbor_count: DEFAULT_NEIGHBOR_COUNT,
            max_points: DEFAULT_MAX_POINTS,
            pick_half_extent: DEFAULT_PICK_HALF_EXTENT,
            pick_candidates: DEFAULT_PICK_CANDIDATES,
        }
    }
}

impl BuildOptions {
    /// Root bound of the spatial index.
    pub fn bounds(&self) -> Aabb {
        Aabb::square(self.bounds_center, self.bounds_half_extent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_floor_plan_scale() {
        let o = BuildOptions::default();
        assert_eq!(o.max_points, 1_000);
        assert_eq!(o.neighbor_window, 120.0);
        assert_eq!(o.neighbor_count, 10);
        assert_eq!(o.bounds().half, Coord::new(3_000.0, 3_000.0));
    }

    #[test]
    fn deserializes_with_defaults_when_missing_fields() {
        let o: BuildOptions = serde_json::from_value(json!({ "max_points": 50 })).unwrap();
        assert_eq!(o.max_points, 50);
        assert_eq!(o.node_capacity, DEFAULT_NODE_CAPACITY);
        assert_eq!(o.pick_candidates, DEFAULT_PICK_CANDIDATES);
    }
}
