pub mod cache;
pub mod errors;
pub mod geometry;
pub mod graph;
pub mod memo;
pub mod models;
pub mod options;
pub mod picker;
pub mod route_table;
pub mod selection;
pub mod spatial;
pub mod view;

pub use cache::{CachePhase, RouteCache};
pub use errors::FloorPathError;
pub use geometry::{Aabb, Coord};
pub use graph::{EdgeList, GraphBuilder, ShortestPathTable};
pub use memo::RouteMemo;
pub use models::{FloorPlan, Point, PointIndex, PointKind, PointRecord, RoomSpec, Route};
pub use options::BuildOptions;
pub use picker::{Pick, ProximityPicker};
pub use route_table::{RouteTable, TableStats};
pub use selection::RouteSelection;
pub use spatial::SpatialIndex;
pub use view::Viewport;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
