pub mod quadtree;

pub use quadtree::{Entry, Neighbor, QuadTreeConfig, SpatialIndex};
