pub mod builder;
pub mod table;

pub use builder::{EdgeList, GraphBuilder};
pub use table::ShortestPathTable;
