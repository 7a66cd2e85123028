use thiserror::Error;

/// Input-contract violations surfaced to callers.
///
/// Absence (no neighbor in a window, unreachable pair) is not an error and is
/// reported as `None` or an empty route instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FloorPathError {
    #[error("unknown room: {0}")]
    UnknownLabel(String),
    #[error("point ({x}, {y}) lies outside the index bounds")]
    OutOfBounds { x: f64, y: f64 },
    #[error("too many points: {count} exceeds cap {cap}")]
    TooManyPoints { count: usize, cap: usize },
    #[error("no path found")]
    NoPathFound,
    #[error("duplicate room label: {0}")]
    DuplicateLabel(String),
    #[error("room {0} has neither an anchor nor a non-empty outline")]
    EmptyRegion(String),
    #[error("route table not built yet")]
    NotReady,
}
