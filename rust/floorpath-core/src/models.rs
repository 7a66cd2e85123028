use serde::{Deserialize, Serialize};

use crate::errors::FloorPathError;
use crate::geometry::{centroid, Coord};

/// Stable point identity, assigned in input order (0..N-1).
pub type PointIndex = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointKind {
    Waypoint,
    RoomAnchor { label: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub index: PointIndex,
    pub coord: Coord,
    #[serde(flatten)]
    pub kind: PointKind,
}

impl Point {
    pub fn label(&self) -> Option<&str> {
        match &self.kind {
            PointKind::RoomAnchor { label } => Some(label.as_str()),
            PointKind::Waypoint => None,
        }
    }

    pub fn is_room(&self) -> bool {
        matches!(self.kind, PointKind::RoomAnchor { .. })
    }

    /// Assigns indices in record order.
    pub fn from_records(records: &[PointRecord]) -> Vec<Point> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| Point {
                index: i as PointIndex,
                coord: Coord::new(r.x, r.y),
                kind: match &r.label {
                    Some(label) => PointKind::RoomAnchor { label: label.clone() },
                    None => PointKind::Waypoint,
                },
            })
            .collect()
    }
}

/// Flat `(label, x, y)` record handed over by the drawing parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub x: f64,
    pub y: f64,
}

impl PointRecord {
    pub fn waypoint(x: f64, y: f64) -> Self {
        Self { label: None, x, y }
    }

    pub fn room(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self { label: Some(label.into()), x, y }
    }
}

/// A named room: either an explicit anchor or an outline whose centroid
/// becomes the anchor. An explicit anchor wins when both are given.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomSpec {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor: Option<Coord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outline: Vec<Coord>,
}

impl RoomSpec {
    pub fn anchor(&self) -> Result<Coord, FloorPathError> {
        self.anchor
            .or_else(|| centroid(&self.outline))
            .ok_or_else(|| FloorPathError::EmptyRegion(self.label.clone()))
    }
}

/// Geometry extracted from a floor-plan drawing: corridor waypoints and rooms.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    #[serde(default)]
    pub waypoints: Vec<Coord>,
    #[serde(default)]
    pub rooms: Vec<RoomSpec>,
}

impl FloorPlan {
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Waypoints first, then rooms in declaration order.
    pub fn records(&self) -> Result<Vec<PointRecord>, FloorPathError> {
        let mut out = Vec::with_capacity(self.waypoints.len() + self.rooms.len());
        out.extend(self.waypoints.iter().map(|w| PointRecord::waypoint(w.x, w.y)));
        for room in &self.rooms {
            let a = room.anchor()?;
            out.push(PointRecord::room(room.label.clone(), a.x, a.y));
        }
        Ok(out)
    }
}

/// A reconstructed walk between two rooms. Empty when unreachable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub nodes: Vec<PointIndex>,
    pub path: Vec<Coord>,
    pub length: Option<f64>,
}

impl Route {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
