use serde::{Deserialize, Serialize};

use crate::entities::{CollisionReason, ObstacleKind, UsageType};
use crate::mesh::Meshes;

/// External representation of a [`Part`](crate::entities::Part).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPart {
    /// Unique identifier of the part within the catalog
    pub id: u64,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub usage: UsageType,
    #[serde(default)]
    pub modulation: u32,
    /// Anchor in the part's local frame. Centre of the part if not specified
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub pivot: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "is_zero", default)]
    pub start_offset: f64,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub layer: String,
}

/// A chain of vertices, the closing vertex may be repeated
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPolyline {
    pub points: Vec<(f64, f64)>,
    #[serde(default = "default_closed")]
    pub closed: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtObstacle {
    pub kind: ObstacleKind,
    pub shape: ExtPolyline,
}

/// External representation of an [`Environment`](crate::entities::Environment).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtEnvironment {
    pub outline: ExtPolyline,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub obstacles: Vec<ExtObstacle>,
    /// Openings in the slab ("empties")
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub holes: Vec<ExtPolyline>,
}

/// External representation of the [`SlabSettings`](crate::entities::SlabSettings) of a run.
/// Parts are referenced by their catalog id.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSlabProperties {
    #[serde(default)]
    pub cast: Option<u64>,
    pub primary_spacer: u64,
    pub field_spacer: u64,
    #[serde(default)]
    pub start_spacer: Option<u64>,
    #[serde(default)]
    pub modulation: u32,
    /// Sweep angle in degrees, 0 (vertical) or 90 (horizontal)
    #[serde(default)]
    pub orientation: f64,
    #[serde(default)]
    pub use_secondary_spacers: bool,
    #[serde(default)]
    pub use_end_spacers: bool,
    #[serde(default)]
    pub use_start_spacer: bool,
    #[serde(default)]
    pub only_formwork: bool,
    #[serde(default)]
    pub outline_clearance: f64,
    #[serde(default)]
    pub spacing_field_spacers: f64,
    #[serde(default)]
    pub spacing_field_primary: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_point: Option<(f64, f64)>,
}

/// Everything needed for a build run
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtBuildRequest {
    pub name: String,
    pub catalog: Vec<ExtPart>,
    pub environment: ExtEnvironment,
    pub properties: ExtSlabProperties,
}

/// External representation of a [`PlacedPart`](crate::entities::PlacedPart).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacedPart {
    pub part_id: u64,
    pub usage: UsageType,
    /// World position of the part's pivot
    pub position: (f64, f64),
    /// Rotation in degrees
    pub rotation: f64,
}

/// External representation of a [`Collision`](crate::entities::Collision).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtCollision {
    pub usage: UsageType,
    pub position: (f64, f64),
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub part_id: Option<u64>,
    pub reason: CollisionReason,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtUsageSummary {
    pub usage: UsageType,
    pub placed: usize,
    pub collisions: usize,
}

/// Outcome of a build run
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacementReport {
    pub name: String,
    pub placed: Vec<ExtPlacedPart>,
    pub collisions: Vec<ExtCollision>,
    pub summary: Vec<ExtUsageSummary>,
    /// The generated meshes, only when requested
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub meshes: Option<Meshes>,
    pub run_time_ms: u64,
}

fn default_closed() -> bool {
    true
}

fn is_zero(v: &f64) -> bool {
    *v == 0.0
}
