use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::entities::{PartId, UsageType};
use crate::geometry::DTransformation;
use crate::geometry::primitives::Point;

new_key_type! {
    /// Unique key of a part committed to a [`GeometryHost`](crate::placement::GeometryHost)
    pub struct PlacedKey;
}

/// A part committed to the world
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedPart {
    pub key: PlacedKey,
    pub part_id: PartId,
    pub usage: UsageType,
    /// Mesh point the part was meant for. Hosts that only see the pose record the pivot position
    pub mesh_point: Point,
    /// Pose the part was committed with (pivot translation and rotation)
    pub d_transf: DTransformation,
}

impl PlacedPart {
    pub fn position(&self) -> Point {
        self.d_transf.translation().into()
    }

    pub fn rotation_deg(&self) -> f64 {
        self.d_transf.rotation_deg()
    }
}

/// Why a mesh point could not be resolved
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionReason {
    /// The main part and every smaller fallback (edge escape included) were blocked
    CatalogExhausted,
    /// The catalog holds no usable main part for the usage-type
    NoMainPart,
    /// No end-piece combination fits the remaining gap of a row
    NoCombination,
}

/// Mesh point left unresolved
#[derive(Clone, Debug, PartialEq)]
pub struct Collision {
    pub usage: UsageType,
    pub position: Point,
    /// The main part that was attempted, if there was one
    pub part_id: Option<PartId>,
    pub reason: CollisionReason,
}

/// Outcome of a build run (or of a single placement batch)
#[derive(Clone, Debug, Default)]
pub struct PlacementResult {
    pub placed: Vec<PlacedPart>,
    pub collisions: Vec<Collision>,
}

impl PlacementResult {
    pub fn extend(&mut self, other: PlacementResult) {
        self.placed.extend(other.placed);
        self.collisions.extend(other.collisions);
    }

    pub fn placed_of(&self, usage: UsageType) -> impl Iterator<Item = &PlacedPart> {
        self.placed.iter().filter(move |p| p.usage == usage)
    }

    pub fn collisions_of(&self, usage: UsageType) -> impl Iterator<Item = &Collision> {
        self.collisions.iter().filter(move |c| c.usage == usage)
    }

    /// Number of placed parts and unresolved collisions per usage-type
    pub fn summary(&self) -> BTreeMap<UsageType, (usize, usize)> {
        let mut summary = BTreeMap::new();
        for p in &self.placed {
            summary.entry(p.usage).or_insert((0, 0)).0 += 1;
        }
        for c in &self.collisions {
            summary.entry(c.usage).or_insert((0, 0)).1 += 1;
        }
        summary
    }
}
