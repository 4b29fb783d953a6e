use std::time::Instant;

use itertools::Itertools;

use crate::entities::{Collision, PlacedPart, PlacementResult};
use crate::io::ext_repr::{ExtCollision, ExtPlacedPart, ExtPlacementReport, ExtUsageSummary};
use crate::mesh::Meshes;

/// Exports a [`PlacementResult`] by composing an [`ExtPlacementReport`] from it.
/// The meshes are only included if given.
pub fn export_report(
    name: &str,
    result: &PlacementResult,
    meshes: Option<&Meshes>,
    epoch: Instant,
) -> ExtPlacementReport {
    ExtPlacementReport {
        name: name.to_string(),
        placed: result.placed.iter().map(export_placed_part).collect_vec(),
        collisions: result.collisions.iter().map(export_collision).collect_vec(),
        summary: result
            .summary()
            .into_iter()
            .map(|(usage, (placed, collisions))| ExtUsageSummary {
                usage,
                placed,
                collisions,
            })
            .collect_vec(),
        meshes: meshes.cloned(),
        run_time_ms: epoch.elapsed().as_millis() as u64,
    }
}

pub fn export_placed_part(pp: &PlacedPart) -> ExtPlacedPart {
    ExtPlacedPart {
        part_id: pp.part_id as u64,
        usage: pp.usage,
        position: pp.position().into(),
        rotation: pp.rotation_deg(),
    }
}

pub fn export_collision(c: &Collision) -> ExtCollision {
    ExtCollision {
        usage: c.usage,
        position: c.position.into(),
        part_id: c.part_id.map(|id| id as u64),
        reason: c.reason,
    }
}
