use itertools::Itertools;
use log::error;

use crate::entities::{Environment, PlacementResult};
use crate::geometry::geo_traits::Shape;
use crate::mesh::Meshes;
use crate::placement::GeometryHost;

//Various checks to verify correctness of the state of the system
//Used in debug_assertion!() blocks

pub fn environment_is_consistent(env: &Environment) -> bool {
    let outline = env.outline();
    if outline.area() <= 0.0 {
        error!("outline has no positive area: {}", outline.area());
        return false;
    }
    let shapes = env
        .obstacles()
        .iter()
        .map(|o| &o.shape)
        .chain(env.holes().iter());
    for s in shapes {
        if s.area() <= 0.0 || s.vertices.iter().any(|v| !v.0.is_finite() || !v.1.is_finite()) {
            error!("degenerate obstacle or hole: {:?}", s.vertices);
            return false;
        }
    }
    true
}

pub fn meshes_are_finite(meshes: &Meshes) -> bool {
    [
        &meshes.secondary_spacers,
        &meshes.primary_spacers,
        &meshes.field_spacers,
        &meshes.start_spacers,
        &meshes.headers,
        &meshes.casts,
    ]
    .iter()
    .flat_map(|m| m.iter())
    .all(|p| p.0.is_finite() && p.1.is_finite())
}

/// Every part in the result has to be known by the host, exactly once
pub fn result_matches_host(result: &PlacementResult, host: &dyn GeometryHost) -> bool {
    let host_keys = host.placed().iter().map(|p| p.key).collect_vec();
    let unknown = result
        .placed
        .iter()
        .filter(|p| !host_keys.contains(&p.key))
        .collect_vec();
    if !unknown.is_empty() {
        error!("{} placed parts are unknown to the host", unknown.len());
        return false;
    }
    result.placed.iter().map(|p| p.key).all_unique()
}
