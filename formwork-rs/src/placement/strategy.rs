use log::{debug, trace};

use crate::entities::{Environment, Part, PlacedPart};
use crate::geometry::geo_enums::GeoPosition;
use crate::geometry::primitives::Point;
use crate::placement::{GeometryHost, HostError};
use crate::{FormworkError, Result};

/// Whether `part`, with its pivot on `point` and rotated by `rotation` degrees, fits the environment.
///
/// Fails if the point lies outside the outline or inside a hole, or if the footprint collides with
/// the outline boundary, an obstacle or a hole. Parts already committed to the host are not
/// considered.
pub fn can_place(
    env: &Environment,
    host: &dyn GeometryHost,
    point: Point,
    part: &Part,
    rotation: f64,
) -> bool {
    let outline = env.outline();
    if !outline.contains(&point) || env.in_hole(&point) {
        return false;
    }
    let footprint = part.placed_footprint(point, rotation);

    let leaves_outline = footprint.boundary_crosses(outline)
        || footprint
            .probe_points()
            .iter()
            .any(|p| outline.position_of(p) == Some(GeoPosition::Exterior))
        || outline
            .vertices
            .iter()
            .any(|v| footprint.position_of(v) == Some(GeoPosition::Interior));
    if leaves_outline {
        return false;
    }

    let hits_obstacle = env
        .obstacles()
        .iter()
        .any(|o| host.intersects(&footprint, &o.shape));
    let hits_hole = env.holes().iter().any(|h| host.intersects(&footprint, h));

    !(hits_obstacle || hits_hole)
}

/// A single mesh point to resolve
#[derive(Clone, Debug)]
pub struct Cell<'a> {
    pub point: Point,
    /// Rotation of the part in degrees
    pub rotation: f64,
    /// Direction the width of the part runs along once rotated
    pub width_axis: Point,
    pub main: &'a Part,
    /// Smaller substitutes, widest first
    pub fallbacks: &'a [&'a Part],
}

#[derive(Clone, Debug, PartialEq)]
pub enum CellOutcome {
    Placed(PlacedPart),
    /// Neither the main part nor any of the fallbacks could be placed
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CellState {
    TryMain,
    Fallback(usize),
    EdgeEscape(usize),
}

/// Resolves a cell: the main part, then every fallback at the same point, then every fallback
/// shifted so its trailing edge lines up with the one of the main part.
/// Every fallback is tried at most once per phase.
pub fn resolve_cell(
    env: &Environment,
    host: &mut dyn GeometryHost,
    cell: &Cell,
) -> Result<CellOutcome> {
    let mut state = CellState::TryMain;
    loop {
        let (part, point, next) = match state {
            CellState::TryMain => (cell.main, cell.point, CellState::Fallback(0)),
            CellState::Fallback(i) => match cell.fallbacks.get(i) {
                Some(&p) => (p, cell.point, CellState::Fallback(i + 1)),
                None => {
                    state = CellState::EdgeEscape(0);
                    continue;
                }
            },
            CellState::EdgeEscape(i) => match cell.fallbacks.get(i) {
                Some(&p) => {
                    let shift = edge_escape_shift(cell.main, p);
                    (p, cell.point + cell.width_axis * shift, CellState::EdgeEscape(i + 1))
                }
                None => {
                    trace!("[PLACE] cell at {:?} exhausted", cell.point);
                    return Ok(CellOutcome::Exhausted);
                }
            },
        };
        if let Some(placed) = try_commit(env, host, cell, part, point)? {
            if state != CellState::TryMain {
                debug!(
                    "[PLACE] {} substituted by {} at {:?} ({:?})",
                    cell.main.name, part.name, point, state
                );
            }
            return Ok(CellOutcome::Placed(placed));
        }
        state = next;
    }
}

/// Distance along the width axis that puts the trailing edge of `candidate` on the trailing
/// edge of `main`
pub fn edge_escape_shift(main: &Part, candidate: &Part) -> f64 {
    (main.width - main.pivot.x()) - (candidate.width - candidate.pivot.x())
}

fn try_commit(
    env: &Environment,
    host: &mut dyn GeometryHost,
    cell: &Cell,
    part: &Part,
    point: Point,
) -> Result<Option<PlacedPart>> {
    if !can_place(env, host, point, part, cell.rotation) {
        return Ok(None);
    }
    let d_transf = Part::pose(point, cell.rotation);
    match host.commit(part, d_transf) {
        Ok(key) => Ok(Some(PlacedPart {
            key,
            part_id: part.id,
            usage: part.usage,
            mesh_point: cell.point,
            d_transf,
        })),
        Err(HostError::Rejected(reason)) => {
            debug!("[PLACE] {reason}");
            Ok(None)
        }
        Err(HostError::Fatal(reason)) => Err(FormworkError::Host(reason)),
    }
}
