//! Mesh generators, one per usage-type.
//!
//! Each generator is a pure function of the [`SlabProperties`] and the [`Environment`]. Positions
//! are computed in the local `(u, v)` frame of the sweep (see [`super::Sweep`]) from an integer
//! index, never by accumulating a running coordinate. Points whose anchor lies outside the outline
//! are not emitted.

use itertools::Itertools;
use log::debug;

use crate::ensure_invariant;
use crate::entities::{Environment, SlabProperties};
use crate::geometry::primitives::Point;
use crate::mesh::scan_line::{outline_surrounding_points, EndScan};
use crate::util::EPSILON;
use crate::Result;

/// Positions `first + i·step` for which `position + far ≤ bound`.
fn positions(first: f64, step: f64, far: f64, bound: f64, what: &str) -> Result<Vec<f64>> {
    ensure_invariant!(
        step.is_finite() && step > 0.0,
        "{what}: increment must be positive, got {step}"
    );
    let room = bound - far - first;
    if room < -EPSILON {
        return Ok(vec![]);
    }
    let n = ((room + EPSILON) / step).floor() as usize;
    Ok((0..=n).map(|i| first + i as f64 * step).collect())
}

fn inside(env: &Environment, p: &Point) -> bool {
    env.outline().contains(p)
}

/// `u` of every line of field spacers
fn field_lines(props: &SlabProperties) -> Result<Vec<f64>> {
    let (u_max, _) = props.local_extent();
    let h_lp = props.field_spacer.height;
    positions(h_lp / 2.0, props.row_pitch(), h_lp / 2.0, u_max, "field spacer lines")
}

/// `v` of every primary spacer row, this is also the raster of the cast panels and headers
fn primary_rows(props: &SlabProperties) -> Result<Vec<f64>> {
    let (_, v_max) = props.local_extent();
    let h_ld = props.primary_spacer.height;
    let pitch = props.cast.as_ref().map_or(h_ld, |c| c.height);
    positions(h_ld / 2.0, pitch, h_ld / 2.0, v_max, "primary spacer rows")
}

/// `v` of the first field spacer slot of a line
fn first_field_slot(props: &SlabProperties) -> f64 {
    let lp = &props.field_spacer;
    let s0 = match props.active_start_spacer() {
        Some(start) => start.start_offset + start.width + props.spacing_field_spacers,
        None => 0.0,
    };
    s0 + lp.start_offset + lp.pivot.x()
}

/// Secondary and primary spacer meshes.
/// With secondary spacers enabled, the first and last row of every bay move to the former.
pub fn primary_spacers(
    props: &SlabProperties,
    env: &Environment,
) -> Result<(Vec<Point>, Vec<Point>)> {
    let (u_max, _) = props.local_extent();
    let ld = &props.primary_spacer;
    let bay_start = props.field_spacer.height + props.spacing_field_primary;
    let bays = positions(
        bay_start + ld.pivot.x(),
        props.row_pitch(),
        ld.width - ld.pivot.x(),
        u_max,
        "primary spacer bays",
    )?;
    let rows = primary_rows(props)?;

    let mut secondary = vec![];
    let mut primary = vec![];
    for &u in &bays {
        for (j, &v) in rows.iter().enumerate() {
            let p = props.to_world(u, v);
            if !inside(env, &p) {
                continue;
            }
            let bay_edge = j == 0 || j + 1 == rows.len();
            match props.use_secondary_spacers && bay_edge {
                true => secondary.push(p),
                false => primary.push(p),
            }
        }
    }
    Ok((secondary, primary))
}

/// Field spacer mesh and, with end spacers enabled, the end scan of every line.
/// Slots starting between a line's scan anchor and the outline edge it found are left to gap
/// filling. Slots past that edge (beyond a notch of a concave outline) stay in the mesh.
pub fn field_spacers(
    props: &SlabProperties,
    env: &Environment,
) -> Result<(Vec<Point>, Vec<EndScan>)> {
    let (_, v_max) = props.local_extent();
    let lp = &props.field_spacer;
    let pitch = props.field_pitch();
    let first = first_field_slot(props);
    let slots = positions(first, pitch, lp.width - lp.pivot.x(), v_max, "field spacer slots")?;
    //lookahead must be able to leave the outline, even for slots flush with its bounding box
    let scan_max = env.bbox().inflate(pitch).max_corner();

    let mut points = vec![];
    let mut scans = vec![];
    for u in field_lines(props)? {
        let line_start = props.to_world(u, first);
        //stretch of the line covered by end pieces, in v
        let mut covered = None;
        if props.use_end_spacers && inside(env, &line_start) {
            let scan = outline_surrounding_points(
                props.sweep.row_axis,
                line_start,
                scan_max,
                pitch,
                env.outline(),
            )?;
            if let Some(mut scan) = scan {
                //previous precedes the line start when the very first slot is already the last one
                let anchor_index = scan.last_index.saturating_sub(1).min(slots.len());
                let anchor_v = first + anchor_index as f64 * pitch;
                let (_, edge_v) = props.sweep.to_local(props.start_point, scan.edge);
                scan.anchor = props.to_world(u, anchor_v);
                covered = Some((anchor_v, edge_v));
                scans.push(scan);
            }
        }
        let is_covered = |v: f64| match covered {
            Some((anchor_v, edge_v)) => v > anchor_v - EPSILON && v - lp.pivot.x() < edge_v,
            None => false,
        };
        points.extend(
            slots
                .iter()
                .filter(|&&v| !is_covered(v))
                .map(|&v| props.to_world(u, v))
                .filter(|p| inside(env, p)),
        );
    }
    Ok((points, scans))
}

/// One start spacer at the head of every field spacer line
pub fn start_spacers(props: &SlabProperties, env: &Environment) -> Result<Vec<Point>> {
    let Some(start) = props.active_start_spacer() else {
        return Ok(vec![]);
    };
    let (_, v_max) = props.local_extent();
    let v = start.start_offset + start.pivot.x();
    if v + start.width - start.pivot.x() > v_max + EPSILON {
        return Ok(vec![]);
    }
    Ok(field_lines(props)?
        .into_iter()
        .map(|u| props.to_world(u, v))
        .filter(|p| inside(env, p))
        .collect())
}

/// Headers on the crossings of the field spacer lines with the primary spacer rows
pub fn headers(props: &SlabProperties, env: &Environment) -> Result<Vec<Point>> {
    let (_, v_max) = props.local_extent();
    let rows = primary_rows(props)?;
    let pitch = props.cast.as_ref().map_or(props.primary_spacer.height, |c| c.height);
    let skip_first = props.active_start_spacer().is_some();

    let rows = rows
        .iter()
        .enumerate()
        .filter(|(j, _)| !(skip_first && *j == 0))
        .filter(|(j, v)| !(props.use_end_spacers && *j + 1 == rows.len() && **v + pitch > v_max))
        .map(|(_, v)| *v)
        .collect_vec();

    Ok(field_lines(props)?
        .into_iter()
        .cartesian_product(rows)
        .map(|(u, v)| props.to_world(u, v))
        .filter(|p| inside(env, p))
        .collect())
}

/// Cast panels, laid out in groups between two primary spacer seams
pub fn casts(props: &SlabProperties, env: &Environment) -> Result<Vec<Point>> {
    let Some(cast) = props.active_cast() else {
        return Ok(vec![]);
    };
    let (u_max, v_max) = props.local_extent();
    let n = props.cast_group_size;
    ensure_invariant!(n > 0, "cast group size must be positive");
    let w_c = cast.width;
    let seam = props.row_pitch() - n as f64 * w_c;
    ensure_invariant!(
        seam >= -EPSILON,
        "a cast group of {n} panels is wider than the row pitch"
    );

    let first = props.field_spacer.height + props.spacing_field_primary + cast.pivot.x();
    let far = w_c - cast.pivot.x();
    //groups only add distance, so this is an upper bound of the number of columns
    let max_columns = ((u_max.max(0.0) + EPSILON) / w_c).floor() as usize + 1;
    let columns = (0..max_columns)
        .map(|i| first + i as f64 * w_c + (i / n) as f64 * seam)
        .take_while(|u| u + far <= u_max + EPSILON)
        .collect_vec();
    let rows = positions(cast.height / 2.0, cast.height, cast.height / 2.0, v_max, "cast rows")?;

    debug!("[MESH] {} cast columns, {} cast rows", columns.len(), rows.len());
    Ok(columns
        .into_iter()
        .cartesian_product(rows)
        .map(|(u, v)| props.to_world(u, v))
        .filter(|p| inside(env, p))
        .collect())
}
