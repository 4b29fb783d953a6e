use log::trace;

use crate::ensure_invariant;
use crate::geometry::primitives::{Point, SPolygon};
use crate::util::EPSILON;
use crate::Result;

/// Step of the fine-grained march towards the outline boundary.
pub const FINE_SCAN_STEP: f64 = 0.1;

/// Reference points of an irregular row end, found by [`outline_surrounding_points`].
#[derive(Clone, Debug, PartialEq)]
pub struct EndScan {
    /// Last point before the outline boundary (fine-grained)
    pub edge: Point,
    /// Last full mesh step still inside the outline
    pub last: Point,
    /// One mesh step back from `last`
    pub previous: Point,
    /// Index of `last` along the scan, counted in mesh steps from the scan start
    pub last_index: usize,
    /// Where gap filling starts, set by the mesh generator
    pub anchor: Point,
    /// Unit vector the scan marched along
    pub direction: Point,
}

/// Number of whole steps that fit between `start` and `max` along `axis`.
fn steps_within(axis: Point, start: Point, max: Point, step: f64) -> usize {
    let extent = (max - start).dot(&axis);
    match extent < 0.0 {
        true => 0,
        false => ((extent + EPSILON) / step).floor() as usize,
    }
}

/// Marches from `start` along `axis` in steps of [`FINE_SCAN_STEP`] until the next step would
/// leave the outline. Returns the last point inside, or `None` if the bound is reached first.
pub fn first_hit(axis: Point, start: Point, max: Point, outline: &SPolygon) -> Option<Point> {
    let n = steps_within(axis, start, max, FINE_SCAN_STEP);
    (0..n)
        .map(|i| {
            let current = start + axis * (i as f64 * FINE_SCAN_STEP);
            let next = start + axis * ((i + 1) as f64 * FINE_SCAN_STEP);
            (current, next)
        })
        .find(|(_, next)| !outline.contains(next))
        .map(|(current, _)| current)
}

/// Marches from `start` along `axis` in mesh `step`s. At the first step whose lookahead leaves
/// the outline, returns the fine-grained edge hit, that step and the one before it.
/// Only the first crossing is reported. `None` if the bound is reached first.
pub fn outline_surrounding_points(
    axis: Point,
    start: Point,
    max: Point,
    step: f64,
    outline: &SPolygon,
) -> Result<Option<EndScan>> {
    ensure_invariant!(
        step.is_finite() && step > 0.0,
        "scan step must be positive, got {step}"
    );
    let n = steps_within(axis, start, max, step);

    let scan = (0..n).find_map(|j| {
        let last = start + axis * (j as f64 * step);
        let lookahead = start + axis * ((j + 1) as f64 * step);
        match outline.contains(&lookahead) {
            true => None,
            false => {
                let edge = first_hit(axis, last, max, outline).unwrap_or(last);
                Some(EndScan {
                    edge,
                    last,
                    previous: last - axis * step,
                    last_index: j,
                    anchor: last,
                    direction: axis,
                })
            }
        }
    });
    if let Some(scan) = &scan {
        trace!(
            "[SCAN] edge at ({:.3}, {:.3}) after {} steps",
            scan.edge.0,
            scan.edge.1,
            scan.last_index
        );
    }
    Ok(scan)
}
