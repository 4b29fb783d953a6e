use serde::{Deserialize, Serialize};

use crate::geometry::primitives::Point;
use crate::geometry::vector_from;
use crate::util::{EPSILON, FPA};
use crate::{FormworkError, Result};

/// The two supported global layout directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// 0°: rows run along x, they are stacked along y
    Vertical,
    /// 90°: rows run along y, they are stacked along x
    Horizontal,
}

impl Orientation {
    pub fn angle_deg(&self) -> f64 {
        match self {
            Orientation::Vertical => 0.0,
            Orientation::Horizontal => 90.0,
        }
    }

    pub fn from_degrees(angle: f64) -> Result<Self> {
        match angle.rem_euclid(360.0) {
            a if FPA(a) == FPA(0.0) || FPA(a) == FPA(360.0) => Ok(Orientation::Vertical),
            a if FPA(a) == FPA(90.0) => Ok(Orientation::Horizontal),
            a => Err(FormworkError::invariant(format!(
                "unsupported orientation angle {a}°, expected 0° or 90°"
            ))),
        }
    }
}

/// Axis assignment of a sweep orientation.
///
/// Every generator and the placement strategy work in a local `(u, v)` frame: `v` runs along a
/// row of field spacers, `u` advances from row to row. Both orientations share one algorithm and
/// only differ in these values; the horizontal sweep is the vertical one with the axes swapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    pub orientation: Orientation,
    /// Unit vector of the row axis `v`
    pub row_axis: Point,
    /// Unit vector of the advance axis `u`
    pub advance_axis: Point,
    /// Rotation (degrees) of parts whose width runs along a row
    pub row_rotation: f64,
    /// Rotation (degrees) of parts whose width runs along the advance axis
    pub advance_rotation: f64,
}

impl Sweep {
    pub fn new(orientation: Orientation) -> Self {
        let angle = orientation.angle_deg();
        let row_axis = snap_to_axis(vector_from(angle));
        Sweep {
            orientation,
            row_axis,
            advance_axis: row_axis.transposed(),
            row_rotation: angle,
            //the part's x-axis has to map onto +advance for both orientations
            advance_rotation: 90.0 - angle,
        }
    }

    /// World position of the local coordinates `(u, v)` relative to `origin`
    pub fn to_world(&self, origin: Point, u: f64, v: f64) -> Point {
        origin + self.advance_axis * u + self.row_axis * v
    }

    /// Local coordinates `(u, v)` of `point` relative to `origin`
    pub fn to_local(&self, origin: Point, point: Point) -> (f64, f64) {
        let d = point - origin;
        (d.dot(&self.advance_axis), d.dot(&self.row_axis))
    }
}

//the sweeps are axis aligned, cos(90°) should be exactly 0
fn snap_to_axis(p: Point) -> Point {
    let snap = |c: f64| if c.abs() < EPSILON { 0.0 } else { c.round() };
    Point(snap(p.0), snap(p.1))
}
