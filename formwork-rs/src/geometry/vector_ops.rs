use std::f64::consts::PI;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::Point;

/// Signed angle (radians, normalised into (−π, π]) to turn vector `a` onto vector `b`.
pub fn signed_angle(a: Point, b: Point) -> f64 {
    let mut angle = b.1.atan2(b.0) - a.1.atan2(a.0);
    while angle > PI {
        angle -= 2.0 * PI;
    }
    while angle <= -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Winding-angle point-in-polygon test.
///
/// Sums the signed angles subtended at `point` by every edge of the polygon.
/// The sum is ±2π for interior points and 0 for exterior points, so `|sum| ≥ π` is used as the
/// threshold. Works for convex and concave simple polygons, the vertex order does not matter.
/// Points exactly on the boundary may end up on either side.
pub fn is_inside_polygon(polygon: &[Point], point: &Point) -> bool {
    let n = polygon.len();
    let winding: f64 = (0..n)
        .map(|i| {
            let a = polygon[i] - *point;
            let b = polygon[(i + 1) % n] - *point;
            signed_angle(a, b)
        })
        .sum();

    winding.abs() >= PI
}

/// Rotates `point` about the origin by `angle_deg` degrees (counterclockwise, right-handed z-axis).
pub fn rotate_point(point: Point, angle_deg: f64) -> Point {
    if angle_deg == 0.0 {
        return point;
    }
    let t = Transformation::from_rotation(angle_deg.to_radians());
    point.transform_clone(&t)
}

/// Unit vector of the x-axis rotated by `angle_deg` degrees.
pub fn vector_from(angle_deg: f64) -> Point {
    rotate_point(Point(1.0, 0.0), angle_deg)
}
