use anyhow::Result;
use anyhow::ensure;

use crate::geometry::Transformation;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Transformable};
use crate::geometry::primitives::Point;
use crate::util::EPSILON;

/// Line segment between two [`Point`]s
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Edge {
    pub start: Point,
    pub end: Point,
}

impl Edge {
    pub fn try_new(start: Point, end: Point) -> Result<Self> {
        ensure!(start != end, "degenerate edge, {start:?} == {end:?}");
        Ok(Edge { start, end })
    }

    /// Returns the closest point which lies on the edge to the given point
    pub fn closest_point_on_edge(&self, point: &Point) -> Point {
        //from https://stackoverflow.com/a/6853926
        let Point(x1, y1) = self.start;
        let Point(x2, y2) = self.end;
        let Point(x, y) = point;

        let a = x - x1;
        let b = y - y1;
        let c = x2 - x1;
        let d = y2 - y1;

        let dot = a * c + b * d;
        let len_sq = c * c + d * d;
        let mut param = -1.0;
        if len_sq != 0.0 {
            param = dot / len_sq;
        }
        let (xx, yy) = match param {
            p if p < 0.0 => (x1, y1),              //start is the closest point
            p if p > 1.0 => (x2, y2),              //end is the closest point
            _ => (x1 + param * c, y1 + param * d), //closest point is on the edge
        };

        Point(xx, yy)
    }

    /// Whether the two edges cross at a point strictly inside both of them.
    /// Touching endpoints and (near-)parallel overlaps do not count.
    pub fn crosses(&self, other: &Edge) -> bool {
        match edge_intersection(self, other) {
            Some((t, u)) => {
                let inner = EPSILON..=(1.0 - EPSILON);
                inner.contains(&t) && inner.contains(&u)
            }
            None => false,
        }
    }

    /// Location where the two edges intersect, endpoints included
    pub fn collides_at(&self, other: &Edge) -> Option<Point> {
        match edge_intersection(self, other) {
            Some((t, u)) if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) => {
                let Point(x1, y1) = self.start;
                let Point(x2, y2) = self.end;
                Some(Point(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
            }
            _ => None,
        }
    }

    pub fn x_min(&self) -> f64 {
        f64::min(self.start.0, self.end.0)
    }

    pub fn y_min(&self) -> f64 {
        f64::min(self.start.1, self.end.1)
    }

    pub fn x_max(&self) -> f64 {
        f64::max(self.start.0, self.end.0)
    }

    pub fn y_max(&self) -> f64 {
        f64::max(self.start.1, self.end.1)
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl Transformable for Edge {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        let Edge { start, end } = self;
        start.transform(t);
        end.transform(t);

        self
    }
}

impl DistanceTo<Point> for Edge {
    #[inline(always)]
    fn distance_to(&self, point: &Point) -> f64 {
        f64::sqrt(self.sq_distance_to(point))
    }

    #[inline(always)]
    fn sq_distance_to(&self, point: &Point) -> f64 {
        let Point(x, y) = point;
        let Point(xx, yy) = self.closest_point_on_edge(point);

        let (dx, dy) = (x - xx, y - yy);
        dx.powi(2) + dy.powi(2)
    }
}

impl CollidesWith<Edge> for Edge {
    #[inline(always)]
    fn collides_with(&self, other: &Edge) -> bool {
        self.collides_at(other).is_some()
    }
}

/// Parameters `(t, u)` of the intersection of the lines through both edges,
/// measured from the start of `e1` and `e2` respectively. `None` for parallel edges.
#[inline(always)]
fn edge_intersection(e1: &Edge, e2: &Edge) -> Option<(f64, f64)> {
    if f64::max(e1.x_min(), e2.x_min()) > f64::min(e1.x_max(), e2.x_max())
        || f64::max(e1.y_min(), e2.y_min()) > f64::min(e1.y_max(), e2.y_max())
    {
        //bounding boxes do not overlap
        return None;
    }

    //based on: https://en.wikipedia.org/wiki/Line%E2%80%93line_intersection#Given_two_points_on_each_line_segment
    let r = e1.end - e1.start;
    let s = e2.end - e2.start;
    let denom = r.cross(&s);

    if denom.abs() < f64::EPSILON * r.norm() * s.norm() {
        //parallel edges
        return None;
    }
    let qp = e2.start - e1.start;
    let t = qp.cross(&s) / denom;
    let u = qp.cross(&r) / denom;
    Some((t, u))
}
