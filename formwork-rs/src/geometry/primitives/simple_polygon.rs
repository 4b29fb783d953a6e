use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::geometry::Transformation;
use crate::geometry::geo_enums::GeoPosition;
use crate::geometry::geo_traits::{CollidesWith, DistanceTo, Shape, Transformable};
use crate::geometry::is_inside_polygon;
use crate::geometry::primitives::Edge;
use crate::geometry::primitives::Point;
use crate::geometry::primitives::Rect;
use crate::util::EPSILON;
use anyhow::{Result, bail, ensure};

/// Geometric primitive representing a simple polygon: <https://en.wikipedia.org/wiki/Simple_polygon>
/// The closing edge from the last vertex back to the first is implicit.
#[derive(Clone, Debug)]
pub struct SPolygon {
    /// Set of bounds describing the polygon
    pub vertices: Vec<Point>,
    /// Bounding box
    pub bbox: Rect,
    pub area: f64,
}

impl SPolygon {
    /// Creates a new simple polygon from a set of points.
    /// An explicit closing vertex (first == last) is dropped.
    /// Fails for fewer than three distinct vertices, zero area or self-intersecting boundaries.
    pub fn new(mut vertices: Vec<Point>) -> Result<Self> {
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        ensure!(
            vertices.len() >= 3,
            "simple polygon must have at least 3 points: {vertices:?}"
        );
        ensure!(
            vertices.iter().unique().count() == vertices.len(),
            "simple polygon should not contain duplicate points: {vertices:?}"
        );

        let area = match SPolygon::calculate_area(&vertices) {
            area if area.abs() < EPSILON => bail!("simple polygon has no area: {vertices:?}"),
            area if area < 0.0 => {
                //edges should always be ordered counterclockwise (positive area)
                vertices.reverse();
                -area
            }
            area => area,
        };
        let bbox = Rect::bounding(&vertices)?;
        let polygon = SPolygon {
            vertices,
            bbox,
            area,
        };
        ensure!(
            polygon.is_simple(),
            "polygon boundary intersects itself: {:?}",
            polygon.vertices
        );
        Ok(polygon)
    }

    /// Axis-aligned rectangle as a polygon
    pub fn from_rect(r: Rect) -> Self {
        SPolygon {
            vertices: r.corners().to_vec(),
            bbox: r,
            area: r.width() * r.height(),
        }
    }

    pub fn vertex(&self, i: usize) -> Point {
        self.vertices[i]
    }

    pub fn edge(&self, i: usize) -> Edge {
        let j = (i + 1) % self.n_vertices();
        Edge {
            start: self.vertices[i],
            end: self.vertices[j],
        }
    }

    pub fn edge_iter(&self) -> impl Iterator<Item = Edge> + '_ {
        (0..self.n_vertices()).map(move |i| self.edge(i))
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// No two non-adjacent edges touch and no two adjacent edges fold back onto each other.
    pub fn is_simple(&self) -> bool {
        let n = self.n_vertices();
        (0..n).tuple_combinations().all(|(i, j)| {
            let (e_i, e_j) = (self.edge(i), self.edge(j));
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            match adjacent {
                //adjacent edges share one vertex, they may only overlap if they fold back
                true => {
                    let shared = if j == i + 1 { e_i.end } else { e_i.start };
                    let d_i = (if j == i + 1 { e_i.start } else { e_i.end }) - shared;
                    let d_j = (if j == i + 1 { e_j.end } else { e_j.start }) - shared;
                    !(d_i.cross(&d_j).abs() < EPSILON && d_i.dot(&d_j) > 0.0)
                }
                false => !e_i.collides_with(&e_j),
            }
        })
    }

    //https://en.wikipedia.org/wiki/Shoelace_formula
    //counterclockwise = positive area, clockwise = negative area
    pub fn calculate_area(points: &[Point]) -> f64 {
        let mut sigma: f64 = 0.0;
        for i in 0..points.len() {
            //next point
            let j = (i + 1) % points.len();

            let (x_i, y_i) = points[i].into();
            let (x_j, y_j) = points[j].into();

            sigma += (y_i + y_j) * (x_i - x_j)
        }

        0.5 * sigma
    }

    /// Winding-angle containment test, see [`is_inside_polygon`].
    pub fn contains(&self, point: &Point) -> bool {
        is_inside_polygon(&self.vertices, point)
    }

    /// Position of the point with respect to the polygon, points within [`EPSILON`]
    /// of the boundary are considered on it and yield `None`.
    pub fn position_of(&self, point: &Point) -> Option<GeoPosition> {
        if self.distance_to_boundary(point) <= EPSILON {
            return None;
        }
        match self.contains(point) {
            true => Some(GeoPosition::Interior),
            false => Some(GeoPosition::Exterior),
        }
    }

    pub fn distance_to_boundary(&self, point: &Point) -> f64 {
        self.edge_iter()
            .map(|edge| OrderedFloat(edge.sq_distance_to(point)))
            .min()
            .map_or(f64::INFINITY, |d| d.0.sqrt())
    }

    /// Whether any edge of `self` properly crosses an edge of `other`.
    pub fn boundary_crosses(&self, other: &SPolygon) -> bool {
        if !self.bbox.collides_with(&other.bbox) {
            return false;
        }
        self.edge_iter()
            .cartesian_product(other.edge_iter().collect_vec())
            .any(|(e1, e2)| e1.crosses(&e2))
    }

    /// Whether any probe point of `other` (vertices, edge midpoints and, if it lies inside
    /// `other`, its centroid) lies strictly inside `self`
    pub fn strictly_contains_probe_of(&self, other: &SPolygon) -> bool {
        other
            .probe_points()
            .iter()
            .filter(|p| self.bbox.collides_with(*p))
            .any(|p| self.position_of(p) == Some(GeoPosition::Interior))
    }

    /// Vertices, edge midpoints and the centroid (if it lies inside)
    pub fn probe_points(&self) -> Vec<Point> {
        let midpoints = self
            .edge_iter()
            .map(|e| Point((e.start.0 + e.end.0) / 2.0, (e.start.1 + e.end.1) / 2.0));
        let centroid = Some(self.centroid())
            .filter(|c| self.position_of(c) == Some(GeoPosition::Interior));

        self.vertices
            .iter()
            .copied()
            .chain(midpoints)
            .chain(centroid)
            .collect()
    }
}

impl CollidesWith<SPolygon> for SPolygon {
    /// Region collision: boundaries properly cross or one polygon pokes into the other.
    /// Polygons that merely touch do not collide.
    fn collides_with(&self, other: &SPolygon) -> bool {
        self.bbox.collides_with(&other.bbox)
            && (self.boundary_crosses(other)
                || self.strictly_contains_probe_of(other)
                || other.strictly_contains_probe_of(self))
    }
}

impl CollidesWith<Point> for SPolygon {
    fn collides_with(&self, point: &Point) -> bool {
        self.bbox.collides_with(point) && self.contains(point)
    }
}

impl Shape for SPolygon {
    fn centroid(&self) -> Point {
        //based on: https://en.wikipedia.org/wiki/Centroid#Of_a_polygon
        let area = self.area();
        let mut c_x = 0.0;
        let mut c_y = 0.0;

        for i in 0..self.n_vertices() {
            let j = (i + 1) % self.n_vertices();
            let Point(x_i, y_i) = self.vertex(i);
            let Point(x_j, y_j) = self.vertex(j);
            c_x += (x_i + x_j) * (x_i * y_j - x_j * y_i);
            c_y += (y_i + y_j) * (x_i * y_j - x_j * y_i);
        }

        c_x /= 6.0 * area;
        c_y /= 6.0 * area;

        (c_x, c_y).into()
    }

    fn area(&self) -> f64 {
        self.area
    }

    fn bbox(&self) -> Rect {
        self.bbox
    }
}

impl Transformable for SPolygon {
    fn transform(&mut self, t: &Transformation) -> &mut Self {
        //destructuring pattern to ensure that the code is updated when the struct changes
        let SPolygon {
            vertices,
            bbox,
            area: _,
        } = self;

        vertices.iter_mut().for_each(|p| {
            p.transform(t);
        });

        //regenerate bounding box
        *bbox = Rect::bounding(vertices).expect("rigid transformation preserves the bounding box");

        self
    }
}
