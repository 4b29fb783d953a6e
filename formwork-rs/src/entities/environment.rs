use serde::{Deserialize, Serialize};

use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::{Point, Rect, SPolygon};
use crate::util::assertions;
use crate::{FormworkError, Result};

/// Vertex chain as resolved from the host document.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Polyline {
    pub fn closed(points: Vec<Point>) -> Self {
        Polyline {
            points,
            closed: true,
        }
    }

    fn into_polygon(self, what: &str) -> Result<SPolygon> {
        if !self.closed {
            return Err(FormworkError::validation(format!("{what} is not closed")));
        }
        SPolygon::new(self.points)
            .map_err(|e| FormworkError::validation(format!("{what} is not a simple polygon: {e}")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    Beam,
    Column,
}

/// Pre-existing structure that parts may not intersect
#[derive(Clone, Debug)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub shape: SPolygon,
}

/// Snapshot of the floor to be tiled: outline, obstacles and holes ("empties").
/// Immutable once constructed.
#[derive(Clone, Debug)]
pub struct Environment {
    outline: SPolygon,
    obstacles: Vec<Obstacle>,
    holes: Vec<SPolygon>,
}

impl Environment {
    /// Validates and builds the environment.
    /// Fails with [`FormworkError::Validation`] if any of the polylines is not a closed simple polygon.
    pub fn new(
        outline: Polyline,
        obstacles: Vec<(ObstacleKind, Polyline)>,
        holes: Vec<Polyline>,
    ) -> Result<Self> {
        let outline = outline.into_polygon("outline")?;
        let obstacles = obstacles
            .into_iter()
            .enumerate()
            .map(|(i, (kind, pl))| {
                let shape = pl.into_polygon(&format!("{kind:?} obstacle {i}"))?;
                Ok(Obstacle { kind, shape })
            })
            .collect::<Result<Vec<_>>>()?;
        let holes = holes
            .into_iter()
            .enumerate()
            .map(|(i, pl)| pl.into_polygon(&format!("hole {i}")))
            .collect::<Result<Vec<_>>>()?;

        let env = Environment {
            outline,
            obstacles,
            holes,
        };
        debug_assert!(assertions::environment_is_consistent(&env));
        Ok(env)
    }

    /// Environment with an outline only
    pub fn from_outline(outline: Vec<Point>) -> Result<Self> {
        Environment::new(Polyline::closed(outline), vec![], vec![])
    }

    pub fn outline(&self) -> &SPolygon {
        &self.outline
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn holes(&self) -> &[SPolygon] {
        &self.holes
    }

    pub fn bbox(&self) -> Rect {
        self.outline.bbox
    }

    /// Whether `point` lies inside any of the holes
    pub fn in_hole(&self, point: &Point) -> bool {
        self.holes.iter().any(|h| h.collides_with(point))
    }
}
