use log::trace;
use slotmap::{SecondaryMap, SlotMap};
use thiserror::Error;

use crate::entities::{Part, PlacedKey, PlacedPart};
use crate::geometry::DTransformation;
use crate::geometry::geo_traits::CollidesWith;
use crate::geometry::primitives::SPolygon;

/// Failure of a host commit.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HostError {
    /// The host refused this particular placement, the cell can try another candidate
    #[error("placement rejected by host: {0}")]
    Rejected(String),
    /// The host can no longer accept placements, the run has to stop
    #[error("fatal host failure: {0}")]
    Fatal(String),
}

/// The shared world parts are committed into.
///
/// The engine only ever appends to it, strictly sequentially.
pub trait GeometryHost {
    /// Commits `part` with its pivot put on the translation of `d_transf`.
    fn commit(&mut self, part: &Part, d_transf: DTransformation) -> Result<PlacedKey, HostError>;

    /// Region collision between two shapes
    fn intersects(&self, a: &SPolygon, b: &SPolygon) -> bool {
        a.collides_with(b)
    }

    /// All parts committed so far
    fn placed(&self) -> Vec<&PlacedPart>;
}

/// In-memory [`GeometryHost`].
#[derive(Clone, Debug, Default)]
pub struct World {
    placed_parts: SlotMap<PlacedKey, PlacedPart>,
    footprints: SecondaryMap<PlacedKey, SPolygon>,
    /// If set, a part overlapping an already committed part of the same usage-type is rejected
    rejects_overlaps: bool,
}

impl World {
    pub fn new() -> Self {
        World::default()
    }

    pub fn with_overlap_rejection(mut self, rejects_overlaps: bool) -> Self {
        self.rejects_overlaps = rejects_overlaps;
        self
    }

    pub fn get(&self, key: PlacedKey) -> Option<&PlacedPart> {
        self.placed_parts.get(key)
    }

    pub fn footprint(&self, key: PlacedKey) -> Option<&SPolygon> {
        self.footprints.get(key)
    }

    pub fn len(&self) -> usize {
        self.placed_parts.len()
    }

    /// True if no parts are committed
    pub fn is_empty(&self) -> bool {
        self.placed_parts.is_empty()
    }
}

impl GeometryHost for World {
    fn commit(&mut self, part: &Part, d_transf: DTransformation) -> Result<PlacedKey, HostError> {
        let anchor = d_transf.translation().into();
        let shape = part.placed_footprint(anchor, d_transf.rotation_deg());

        if self.rejects_overlaps {
            let overlap = self
                .placed_parts
                .iter()
                .filter(|(_, pp)| pp.usage == part.usage)
                .find(|(k, _)| self.intersects(&self.footprints[*k], &shape));
            if let Some((_, pp)) = overlap {
                return Err(HostError::Rejected(format!(
                    "{} at {} overlaps part {} at {:?}",
                    part.name,
                    d_transf,
                    pp.part_id,
                    pp.position()
                )));
            }
        }

        let key = self.placed_parts.insert_with_key(|key| PlacedPart {
            key,
            part_id: part.id,
            usage: part.usage,
            mesh_point: anchor,
            d_transf,
        });
        self.footprints.insert(key, shape);
        trace!("[PLACE] committed {} at {}", part.name, d_transf);
        Ok(key)
    }

    fn placed(&self) -> Vec<&PlacedPart> {
        self.placed_parts.values().collect()
    }
}
