use anyhow::{Result, ensure};
use itertools::Itertools;
use ordered_float::OrderedFloat;

use crate::entities::{Part, PartId, UsageType};

/// Two widths within this distance are considered the same nominal width.
pub const WIDTH_TOLERANCE: f64 = 1e-3;

/// Read-only view over a collection of parts.
///
/// Storage is up to the implementor, only [`CatalogRepository::all`] is required.
/// The selection semantics (ordering and tie-breaks) are provided here and should not be overridden.
/// Queries never return parts without usable dimensions.
pub trait CatalogRepository {
    /// All parts, in catalog order
    fn all(&self) -> &[Part];

    fn part(&self, id: PartId) -> Option<&Part> {
        self.all().iter().find(|p| p.id == id)
    }

    /// Usable parts of a usage-type, in catalog order
    fn by_usage_type(&self, usage: UsageType) -> Vec<&Part> {
        self.all()
            .iter()
            .filter(|p| p.is_usable() && p.usage == usage)
            .collect()
    }

    /// Usable parts of a modulation group, in catalog order
    fn by_modulation(&self, modulation: u32) -> Vec<&Part> {
        self.all()
            .iter()
            .filter(|p| p.is_usable() && p.modulation == modulation)
            .collect()
    }

    fn by_usage_and_modulation(&self, usage: UsageType, modulation: u32) -> Vec<&Part> {
        self.all()
            .iter()
            .filter(|p| p.is_usable() && p.usage == usage && p.modulation == modulation)
            .collect()
    }

    /// The widest part of `usage` in the modulation group of `part` whose width is strictly
    /// smaller than the width of `part`. The first one in catalog order wins on equal widths.
    fn next_smaller(&self, part: &Part, usage: UsageType) -> Option<&Part> {
        self.by_usage_and_modulation(usage, part.modulation)
            .into_iter()
            .filter(|p| p.width < part.width)
            //max_by_key returns the last maximum, reverse to keep the first one
            .rev()
            .max_by_key(|p| OrderedFloat(p.width))
    }

    /// Part of `usage` whose width matches the width of `part` within [`WIDTH_TOLERANCE`].
    /// Parts of the same modulation group are preferred.
    fn respective_of_type(&self, part: &Part, usage: UsageType) -> Option<&Part> {
        let matching = self
            .by_usage_type(usage)
            .into_iter()
            .filter(|p| (p.width - part.width).abs() <= WIDTH_TOLERANCE)
            .collect_vec();

        matching
            .iter()
            .find(|p| p.modulation == part.modulation)
            .or(matching.first())
            .copied()
    }

    /// Sequence of fallback parts for `part`: what repeated calls to
    /// [`CatalogRepository::next_smaller`] would return, in descending width.
    fn descending_chain(&self, part: &Part, usage: UsageType) -> Vec<&Part> {
        self.by_usage_and_modulation(usage, part.modulation)
            .into_iter()
            .filter(|p| p.width < part.width)
            //stable sort: catalog order is kept among equal widths
            .sorted_by_key(|p| std::cmp::Reverse(OrderedFloat(p.width)))
            .dedup_by(|a, b| a.width == b.width)
            .collect()
    }
}

/// In-memory catalog, loaded at engine start and immutable during a build run.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    parts: Vec<Part>,
}

impl Catalog {
    pub fn new(parts: Vec<Part>) -> Result<Self> {
        let duplicate = parts.iter().map(|p| p.id).duplicates().next();
        ensure!(
            duplicate.is_none(),
            "catalog contains duplicate part id: {duplicate:?}"
        );
        Ok(Catalog { parts })
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl CatalogRepository for Catalog {
    fn all(&self) -> &[Part] {
        &self.parts
    }
}
