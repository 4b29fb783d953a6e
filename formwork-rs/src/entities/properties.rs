use log::warn;

use crate::entities::{CatalogRepository, Environment, Part, PartId, UsageType};
use crate::ensure_invariant;
use crate::geometry::primitives::Point;
use crate::mesh::{Orientation, Sweep};
use crate::{FormworkError, Result};

/// User selections for a build run, as they come from the configuration dialog.
#[derive(Clone, Debug, PartialEq)]
pub struct SlabSettings {
    /// Cast panel
    pub cast: Option<PartId>,
    /// Primary spacer, "LD"
    pub primary_spacer: PartId,
    /// Field spacer, "LP"
    pub field_spacer: PartId,
    pub start_spacer: Option<PartId>,
    pub modulation: u32,
    pub orientation: Orientation,
    pub use_secondary_spacers: bool,
    pub use_end_spacers: bool,
    pub use_start_spacer: bool,
    pub only_formwork: bool,
    /// Distance kept free along the outline
    pub outline_clearance: f64,
    /// Gap between two consecutive field spacers of a row
    pub spacing_field_spacers: f64,
    /// Gap between a row of field spacers and the primary spacers
    pub spacing_field_primary: f64,
    /// Start of the layout, the outline's bounding box corner if not specified
    pub start_point: Option<Point>,
}

/// Read-only configuration snapshot of a build run, with parts resolved and derived values computed.
#[derive(Clone, Debug)]
pub struct SlabProperties {
    pub cast: Option<Part>,
    pub primary_spacer: Part,
    pub field_spacer: Part,
    pub start_spacer: Option<Part>,
    pub modulation: u32,
    pub sweep: Sweep,
    pub use_secondary_spacers: bool,
    pub use_end_spacers: bool,
    pub use_start_spacer: bool,
    pub only_formwork: bool,
    pub outline_clearance: f64,
    pub spacing_field_spacers: f64,
    pub spacing_field_primary: f64,
    /// Origin of the layout, displacement included
    pub start_point: Point,
    /// Far corner bounding every mesh
    pub max_point: Point,
    /// Number of consecutive cast panels between two primary-spacer seams
    pub cast_group_size: usize,
}

impl SlabProperties {
    pub fn new(
        settings: &SlabSettings,
        catalog: &dyn CatalogRepository,
        env: &Environment,
    ) -> Result<Self> {
        let SlabSettings {
            cast,
            primary_spacer,
            field_spacer,
            start_spacer,
            modulation,
            orientation,
            use_secondary_spacers,
            use_end_spacers,
            use_start_spacer,
            only_formwork,
            outline_clearance,
            spacing_field_spacers,
            spacing_field_primary,
            start_point,
        } = settings.clone();

        for (name, value) in [
            ("outline clearance", outline_clearance),
            ("spacing between field spacers", spacing_field_spacers),
            ("spacing between field and primary spacers", spacing_field_primary),
        ] {
            ensure_invariant!(
                value.is_finite() && value >= 0.0,
                "{name} must be a non-negative number, got {value}"
            );
        }

        let primary_spacer = resolve_part(catalog, primary_spacer, UsageType::PrimarySpacer)?;
        let field_spacer = resolve_part(catalog, field_spacer, UsageType::Spacer)?;
        let cast = cast
            .map(|id| resolve_part(catalog, id, UsageType::Form))
            .transpose()?;
        let start_spacer = start_spacer
            .map(|id| resolve_part(catalog, id, UsageType::StartSpacer))
            .transpose()?;

        let cast_group_size = match (&cast, only_formwork) {
            (Some(cast), false) => {
                let n = (primary_spacer.greatest_dimension() / cast.width).floor() as usize;
                ensure_invariant!(
                    n > 0,
                    "cast panel {} is wider than primary spacer {}, no cast group fits",
                    cast.name,
                    primary_spacer.name
                );
                n
            }
            (Some(cast), true) => {
                (primary_spacer.greatest_dimension() / cast.width).floor() as usize
            }
            (None, only_formwork) => {
                if !only_formwork {
                    warn!("[PROPS] no cast panel selected, casts will not be laid out");
                }
                0
            }
        };
        if use_start_spacer && start_spacer.is_none() {
            warn!("[PROPS] start spacer requested but none selected, ignoring");
        }

        let sweep = Sweep::new(orientation);
        let bbox = env.bbox();
        let displacement = {
            let advance = match only_formwork {
                true => outline_clearance + spacing_field_spacers / 2.0,
                false => outline_clearance,
            };
            sweep.to_world(Point::ORIGIN, advance, outline_clearance)
        };
        let start_point = start_point.unwrap_or(bbox.min_corner()) + displacement;
        let max_point = bbox.max_corner() - Point(outline_clearance, outline_clearance);

        Ok(SlabProperties {
            cast,
            primary_spacer,
            field_spacer,
            start_spacer,
            modulation,
            sweep,
            use_secondary_spacers,
            use_end_spacers,
            use_start_spacer,
            only_formwork,
            outline_clearance,
            spacing_field_spacers,
            spacing_field_primary,
            start_point,
            max_point,
            cast_group_size,
        })
    }

    pub fn orientation(&self) -> Orientation {
        self.sweep.orientation
    }

    /// The start spacer, if one is selected and enabled
    pub fn active_start_spacer(&self) -> Option<&Part> {
        self.start_spacer.as_ref().filter(|_| self.use_start_spacer)
    }

    /// Cast panel, unless casts are skipped in only-formwork mode
    pub fn active_cast(&self) -> Option<&Part> {
        self.cast.as_ref().filter(|_| !self.only_formwork)
    }

    /// Distance between two consecutive rows of field spacers
    pub fn row_pitch(&self) -> f64 {
        self.primary_spacer.width + 2.0 * self.spacing_field_primary + self.field_spacer.height
    }

    /// Distance between two consecutive field spacers of a row
    pub fn field_pitch(&self) -> f64 {
        self.field_spacer.width + self.spacing_field_spacers
    }

    /// Extent `(U, V)` of the layout in the local sweep frame
    pub fn local_extent(&self) -> (f64, f64) {
        self.sweep.to_local(self.start_point, self.max_point)
    }

    pub fn to_world(&self, u: f64, v: f64) -> Point {
        self.sweep.to_world(self.start_point, u, v)
    }
}

fn resolve_part(catalog: &dyn CatalogRepository, id: PartId, usage: UsageType) -> Result<Part> {
    let part = catalog
        .part(id)
        .ok_or_else(|| FormworkError::invariant(format!("part {id} not found in catalog")))?;
    ensure_invariant!(
        part.usage == usage,
        "part {} is a {} part, expected {}",
        part.name,
        part.usage,
        usage
    );
    part.ensure_usable()
        .map_err(|e| FormworkError::invariant(e.to_string()))?;
    Ok(part.clone())
}
