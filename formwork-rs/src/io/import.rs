use anyhow::{Context, Result, ensure};
use itertools::Itertools;
use log::warn;

use crate::entities::{Catalog, Environment, Part, Polyline, SlabProperties, SlabSettings};
use crate::geometry::primitives::Point;
use crate::io::ext_repr::{ExtBuildRequest, ExtEnvironment, ExtPart, ExtPolyline, ExtSlabProperties};
use crate::mesh::Orientation;

/// Converts external representations of parts, environments and settings into internal ones.
#[derive(Clone, Debug, Copy, Default)]
pub struct Importer {
    /// Drop parts without usable dimensions instead of keeping them (unselectable) in the catalog
    pub skip_unusable_parts: bool,
}

/// A fully imported build request, ready to be turned into [`SlabProperties`]
#[derive(Clone, Debug)]
pub struct BuildRequest {
    pub name: String,
    pub catalog: Catalog,
    pub environment: Environment,
    pub settings: SlabSettings,
}

impl BuildRequest {
    /// Resolves the settings against the catalog and the environment.
    pub fn properties(&self) -> crate::Result<SlabProperties> {
        SlabProperties::new(&self.settings, &self.catalog, &self.environment)
    }
}

impl Importer {
    pub fn new(skip_unusable_parts: bool) -> Importer {
        Importer { skip_unusable_parts }
    }

    pub fn import_part(&self, ext_part: &ExtPart) -> Result<Part> {
        ensure!(
            ext_part.width.is_finite() && ext_part.height.is_finite(),
            "part {} has non-finite dimensions",
            ext_part.id
        );
        let part = Part::new(
            ext_part.id as usize,
            ext_part.name.clone(),
            ext_part.width,
            ext_part.height,
            ext_part.usage,
            ext_part.modulation,
        )
        .with_start_offset(ext_part.start_offset)
        .with_layer(ext_part.layer.clone());

        Ok(match ext_part.pivot {
            Some(pivot) => part.with_pivot(pivot.into()),
            None => part,
        })
    }

    pub fn import_catalog(&self, ext_parts: &[ExtPart]) -> Result<Catalog> {
        let parts: Vec<Part> = ext_parts
            .iter()
            .map(|ep| self.import_part(ep))
            .collect::<Result<_>>()?;

        let unusable = parts
            .iter()
            .filter(|p| !p.is_usable())
            .map(|p| &p.name)
            .join(", ");
        if !unusable.is_empty() {
            warn!("parts without usable dimensions: [{unusable}]");
        }
        let parts = match self.skip_unusable_parts {
            true => parts.into_iter().filter(Part::is_usable).collect(),
            false => parts,
        };
        Catalog::new(parts)
    }

    pub fn import_environment(&self, ext_env: &ExtEnvironment) -> Result<Environment> {
        let obstacles = ext_env
            .obstacles
            .iter()
            .map(|eo| (eo.kind, import_polyline(&eo.shape)))
            .collect_vec();
        let holes = ext_env.holes.iter().map(import_polyline).collect_vec();

        let env = Environment::new(import_polyline(&ext_env.outline), obstacles, holes)?;
        Ok(env)
    }

    pub fn import_settings(&self, ext_props: &ExtSlabProperties) -> Result<SlabSettings> {
        Ok(SlabSettings {
            cast: ext_props.cast.map(|id| id as usize),
            primary_spacer: ext_props.primary_spacer as usize,
            field_spacer: ext_props.field_spacer as usize,
            start_spacer: ext_props.start_spacer.map(|id| id as usize),
            modulation: ext_props.modulation,
            orientation: Orientation::from_degrees(ext_props.orientation)?,
            use_secondary_spacers: ext_props.use_secondary_spacers,
            use_end_spacers: ext_props.use_end_spacers,
            use_start_spacer: ext_props.use_start_spacer,
            only_formwork: ext_props.only_formwork,
            outline_clearance: ext_props.outline_clearance,
            spacing_field_spacers: ext_props.spacing_field_spacers,
            spacing_field_primary: ext_props.spacing_field_primary,
            start_point: ext_props.start_point.map(Point::from),
        })
    }

    pub fn import_request(&self, ext_request: &ExtBuildRequest) -> Result<BuildRequest> {
        let catalog = self
            .import_catalog(&ext_request.catalog)
            .context("invalid catalog")?;
        let environment = self
            .import_environment(&ext_request.environment)
            .context("invalid environment")?;
        let settings = self
            .import_settings(&ext_request.properties)
            .context("invalid slab properties")?;

        Ok(BuildRequest {
            name: ext_request.name.clone(),
            catalog,
            environment,
            settings,
        })
    }
}

fn import_polyline(ext_polyline: &ExtPolyline) -> Polyline {
    Polyline {
        points: ext_polyline.points.iter().map(|&p| Point::from(p)).collect(),
        closed: ext_polyline.closed,
    }
}
