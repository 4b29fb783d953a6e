use std::fmt::Display;

use anyhow::{Result, ensure};
use serde::{Deserialize, Serialize};

use crate::geometry::DTransformation;
use crate::geometry::geo_traits::Transformable;
use crate::geometry::primitives::{Point, Rect, SPolygon};

/// Identifier of a [`Part`] within a [`Catalog`](crate::entities::Catalog)
pub type PartId = usize;

/// Functional role of a part in the formwork.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageType {
    /// Cast panel
    Form,
    Box,
    /// Field spacer, "LP"
    #[serde(alias = "lp")]
    Spacer,
    StartSpacer,
    EndSpacer,
    /// Primary spacer, "LD"
    #[serde(alias = "ld")]
    PrimarySpacer,
    /// Secondary spacer, "LDS"
    #[serde(alias = "lds")]
    SecondarySpacer,
    /// Header, "Head"
    #[serde(alias = "header")]
    Head,
}

impl Display for UsageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UsageType::Form => "cast",
            UsageType::Box => "box",
            UsageType::Spacer => "LP",
            UsageType::StartSpacer => "start",
            UsageType::EndSpacer => "end",
            UsageType::PrimarySpacer => "LD",
            UsageType::SecondarySpacer => "LDS",
            UsageType::Head => "head",
        };
        f.write_str(s)
    }
}

/// Catalog entry of a formwork component.
///
/// The part's local frame is the rectangle `[0, width] × [0, height]`, with `width` running along
/// the x-axis. The `pivot` is the anchor that is put on a mesh point when the part gets placed.
#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub id: PartId,
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub usage: UsageType,
    /// Bucket of interchangeable sizes sharing a nominal module
    pub modulation: u32,
    pub pivot: Point,
    /// Extra leading offset when the part opens a row
    pub start_offset: f64,
    /// Layer of the host document the part is drawn on
    pub layer: String,
}

impl Part {
    /// Creates a part with its pivot in the centre of its rectangle.
    pub fn new(
        id: PartId,
        name: impl Into<String>,
        width: f64,
        height: f64,
        usage: UsageType,
        modulation: u32,
    ) -> Self {
        Part {
            id,
            name: name.into(),
            width,
            height,
            usage,
            modulation,
            pivot: Point(width / 2.0, height / 2.0),
            start_offset: 0.0,
            layer: String::new(),
        }
    }

    pub fn with_pivot(mut self, pivot: Point) -> Self {
        self.pivot = pivot;
        self
    }

    pub fn with_start_offset(mut self, start_offset: f64) -> Self {
        self.start_offset = start_offset;
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    /// Parts with a zero dimension are kept in the catalog but never selected.
    pub fn is_usable(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn ensure_usable(&self) -> Result<()> {
        ensure!(
            self.is_usable(),
            "part {} ({}) has no usable dimensions: {} x {}",
            self.id,
            self.name,
            self.width,
            self.height
        );
        Ok(())
    }

    pub fn greatest_dimension(&self) -> f64 {
        f64::max(self.width, self.height)
    }

    /// Outline of the part in its own frame, translated so that the pivot lies on the origin.
    pub fn footprint(&self) -> SPolygon {
        let Point(px, py) = self.pivot;
        SPolygon::from_rect(Rect {
            x_min: -px,
            y_min: -py,
            x_max: self.width - px,
            y_max: self.height - py,
        })
    }

    /// Pose that puts the pivot on `anchor`, rotated by `rotation_deg`.
    pub fn pose(anchor: Point, rotation_deg: f64) -> DTransformation {
        DTransformation::from_degrees(rotation_deg, anchor.into())
    }

    /// Footprint of the part placed with its pivot on `anchor`, rotated by `rotation_deg`.
    pub fn placed_footprint(&self, anchor: Point, rotation_deg: f64) -> SPolygon {
        let t = Part::pose(anchor, rotation_deg).compose();
        self.footprint().transform_clone(&t)
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}x{} ({}, mod {})",
            self.name, self.id, self.width, self.height, self.usage, self.modulation
        )
    }
}
