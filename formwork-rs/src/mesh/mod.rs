//! Generation of the placement meshes, one set of anchor points per usage-type.

pub mod generators;
pub mod scan_line;
mod sweep;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::entities::{Environment, SlabProperties, UsageType};
use crate::geometry::primitives::Point;
use crate::util::CancelToken;
use crate::Result;

#[doc(inline)]
pub use scan_line::EndScan;
#[doc(inline)]
pub use sweep::{Orientation, Sweep};

/// Anchor points of every usage-type, in row-major order (advance axis outer).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Meshes {
    pub secondary_spacers: Vec<Point>,
    pub primary_spacers: Vec<Point>,
    pub field_spacers: Vec<Point>,
    pub start_spacers: Vec<Point>,
    pub headers: Vec<Point>,
    pub casts: Vec<Point>,
    #[serde(skip)]
    pub end_scans: Vec<EndScan>,
}

impl Meshes {
    /// Mesh of a usage-type. End spacers have no mesh of their own, see [`Meshes::end_scans`].
    pub fn points(&self, usage: UsageType) -> &[Point] {
        match usage {
            UsageType::SecondarySpacer => &self.secondary_spacers,
            UsageType::PrimarySpacer => &self.primary_spacers,
            UsageType::Spacer => &self.field_spacers,
            UsageType::StartSpacer => &self.start_spacers,
            UsageType::Head => &self.headers,
            UsageType::Form => &self.casts,
            UsageType::EndSpacer | UsageType::Box => &[],
        }
    }

    pub fn n_points(&self) -> usize {
        [
            &self.secondary_spacers,
            &self.primary_spacers,
            &self.field_spacers,
            &self.start_spacers,
            &self.headers,
            &self.casts,
        ]
        .iter()
        .map(|m| m.len())
        .sum()
    }
}

/// Runs all mesh generators. They are independent of each other and are forked onto the
/// current rayon thread pool.
pub fn generate_meshes(
    props: &SlabProperties,
    env: &Environment,
    cancel: &CancelToken,
) -> Result<Meshes> {
    cancel.check()?;
    let (u_max, v_max) = props.local_extent();
    debug!(
        "[MESH] generating meshes over a {:.3} x {:.3} local extent ({:?} sweep)",
        u_max,
        v_max,
        props.orientation()
    );

    let ((spacers, field), (start, (headers, casts))) = join(
        || {
            join(
                || generators::primary_spacers(props, env),
                || generators::field_spacers(props, env),
            )
        },
        || {
            join(
                || generators::start_spacers(props, env),
                || join(|| generators::headers(props, env), || generators::casts(props, env)),
            )
        },
    );
    cancel.check()?;

    let (secondary_spacers, primary_spacers) = spacers?;
    let (field_spacers, end_scans) = field?;
    let meshes = Meshes {
        secondary_spacers,
        primary_spacers,
        field_spacers,
        start_spacers: start?,
        headers: headers?,
        casts: casts?,
        end_scans,
    };
    info!(
        "[MESH] {} points generated ({} LDS, {} LD, {} LP, {} start, {} head, {} cast, {} end scans)",
        meshes.n_points(),
        meshes.secondary_spacers.len(),
        meshes.primary_spacers.len(),
        meshes.field_spacers.len(),
        meshes.start_spacers.len(),
        meshes.headers.len(),
        meshes.casts.len(),
        meshes.end_scans.len()
    );
    Ok(meshes)
}

#[cfg(feature = "parallel-meshes")]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    rayon::join(a, b)
}

#[cfg(not(feature = "parallel-meshes"))]
fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    (a(), b())
}
