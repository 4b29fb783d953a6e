use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use crate::entities::{
    CatalogRepository, Collision, CollisionReason, Environment, Part, PlacementResult,
    SlabProperties, UsageType,
};
use crate::geometry::primitives::Point;
use crate::mesh::{EndScan, Meshes};
use crate::placement::gap_fill::find_best_combination;
use crate::placement::strategy::{Cell, CellOutcome, resolve_cell};
use crate::placement::GeometryHost;
use crate::util::{CancelToken, assertions};
use crate::Result;

/// Places the parts of every usage-type on their meshes, in the fixed build order:
/// secondary spacers, primary spacers, end pieces, field spacers, start spacers, headers, casts.
///
/// Cells for which nothing fits end up as collisions in the result, they never abort the run.
/// Fails on cancellation (checked before every stage) or on a fatal host error, parts committed
/// up to that point stay in the host.
pub fn run_placement(
    meshes: &Meshes,
    props: &SlabProperties,
    env: &Environment,
    catalog: &dyn CatalogRepository,
    host: &mut dyn GeometryHost,
    cancel: &CancelToken,
) -> Result<PlacementResult> {
    let sweep = props.sweep;
    let along_row = (sweep.row_rotation, sweep.row_axis);
    let along_advance = (sweep.advance_rotation, sweep.advance_axis);
    let mut result = PlacementResult::default();

    if props.use_secondary_spacers {
        cancel.check()?;
        let main = catalog.respective_of_type(&props.primary_spacer, UsageType::SecondarySpacer);
        let stage = place_mesh(
            env,
            catalog,
            host,
            UsageType::SecondarySpacer,
            &meshes.secondary_spacers,
            main,
            along_advance,
        )?;
        result.extend(stage);
    }

    cancel.check()?;
    let stage = place_mesh(
        env,
        catalog,
        host,
        UsageType::PrimarySpacer,
        &meshes.primary_spacers,
        Some(&props.primary_spacer),
        along_advance,
    )?;
    result.extend(stage);

    if props.use_end_spacers {
        cancel.check()?;
        let stage = place_end_pieces(env, props, catalog, host, &meshes.end_scans)?;
        result.extend(stage);
    }

    cancel.check()?;
    let stage = place_mesh(
        env,
        catalog,
        host,
        UsageType::Spacer,
        &meshes.field_spacers,
        Some(&props.field_spacer),
        along_row,
    )?;
    result.extend(stage);

    if let Some(start) = props.active_start_spacer() {
        cancel.check()?;
        let stage = place_mesh(
            env,
            catalog,
            host,
            UsageType::StartSpacer,
            &meshes.start_spacers,
            Some(start),
            along_row,
        )?;
        result.extend(stage);
    }

    cancel.check()?;
    let head = widest_head(catalog, props.modulation);
    let stage = place_mesh(
        env,
        catalog,
        host,
        UsageType::Head,
        &meshes.headers,
        head,
        along_row,
    )?;
    result.extend(stage);

    if let Some(cast) = props.active_cast() {
        cancel.check()?;
        let stage = place_mesh(
            env,
            catalog,
            host,
            UsageType::Form,
            &meshes.casts,
            Some(cast),
            along_advance,
        )?;
        result.extend(stage);
    }

    debug_assert!(assertions::result_matches_host(&result, host));
    info!(
        "[BUILD] {} parts placed, {} collisions",
        result.placed.len(),
        result.collisions.len()
    );
    for (usage, (placed, collisions)) in result.summary() {
        debug!("[BUILD] {usage}: {placed} placed, {collisions} collisions");
    }
    Ok(result)
}

/// Widest header of the modulation group, the first one in catalog order on equal widths
fn widest_head(catalog: &dyn CatalogRepository, modulation: u32) -> Option<&Part> {
    catalog
        .by_usage_and_modulation(UsageType::Head, modulation)
        .into_iter()
        .rev()
        .max_by_key(|p| OrderedFloat(p.width))
}

fn place_mesh(
    env: &Environment,
    catalog: &dyn CatalogRepository,
    host: &mut dyn GeometryHost,
    usage: UsageType,
    points: &[Point],
    main: Option<&Part>,
    (rotation, width_axis): (f64, Point),
) -> Result<PlacementResult> {
    let mut result = PlacementResult::default();
    let Some(main) = main else {
        warn!(
            "[BUILD] no usable {usage} part in the catalog, {} points left unresolved",
            points.len()
        );
        result.collisions = points
            .iter()
            .map(|&position| Collision {
                usage,
                position,
                part_id: None,
                reason: CollisionReason::NoMainPart,
            })
            .collect();
        return Ok(result);
    };

    let fallbacks = catalog.descending_chain(main, usage);
    debug!(
        "[BUILD] placing {} on {} points, fallbacks: [{}]",
        main.name,
        points.len(),
        fallbacks.iter().map(|p| &p.name).join(", ")
    );
    for &point in points {
        let cell = Cell {
            point,
            rotation,
            width_axis,
            main,
            fallbacks: &fallbacks,
        };
        match resolve_cell(env, host, &cell)? {
            CellOutcome::Placed(placed) => result.placed.push(placed),
            CellOutcome::Exhausted => result.collisions.push(Collision {
                usage,
                position: point,
                part_id: Some(main.id),
                reason: CollisionReason::CatalogExhausted,
            }),
        }
    }
    Ok(result)
}

/// Fills the gap between the scan anchor and the outline edge of every row with the best
/// combination of an end spacer and a field spacer.
fn place_end_pieces(
    env: &Environment,
    props: &SlabProperties,
    catalog: &dyn CatalogRepository,
    host: &mut dyn GeometryHost,
    scans: &[EndScan],
) -> Result<PlacementResult> {
    let ends = catalog.by_usage_and_modulation(UsageType::EndSpacer, props.modulation);
    let fields = catalog.by_usage_and_modulation(UsageType::Spacer, props.modulation);
    let spacing = props.spacing_field_spacers;
    let rotation = props.sweep.row_rotation;
    let mut result = PlacementResult::default();

    for scan in scans {
        let dir = scan.direction;
        let gap_start = scan.anchor - dir * props.field_spacer.pivot.x();
        let available = (scan.edge - gap_start).dot(&dir).max(0.0);
        let fill = find_best_combination(&ends, &fields, available, spacing, props.outline_clearance);

        if fill.is_empty() {
            debug!("[BUILD] no end piece combination fits a gap of {available:.3}");
            result.collisions.push(Collision {
                usage: UsageType::EndSpacer,
                position: scan.anchor,
                part_id: None,
                reason: CollisionReason::NoCombination,
            });
            continue;
        }

        //inner field spacer first, the end spacer closes the row
        let mut cursor = gap_start;
        for piece in [fill.second, fill.first].into_iter().flatten() {
            let fallbacks = catalog.descending_chain(piece, piece.usage);
            let cell = Cell {
                point: cursor + dir * piece.pivot.x(),
                rotation,
                width_axis: dir,
                main: piece,
                fallbacks: &fallbacks,
            };
            match resolve_cell(env, host, &cell)? {
                CellOutcome::Placed(placed) => result.placed.push(placed),
                CellOutcome::Exhausted => result.collisions.push(Collision {
                    usage: piece.usage,
                    position: cell.point,
                    part_id: Some(piece.id),
                    reason: CollisionReason::CatalogExhausted,
                }),
            }
            cursor = cursor + dir * (piece.width + spacing);
        }
    }
    Ok(result)
}
