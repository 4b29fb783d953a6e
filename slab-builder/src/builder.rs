use anyhow::{Context, Result};
use itertools::Itertools;
use log::{debug, info};

use formwork_rs::entities::PlacementResult;
use formwork_rs::io::import::BuildRequest;
use formwork_rs::mesh::{Meshes, generate_meshes};
use formwork_rs::placement::{World, run_placement};
use formwork_rs::util::CancelToken;

use crate::config::BuilderConfig;

/// Runs a full build (mesh generation followed by placement) of an imported request
/// against an in-memory [`World`].
pub struct SlabBuilder {
    pub request: BuildRequest,
    pub config: BuilderConfig,
    pub world: World,
    cancel: CancelToken,
}

impl SlabBuilder {
    pub fn new(request: BuildRequest, config: BuilderConfig) -> Self {
        let world = World::new().with_overlap_rejection(config.world_rejects_overlaps);
        Self {
            request,
            config,
            world,
            cancel: CancelToken::new(),
        }
    }

    /// Handle which can be used to abort the build from another thread
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn build(&mut self) -> Result<(PlacementResult, Meshes)> {
        let props = self.request.properties()?;
        let env = &self.request.environment;

        let meshes = match self.config.mesh_threads {
            None => generate_meshes(&props, env, &self.cancel)?,
            Some(n_threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(n_threads)
                .thread_name(|i| format!("mesh-{i}"))
                .build()
                .context("could not create mesh thread pool")?
                .install(|| generate_meshes(&props, env, &self.cancel))?,
        };
        info!(
            "[BUILD] {}: {} candidate points generated",
            self.request.name,
            meshes.n_points()
        );

        let result = run_placement(
            &meshes,
            &props,
            env,
            &self.request.catalog,
            &mut self.world,
            &self.cancel,
        )?;

        debug!(
            "[BUILD] summary: {}",
            result
                .summary()
                .iter()
                .map(|(usage, (placed, collisions))| format!("{usage:?} {placed}/{collisions}"))
                .join(", ")
        );
        info!(
            "[BUILD] {}: {} parts placed, {} collisions",
            self.request.name,
            result.placed.len(),
            result.collisions.len()
        );

        Ok((result, meshes))
    }
}
