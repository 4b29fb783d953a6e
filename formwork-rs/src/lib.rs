#![doc = document_features::document_features!()]
//! Layout engine for modular slab formwork.
//!
//! Given a floor outline with obstacles and openings, a catalog of formwork parts and a set of
//! [`SlabProperties`](entities::SlabProperties), the engine generates candidate placement meshes
//! per usage-type and places parts greedily, substituting smaller catalog parts where the main
//! part does not fit.

/// Geometric primitives and base algorithms
pub mod geometry;

/// Parts, catalog queries, the environment and per-run properties
pub mod entities;

/// Grid-mesh generators and the scan-line edge finder
pub mod mesh;

/// Gap filling, the per-cell placement strategy and the build orchestrator
pub mod placement;

/// Importing build requests into and exporting placement reports out of this library
pub mod io;

/// Helper functions which do not belong to any specific module
pub mod util;

mod error;

#[doc(inline)]
pub use error::{FormworkError, Result};
