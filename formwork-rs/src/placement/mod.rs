//! Greedy placement of catalog parts on the generated meshes.

pub mod builder;
pub mod gap_fill;
mod host;
pub mod strategy;

#[doc(inline)]
pub use builder::run_placement;
#[doc(inline)]
pub use gap_fill::{GapFill, find_best_combination};
#[doc(inline)]
pub use host::{GeometryHost, HostError, World};
#[doc(inline)]
pub use strategy::can_place;
