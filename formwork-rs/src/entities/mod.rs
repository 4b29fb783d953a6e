mod catalog;
mod environment;
mod part;
mod placed_part;
mod properties;

#[doc(inline)]
pub use catalog::{Catalog, CatalogRepository, WIDTH_TOLERANCE};

#[doc(inline)]
pub use environment::{Environment, Obstacle, ObstacleKind, Polyline};

#[doc(inline)]
pub use part::{Part, PartId, UsageType};

#[doc(inline)]
pub use placed_part::{Collision, CollisionReason, PlacedKey, PlacedPart, PlacementResult};

#[doc(inline)]
pub use properties::{SlabProperties, SlabSettings};
