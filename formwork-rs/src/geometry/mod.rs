mod d_transformation;
mod transformation;
mod vector_ops;

/// Enums to classify geometric relations
pub mod geo_enums;
/// Traits shared by the geometric primitives
pub mod geo_traits;
/// Point, edge, rectangle and simple polygon
pub mod primitives;

#[doc(inline)]
pub use d_transformation::DTransformation;
#[doc(inline)]
pub use transformation::Transformation;
#[doc(inline)]
pub use vector_ops::{is_inside_polygon, rotate_point, signed_angle, vector_from};
