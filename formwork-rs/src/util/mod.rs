/// Set of functions used throughout to assure the correctness of the library.
pub mod assertions;

mod cancel;
mod fpa;

#[doc(inline)]
pub use cancel::CancelToken;
#[doc(inline)]
pub use fpa::FPA;

/// Absolute tolerance used by the geometric predicates (touching is not colliding).
pub const EPSILON: f64 = 1e-6;
