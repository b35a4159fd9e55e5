//! # Primitives
//!
//! Plain solids used where no contour or curve is involved: the bolt
//! countersink and the fallback shape returned for degenerate input.

pub mod cylinder;

pub use cylinder::create_cylinder;
