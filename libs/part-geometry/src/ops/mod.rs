//! # Mesh Operations
//!
//! Operations that turn contours and curves into meshes, and meshes into
//! perturbed meshes.

pub mod extrude;
pub mod perturb;
pub mod sweep;
mod triangulate;

pub use triangulate::triangulate;
