//! # Part Geometry
//!
//! Procedural triangle meshes for parametric mechanical parts: gears,
//! pipes, springs, bolts and nuts.
//!
//! ## Architecture
//!
//! ```text
//! (PartType, ParameterMap) → parts (clamp) → contour / curve
//!                                          → ops::extrude / ops::sweep
//!                                          → ops::perturb → Mesh
//! ```
//!
//! ## Algorithms
//!
//! All algorithms are pure Rust and allocation-bounded:
//! - **Triangulation**: Ear clipping with hole bridging, robust predicates
//! - **Extrusion**: Ring stacking with a rounded, mitred bevel
//! - **Sweeps**: Centripetal Catmull-Rom paths, rotation-minimizing frames
//! - **Perturbation**: Position-keyed, seeded noise
//!
//! ## Usage
//!
//! ```rust
//! use part_geometry::{generate, params::schema, PartType};
//!
//! let mut parameters = schema::default_parameters(PartType::Nut);
//! parameters.set_value("sides", 8.0);
//!
//! let mesh = generate(PartType::Nut, &parameters)?;
//! let positions = mesh.vertices_f32();
//! assert_eq!(positions.len(), mesh.vertex_count() * 3);
//! # Ok::<(), part_geometry::GeometryError>(())
//! ```

pub mod contour;
pub mod curve;
pub mod error;
pub mod material;
pub mod mesh;
pub mod ops;
pub mod params;
pub mod parts;
pub mod primitives;
pub mod session;

pub use error::{GeometryError, ParameterOutOfRange};
pub use material::Material;
pub use mesh::{Mesh, MeshBuilder};
pub use params::{Parameter, ParameterMap, PartSpec, PartType};
pub use parts::{generate, generate_with_config, PartGenerator};
pub use session::{LatestMesh, PartSession};

pub use config::constants::GeneratorConfig;
