//! # Part Factory
//!
//! Dispatches a [`PartType`] and its [`ParameterMap`] to the matching
//! generator and returns a finished, Y-up [`Mesh`].
//!
//! ## Pipeline
//!
//! ```text
//! ParameterMap → clamp → contour / curve → extrude / sweep → perturb → Mesh
//! ```
//!
//! ## Failure Handling
//!
//! - A missing required parameter fails the call.
//! - Out-of-range values are clamped and logged at `debug`.
//! - Degenerate geometry or an exceeded output cap is logged at `warn` and
//!   replaced with a plain cylinder the size of the part's envelope.

mod bolt;
mod gear;
mod nut;
mod pipe;
mod spring;

#[cfg(test)]
mod tests;

pub use bolt::{Bolt, HeadType};
pub use gear::Gear;
pub use nut::Nut;
pub use pipe::Pipe;
pub use spring::Spring;

use crate::error::{GeometryError, ParameterOutOfRange};
use crate::mesh::Mesh;
use crate::params::{ParameterMap, PartType};
use crate::primitives::create_cylinder;
use config::constants::{GeneratorConfig, MIN_SEGMENTS};
use glam::DMat4;
use std::f64::consts::FRAC_PI_2;
use tracing::{debug, instrument, warn};

// =============================================================================
// GENERATOR TRAIT
// =============================================================================

/// Bounding cylinder of a part, used to size the fallback solid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub radius: f64,
    pub height: f64,
}

/// A part family that can be read from parameters and built into a mesh.
pub trait PartGenerator: Sized {
    /// The family this generator handles.
    const PART: PartType;

    /// Reads and clamps the part's parameters.
    ///
    /// Fails only with [`GeometryError::MissingParameter`].
    fn from_parameters(parameters: &ParameterMap) -> Result<Self, GeometryError>;

    /// Builds the mesh, centred on the origin with its axis along Y.
    fn build(&self, config: &GeneratorConfig) -> Result<Mesh, GeometryError>;

    /// Bounding cylinder of the finished part.
    fn envelope(&self) -> Envelope;
}

// =============================================================================
// FACTORY
// =============================================================================

/// Generates a part with the default configuration.
///
/// # Example
///
/// ```rust
/// use part_geometry::{generate, params::schema, PartType};
///
/// let parameters = schema::default_parameters(PartType::Gear);
/// let mesh = generate(PartType::Gear, &parameters)?;
/// assert!(mesh.vertex_count() > 0);
/// assert_eq!(mesh.index_count() % 3, 0);
/// # Ok::<(), part_geometry::GeometryError>(())
/// ```
pub fn generate(part_type: PartType, parameters: &ParameterMap) -> Result<Mesh, GeometryError> {
    generate_with_config(part_type, parameters, &GeneratorConfig::default())
}

/// Generates a part with an explicit configuration.
#[instrument(skip(parameters, config), fields(parameters = parameters.len()))]
pub fn generate_with_config(
    part_type: PartType,
    parameters: &ParameterMap,
    config: &GeneratorConfig,
) -> Result<Mesh, GeometryError> {
    match part_type {
        PartType::Gear => run::<Gear>(parameters, config),
        PartType::Pipe => run::<Pipe>(parameters, config),
        PartType::Spring => run::<Spring>(parameters, config),
        PartType::Bolt => run::<Bolt>(parameters, config),
        PartType::Nut => run::<Nut>(parameters, config),
    }
}

fn run<G: PartGenerator>(
    parameters: &ParameterMap,
    config: &GeneratorConfig,
) -> Result<Mesh, GeometryError> {
    let part = G::from_parameters(parameters)?;

    match part.build(config).and_then(|mesh| check_caps(mesh, config)) {
        Ok(mesh) => {
            debug!(
                part = %G::PART,
                vertices = mesh.vertex_count(),
                triangles = mesh.triangle_count(),
                "generated part"
            );
            Ok(mesh)
        }
        Err(err) if err.is_recoverable() => {
            warn!(part = %G::PART, error = %err, "generation failed, using fallback cylinder");
            fallback(part.envelope(), config)
        }
        Err(err) => Err(err),
    }
}

fn check_caps(mesh: Mesh, config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
    if mesh.vertex_count() > config.max_vertices {
        return Err(GeometryError::TooManyVertices {
            count: mesh.vertex_count(),
            max: config.max_vertices,
        });
    }
    if mesh.triangle_count() > config.max_triangles {
        return Err(GeometryError::TooManyTriangles {
            count: mesh.triangle_count(),
            max: config.max_triangles,
        });
    }
    Ok(mesh)
}

/// Plain centred cylinder filling the envelope.
fn fallback(envelope: Envelope, config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
    let positive = |v: f64| if v.is_finite() && v > 0.0 { v } else { 1.0 };
    create_cylinder(
        positive(envelope.height),
        positive(envelope.radius),
        positive(envelope.radius),
        true,
        config.circle_segments.max(MIN_SEGMENTS),
    )
}

// =============================================================================
// PARAMETER READING
// =============================================================================

/// Reads clamped values for one part family.
pub(crate) struct ParameterReader<'a> {
    part: PartType,
    parameters: &'a ParameterMap,
}

impl<'a> ParameterReader<'a> {
    pub(crate) fn new(part: PartType, parameters: &'a ParameterMap) -> Self {
        Self { part, parameters }
    }

    /// Value clamped to its declared bounds; missing ids are an error.
    pub(crate) fn required(&self, id: &str) -> Result<f64, GeometryError> {
        let parameter = self
            .parameters
            .get(id)
            .ok_or_else(|| GeometryError::missing(self.part, id))?;
        let applied = parameter.clamped();
        log_clamp(id, parameter.value, applied);
        Ok(applied)
    }

    /// Value clamped to its declared bounds, or `default` if absent.
    pub(crate) fn optional(&self, id: &str, default: f64) -> f64 {
        match self.parameters.get(id) {
            Some(parameter) => {
                let applied = parameter.clamped();
                log_clamp(id, parameter.value, applied);
                applied
            }
            None => default,
        }
    }
}

/// Holds `value` in `[low, high]`, logging when it moves.
///
/// `low` wins if the range is empty; NaN goes to `low`.
pub(crate) fn limit(id: &str, value: f64, low: f64, high: f64) -> f64 {
    let applied = if value.is_nan() {
        low
    } else {
        value.min(high).max(low)
    };
    log_clamp(id, value, applied);
    applied
}

fn log_clamp(id: &str, requested: f64, applied: f64) {
    if requested != applied && !(requested.is_nan() && applied.is_nan()) {
        let warning = ParameterOutOfRange {
            id: id.to_string(),
            requested,
            applied,
        };
        debug!(%warning, "clamped parameter");
    }
}

/// Rounds an integer-valued parameter after clamping.
pub(crate) fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Turns a mesh extruded along +Z into one standing along +Y.
pub(crate) fn stand_upright(mesh: &Mesh) -> Mesh {
    mesh.transformed(&DMat4::from_rotation_x(-FRAC_PI_2))
}
