//! # Pipe
//!
//! Straight hollow tube along Y, optionally tapered from one end to the
//! other.

use super::{limit, whole, Envelope, ParameterReader, PartGenerator};
use crate::curve::SpaceCurve;
use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::ops::sweep::{sweep_annulus, AnnularSweep};
use crate::params::{ParameterMap, PartType};
use config::constants::{GeneratorConfig, PIPE_MAX_WALL_RATIO, PIPE_TUBULAR_SEGMENTS, WALL_EPSILON};
use glam::DVec3;

/// Keeps the narrow end of a tapered pipe open.
const MAX_TAPER: f64 = 0.9;

/// Clamped pipe parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub length: f64,
    pub radius: f64,
    /// Wall thickness, in `[WALL_EPSILON, 0.95 * radius]`
    pub thickness: f64,
    pub segments: u32,
    pub taper: f64,
}

impl Pipe {
    /// Radius of the bore.
    pub fn inner_radius(&self) -> f64 {
        self.radius - self.thickness
    }
}

impl PartGenerator for Pipe {
    const PART: PartType = PartType::Pipe;

    fn from_parameters(parameters: &ParameterMap) -> Result<Self, GeometryError> {
        let reader = ParameterReader::new(Self::PART, parameters);

        let length = reader.required("length")?;
        let radius = reader.required("radius")?;
        let thickness = limit(
            "thickness",
            reader.required("thickness")?,
            WALL_EPSILON,
            radius * PIPE_MAX_WALL_RATIO,
        );

        Ok(Self {
            length,
            radius,
            thickness,
            segments: whole(reader.optional("segments", 32.0)),
            taper: limit("taper", reader.optional("taper", 0.0), -MAX_TAPER, MAX_TAPER),
        })
    }

    fn build(&self, _config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
        let half = self.length / 2.0;
        let axis = SpaceCurve::new(
            vec![DVec3::new(0.0, -half, 0.0), DVec3::new(0.0, half, 0.0)],
            false,
        )?;

        sweep_annulus(
            &axis,
            &AnnularSweep {
                outer_radius: self.radius,
                inner_radius: self.inner_radius(),
                radial_segments: self.segments,
                tubular_segments: PIPE_TUBULAR_SEGMENTS,
                taper: self.taper,
            },
        )
    }

    fn envelope(&self) -> Envelope {
        Envelope {
            radius: self.radius * (1.0 + self.taper.abs()),
            height: self.length,
        }
    }
}
