//! # Spring
//!
//! Coil spring: a round wire swept along a helix, open at both ends.

use super::{limit, whole, Envelope, ParameterReader, PartGenerator};
use crate::curve::SpringHelix;
use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::ops::sweep::{sweep_tube, TubeSweep};
use crate::params::{ParameterMap, PartType};
use config::constants::{
    GeneratorConfig, SPRING_MAX_RADIAL_SEGMENTS, SPRING_MAX_THICKNESS_RATIO,
    SPRING_MAX_TUBULAR_SEGMENTS, SPRING_MIN_TUBULAR_SEGMENTS, SPRING_RADIAL_DENSITY,
    SPRING_TAPER_RANGE, SPRING_TENSION_RANGE, WALL_EPSILON,
};

/// Clamped spring parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Spring {
    pub helix: SpringHelix,
    /// Wire diameter
    pub thickness: f64,
    pub radial_segments: u32,
}

impl Spring {
    /// Tubular segments of the wire sweep.
    pub fn tubular_segments(&self) -> u32 {
        self.helix
            .segment_count()
            .clamp(SPRING_MIN_TUBULAR_SEGMENTS, SPRING_MAX_TUBULAR_SEGMENTS)
    }

    /// Radial segments of the wire, raised for thick wire.
    pub fn wire_segments(&self) -> u32 {
        let by_thickness = (self.thickness * SPRING_RADIAL_DENSITY).ceil() as u32;
        self.radial_segments
            .max(by_thickness)
            .min(SPRING_MAX_RADIAL_SEGMENTS)
    }
}

impl PartGenerator for Spring {
    const PART: PartType = PartType::Spring;

    fn from_parameters(parameters: &ParameterMap) -> Result<Self, GeometryError> {
        let reader = ParameterReader::new(Self::PART, parameters);

        let radius = reader.required("radius")?;
        let thickness = limit(
            "thickness",
            reader.required("thickness")?,
            WALL_EPSILON,
            radius * SPRING_MAX_THICKNESS_RATIO,
        );
        let coils = reader.required("coils")?;
        let height = reader.required("height")?;

        let (low, high) = SPRING_TENSION_RANGE;
        let tension = limit("tension", reader.optional("tension", 0.0), low, high);
        let (low, high) = SPRING_TAPER_RANGE;
        let taper = limit("taper", reader.optional("taper", 0.0), low, high);

        Ok(Self {
            helix: SpringHelix {
                coils,
                height,
                radius,
                tension,
                taper,
                wave_amplitude: reader.optional("waveAmplitude", 0.0),
                resolution: reader.optional("resolution", 256.0),
            },
            thickness,
            radial_segments: whole(reader.optional("radialSegments", 16.0)),
        })
    }

    fn build(&self, _config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
        let curve = self.helix.curve()?;
        sweep_tube(
            &curve,
            &TubeSweep::new(self.thickness / 2.0, self.wire_segments(), self.tubular_segments()),
        )
    }

    fn envelope(&self) -> Envelope {
        Envelope {
            radius: self.helix.radius * (1.0 + self.helix.taper.abs()) + self.thickness,
            height: self.helix.height,
        }
    }
}
