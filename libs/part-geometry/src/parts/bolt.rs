//! # Bolt
//!
//! Shaft, head, optional countersink and a helical thread, merged into one
//! mesh. The pieces overlap; they are concatenated, not unioned.
//!
//! ## Layout
//!
//! ```text
//!        ┌──────┐   y = L/2 + headHeight
//!        │ head │
//!        └┐    ┌┘   y = L/2        (countersink just below)
//!         │≈≈≈≈│
//!         │≈≈≈≈│    thread helix wound on the shaft
//!         └────┘    y = -L/2
//! ```

use super::{limit, stand_upright, whole, Envelope, ParameterReader, PartGenerator};
use crate::contour::{circle_points, Contour};
use crate::curve::ThreadHelix;
use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::ops::extrude::{extrude, Bevel, ExtrusionProfile};
use crate::ops::sweep::{sweep_tube, TubeSweep};
use crate::params::{ParameterMap, PartType};
use crate::primitives::create_cylinder;
use config::constants::{
    GeneratorConfig, BOLT_HEAD_HEIGHT_RATIO, BOLT_MAX_SHAFT_RATIO, BOLT_MAX_THREAD_DEPTH_RATIO,
    MAX_THREAD_TURNS, MAX_TUBULAR_SEGMENTS, THREAD_RADIAL_SEGMENTS, WALL_EPSILON,
};
use glam::DVec3;

/// Socket radius as a share of the head radius.
const SOCKET_RATIO: f64 = 0.5;
/// Widest point of the countersink as a share of the head radius.
const COUNTERSINK_RATIO: f64 = 0.95;

/// Head shape, selected by the integer `headType` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadType {
    /// Six-sided prism
    #[default]
    Hex,
    /// Round head with a hexagonal socket
    Socket,
    /// Round head with heavily rounded edges
    Button,
}

impl HeadType {
    /// Maps `0`, `1`, `2`; anything larger is a button head.
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => HeadType::Hex,
            1 => HeadType::Socket,
            _ => HeadType::Button,
        }
    }
}

/// Clamped bolt parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Bolt {
    pub head_radius: f64,
    pub shaft_radius: f64,
    pub length: f64,
    pub head_height: f64,
    pub head_type: HeadType,
    pub thread_depth: f64,
    pub thread_pitch: f64,
    pub thread_segments: u32,
    /// Countersink height as a share of the head height
    pub countersink: f64,
}

impl Bolt {
    fn head(&self, config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
        let r = self.head_radius;
        let h = self.head_height;

        let head = match self.head_type {
            HeadType::Hex => create_cylinder(h, r, r, false, 6)?,
            HeadType::Socket => {
                let contour = Contour::new(
                    circle_points(r, config.circle_segments),
                    vec![circle_points(r * SOCKET_RATIO, 6)],
                );
                stand_upright(&extrude(&contour, &ExtrusionProfile::new(h))?)
            }
            HeadType::Button => {
                let profile = ExtrusionProfile::new(h).with_bevel(Bevel {
                    thickness: h * 0.45,
                    size: r * 0.3,
                    segments: config.bevel_segments,
                });
                stand_upright(&extrude(&Contour::circle(r, config.circle_segments), &profile)?)
            }
        };

        Ok(head.translated(DVec3::new(0.0, self.length / 2.0, 0.0)))
    }

    fn thread(&self, config: &GeneratorConfig) -> Result<Option<Mesh>, GeometryError> {
        if self.thread_depth <= config.tolerance {
            return Ok(None);
        }
        let helix = ThreadHelix {
            length: self.length,
            pitch: self.thread_pitch,
            radius: self.shaft_radius,
        };
        let tubular = (helix.turns() * self.thread_segments).min(MAX_TUBULAR_SEGMENTS);
        let tube = TubeSweep::new(self.thread_depth / 2.0, THREAD_RADIAL_SEGMENTS, tubular);
        sweep_tube(&helix.curve()?, &tube).map(Some)
    }

    fn countersink(&self, config: &GeneratorConfig) -> Result<Option<Mesh>, GeometryError> {
        let height = self.countersink * self.head_height;
        if height <= config.tolerance {
            return Ok(None);
        }
        let cone = create_cylinder(
            height,
            self.shaft_radius,
            self.head_radius * COUNTERSINK_RATIO,
            false,
            config.circle_segments,
        )?;
        Ok(Some(cone.translated(DVec3::new(0.0, self.length / 2.0 - height, 0.0))))
    }
}

impl PartGenerator for Bolt {
    const PART: PartType = PartType::Bolt;

    fn from_parameters(parameters: &ParameterMap) -> Result<Self, GeometryError> {
        let reader = ParameterReader::new(Self::PART, parameters);

        let head_radius = reader.required("headRadius")?;
        let shaft_radius = limit(
            "shaftRadius",
            reader.required("shaftRadius")?,
            WALL_EPSILON,
            head_radius * BOLT_MAX_SHAFT_RATIO,
        );
        let length = reader.required("length")?;

        let head_height = limit(
            "headHeight",
            reader.optional("headHeight", head_radius * BOLT_HEAD_HEIGHT_RATIO),
            WALL_EPSILON,
            f64::INFINITY,
        );
        let thread_depth = limit(
            "threadDepth",
            reader.optional("threadDepth", 0.08),
            0.0,
            shaft_radius * BOLT_MAX_THREAD_DEPTH_RATIO,
        );
        let thread_pitch = limit(
            "threadPitch",
            reader.optional("threadPitch", 0.2),
            (length / MAX_THREAD_TURNS as f64).max(WALL_EPSILON),
            f64::INFINITY,
        );

        Ok(Self {
            head_radius,
            shaft_radius,
            length,
            head_height,
            head_type: HeadType::from_index(whole(reader.optional("headType", 0.0))),
            thread_depth,
            thread_pitch,
            thread_segments: whole(reader.optional("threadSegments", 32.0)).max(1),
            countersink: limit("countersink", reader.optional("countersink", 0.0), 0.0, 1.0),
        })
    }

    fn build(&self, config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
        let shaft = create_cylinder(
            self.length,
            self.shaft_radius,
            self.shaft_radius,
            true,
            config.circle_segments,
        )?;
        let head = self.head(config)?;

        let mut parts = vec![shaft, head];
        parts.extend(self.countersink(config)?);
        parts.extend(self.thread(config)?);

        Ok(Mesh::merged(&parts))
    }

    fn envelope(&self) -> Envelope {
        Envelope {
            radius: self.head_radius,
            height: self.length + self.head_height,
        }
    }
}
