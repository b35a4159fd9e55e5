//! # Gear
//!
//! Spur gear: triangular-tooth outline with an optional round bore,
//! extruded to the gear thickness with a small rounded bevel.

use super::{limit, stand_upright, whole, Envelope, ParameterReader, PartGenerator};
use crate::contour::{gear_outline, Contour};
use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::ops::extrude::{extrude, Bevel, ExtrusionProfile};
use crate::params::{ParameterMap, PartType};
use config::constants::{
    GeneratorConfig, GEAR_BEVEL_THICKNESS_RATIO, GEAR_MAX_HOLE_RATIO, HOLE_CLEARANCE_RATIO,
    MAX_TEETH, MAX_TOOTH_DEPTH_RATIO, MAX_TOOTH_WIDTH, MIN_SEGMENTS, MIN_TOOTH_WIDTH,
};
use glam::DVec3;

/// Bevel size never exceeds this share of the smaller of tooth height and
/// wall width around the bore.
const BEVEL_SIZE_RATIO: f64 = 0.1;

/// Clamped gear parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Gear {
    pub teeth: u32,
    pub radius: f64,
    pub thickness: f64,
    /// Bore radius requested by the caller; held to the contour on build
    pub hole: f64,
    pub tooth_depth_ratio: f64,
    pub tooth_width: f64,
    pub bevel_size: f64,
}

impl PartGenerator for Gear {
    const PART: PartType = PartType::Gear;

    fn from_parameters(parameters: &ParameterMap) -> Result<Self, GeometryError> {
        let reader = ParameterReader::new(Self::PART, parameters);

        let teeth = whole(reader.required("teeth")?);
        let teeth = if teeth == 0 {
            0
        } else {
            whole(limit("teeth", teeth as f64, MIN_SEGMENTS as f64, MAX_TEETH as f64))
        };

        Ok(Self {
            teeth,
            radius: reader.required("radius")?,
            thickness: reader.required("thickness")?,
            hole: reader.required("hole")?,
            tooth_depth_ratio: limit(
                "toothDepthRatio",
                reader.optional("toothDepthRatio", 0.15),
                0.0,
                MAX_TOOTH_DEPTH_RATIO,
            ),
            tooth_width: limit(
                "toothWidth",
                reader.optional("toothWidth", 0.5),
                MIN_TOOTH_WIDTH,
                MAX_TOOTH_WIDTH,
            ),
            bevel_size: reader.optional("bevelSize", 0.02),
        })
    }

    fn build(&self, config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
        let outline = gear_outline(
            self.teeth,
            self.radius,
            self.tooth_depth_ratio,
            self.tooth_width,
            config.circle_segments,
        );
        let mut contour = Contour::from_outline(outline);
        let clearance = contour.clearance();

        let mut gap = clearance;
        if self.hole > 0.0 {
            let max_hole =
                (self.radius * GEAR_MAX_HOLE_RATIO).min(clearance * HOLE_CLEARANCE_RATIO);
            let hole = limit("hole", self.hole, 0.0, max_hole);
            if hole > 0.0 {
                contour = contour.with_circular_hole(hole, config.circle_segments);
                gap = clearance - hole;
            }
        }

        let tooth_height = if self.teeth == 0 {
            gap
        } else {
            self.radius * self.tooth_depth_ratio
        };
        let size = limit(
            "bevelSize",
            self.thickness * self.bevel_size,
            0.0,
            BEVEL_SIZE_RATIO * gap.min(tooth_height),
        );

        let profile = ExtrusionProfile::new(self.thickness).with_bevel(Bevel {
            thickness: self.thickness * GEAR_BEVEL_THICKNESS_RATIO,
            size,
            segments: config.bevel_segments,
        });

        let mesh = extrude(&contour, &profile)?;
        Ok(stand_upright(&mesh).translated(DVec3::new(0.0, -self.thickness / 2.0, 0.0)))
    }

    fn envelope(&self) -> Envelope {
        Envelope {
            radius: self.radius,
            height: self.thickness,
        }
    }
}
