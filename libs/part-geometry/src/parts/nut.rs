//! # Nut
//!
//! Regular-polygon nut with a threaded bore and optional surface texture.
//! The chamfer is the extrusion bevel; the thread and texture are vertex
//! perturbations applied after extrusion.

use super::{limit, stand_upright, whole, Envelope, ParameterReader, PartGenerator};
use crate::contour::Contour;
use crate::error::GeometryError;
use crate::mesh::Mesh;
use crate::ops::extrude::{extrude, Bevel, ExtrusionProfile};
use crate::ops::perturb::{perturb_texture, perturb_thread, TexturePerturbation, ThreadPerturbation};
use crate::params::{ParameterMap, PartType};
use config::constants::{
    GeneratorConfig, MAX_EXTRUDE_STEPS, NUT_MAX_HOLE_RATIO, NUT_MAX_THREAD_DEPTH_RATIO,
    NUT_MIN_HOLE_RATIO, NUT_SIDES, NUT_STEPS_PER_PITCH, NUT_TEXTURE_EDGE_SPLITS,
    NUT_WALL_CLEARANCE_RATIO, THREAD_BAND, WALL_EPSILON,
};
use glam::DVec3;
use std::f64::consts::PI;
use tracing::debug;

/// Chamfer size never exceeds this share of the wall between bore and flats.
const CHAMFER_RATIO: f64 = 0.25;

/// Clamped nut parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Nut {
    pub radius: f64,
    pub height: f64,
    pub hole_radius: f64,
    pub chamfer: f64,
    /// One of 4, 6 or 8
    pub sides: u32,
    pub texture: f64,
    pub thread_pitch: f64,
    pub thread_depth: f64,
}

impl Nut {
    /// Distance from the axis to the middle of a flat.
    pub fn apothem(&self) -> f64 {
        self.radius * (PI / self.sides as f64).cos()
    }

    /// Wall subdivisions, enough to resolve the thread.
    pub fn wall_steps(&self) -> u32 {
        let steps = (self.height / self.thread_pitch * NUT_STEPS_PER_PITCH).ceil();
        if steps.is_finite() && steps >= 1.0 {
            (steps as u32).min(MAX_EXTRUDE_STEPS)
        } else {
            1
        }
    }
}

/// Nearest allowed side count; ties go to the smaller count.
fn snap_sides(requested: u32) -> u32 {
    NUT_SIDES
        .iter()
        .copied()
        .min_by_key(|&s| s.abs_diff(requested))
        .unwrap_or(6)
}

impl PartGenerator for Nut {
    const PART: PartType = PartType::Nut;

    fn from_parameters(parameters: &ParameterMap) -> Result<Self, GeometryError> {
        let reader = ParameterReader::new(Self::PART, parameters);

        let radius = reader.required("radius")?;
        let height = reader.required("height")?;

        let requested_sides = whole(reader.optional("sides", 6.0));
        let sides = snap_sides(requested_sides);
        if sides != requested_sides {
            debug!(requested = requested_sides, applied = sides, "snapped nut sides");
        }

        let apothem = radius * (PI / sides as f64).cos();
        let hole_radius = limit(
            "holeRadius",
            reader.required("holeRadius")?,
            radius * NUT_MIN_HOLE_RATIO,
            (radius * NUT_MAX_HOLE_RATIO).min(apothem * NUT_WALL_CLEARANCE_RATIO),
        );

        let chamfer = limit(
            "chamferSize",
            reader.optional("chamferSize", 0.1),
            0.0,
            (apothem - hole_radius) * CHAMFER_RATIO,
        );

        Ok(Self {
            radius,
            height,
            hole_radius,
            chamfer,
            sides,
            texture: limit("texture", reader.optional("texture", 0.0), 0.0, 1.0),
            thread_pitch: limit(
                "threadPitch",
                reader.optional("threadPitch", 0.2),
                WALL_EPSILON,
                f64::INFINITY,
            ),
            thread_depth: limit(
                "threadDepth",
                reader.optional("threadDepth", 0.05),
                0.0,
                hole_radius * NUT_MAX_THREAD_DEPTH_RATIO,
            ),
        })
    }

    fn build(&self, config: &GeneratorConfig) -> Result<Mesh, GeometryError> {
        let mut outline = Contour::regular_polygon(self.sides, self.radius);
        if self.texture > 0.0 {
            outline = outline.subdivided(NUT_TEXTURE_EDGE_SPLITS);
        }
        let contour = outline.with_circular_hole(self.hole_radius, config.circle_segments);

        let mut profile = ExtrusionProfile::new(self.height).with_steps(self.wall_steps());
        if self.chamfer > config.tolerance {
            profile = profile.with_bevel(Bevel {
                thickness: self.chamfer,
                size: self.chamfer,
                segments: config.bevel_segments,
            });
        }

        let extruded = extrude(&contour, &profile)?;
        let mut mesh =
            stand_upright(&extruded).translated(DVec3::new(0.0, -self.height / 2.0, 0.0));

        if self.thread_depth > config.tolerance {
            mesh = perturb_thread(
                &mesh,
                &ThreadPerturbation {
                    hole_radius: self.hole_radius,
                    pitch: self.thread_pitch,
                    depth: self.thread_depth,
                },
            )?;
        }

        if self.texture > 0.0 {
            let threshold = (self.hole_radius * THREAD_BAND.1 + self.apothem()) / 2.0;
            mesh = perturb_texture(
                &mesh,
                &TexturePerturbation {
                    amount: self.texture,
                    radius: self.radius,
                    threshold,
                    seed: config.texture_seed,
                },
            )?;
        }

        Ok(mesh)
    }

    fn envelope(&self) -> Envelope {
        Envelope {
            radius: self.radius,
            height: self.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_sides() {
        assert_eq!(snap_sides(3), 4);
        assert_eq!(snap_sides(5), 4);
        assert_eq!(snap_sides(6), 6);
        assert_eq!(snap_sides(7), 6);
        assert_eq!(snap_sides(12), 8);
    }
}
