//! # Extrusion Operations
//!
//! Turns a 2D [`Contour`](crate::contour::Contour) into a closed solid by
//! sweeping it along +Z:
//! - **extrude**: straight walls with optional rounded bevels at both ends
//!
//! The contour is triangulated once; both caps reuse that triangulation on
//! their own (flat-shaded) vertex copies.

mod bevel;
mod linear;


pub use linear::extrude;

use config::constants::{MAX_BEVEL_SEGMENTS, MAX_EXTRUDE_STEPS};

/// Rounded edge inserted at both ends of an extrusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bevel {
    /// Height of each bevel along the extrusion axis
    pub thickness: f64,
    /// How far the cap face is inset from the contour
    pub size: f64,
    /// Interpolated rings per bevel
    pub segments: u32,
}

/// Depth, wall subdivision and bevel settings for [`extrude`].
///
/// # Example
///
/// ```rust
/// use part_geometry::ops::extrude::{Bevel, ExtrusionProfile};
///
/// let profile = ExtrusionProfile::new(1.0).with_bevel(Bevel {
///     thickness: 0.05,
///     size: 0.02,
///     segments: 8,
/// });
/// assert_eq!(profile.steps, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionProfile {
    /// Extrusion distance along Z
    pub depth: f64,
    /// Wall subdivisions between the bevels
    pub steps: u32,
    pub bevel: Option<Bevel>,
}

impl ExtrusionProfile {
    /// Straight extrusion with a single wall step.
    pub fn new(depth: f64) -> Self {
        Self {
            depth,
            steps: 1,
            bevel: None,
        }
    }

    /// Returns a copy with `steps` wall subdivisions (1 to 256).
    pub fn with_steps(self, steps: u32) -> Self {
        Self {
            steps: steps.clamp(1, MAX_EXTRUDE_STEPS),
            ..self
        }
    }

    /// Returns a copy with a bevel at both ends.
    pub fn with_bevel(self, bevel: Bevel) -> Self {
        Self {
            bevel: Some(Bevel {
                segments: bevel.segments.clamp(1, MAX_BEVEL_SEGMENTS),
                ..bevel
            }),
            ..self
        }
    }
}

impl Default for ExtrusionProfile {
    fn default() -> Self {
        Self::new(1.0)
    }
}
