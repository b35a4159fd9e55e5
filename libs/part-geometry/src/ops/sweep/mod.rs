//! # Tube Sweeps
//!
//! Sweeps a circular (or annular) cross-section along a [`SpaceCurve`].
//!
//! ## Variants
//!
//! - [`sweep_tube`]: solid circular section, open or with flat disc caps
//! - [`sweep_annulus`]: hollow section with outer and inner walls joined by
//!   annulus caps at both ends
//!
//! Cross-sections are oriented with rotation-minimizing frames, so the
//! ring seam does not twist around the curve.

mod frames;


pub use frames::{rotation_minimizing_frames, Frame};

use crate::curve::SpaceCurve;
use crate::error::GeometryError;
use crate::mesh::{Mesh, MeshBuilder};
use config::constants::{MAX_RADIAL_SEGMENTS, MAX_TUBULAR_SEGMENTS, MIN_SEGMENTS};
use glam::DVec3;
use std::f64::consts::TAU;
use tracing::trace;

/// End treatment for a solid tube.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CapMode {
    /// Leave the ends open (springs, threads)
    #[default]
    Open,
    /// Close each end with a flat disc
    Flat,
}

/// Settings for a solid tube sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TubeSweep {
    pub radius: f64,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    /// Linear radius change along the curve, in `(-1, 1)`
    pub taper: f64,
    pub caps: CapMode,
}

impl TubeSweep {
    /// Open, untapered tube.
    pub fn new(radius: f64, radial_segments: u32, tubular_segments: u32) -> Self {
        Self {
            radius,
            radial_segments,
            tubular_segments,
            taper: 0.0,
            caps: CapMode::Open,
        }
    }
}

/// Settings for a hollow tube sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnularSweep {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub radial_segments: u32,
    pub tubular_segments: u32,
    /// Linear radius change along the curve, in `(-1, 1)`
    pub taper: f64,
}

/// Cross-section centres and frames along a curve.
struct Rail {
    centers: Vec<DVec3>,
    frames: Vec<Frame>,
    /// Scale factor applied to the section radius at each ring
    scales: Vec<f64>,
    closed: bool,
}

impl Rail {
    fn new(curve: &SpaceCurve, tubular: u32, taper: f64) -> Result<Self, GeometryError> {
        if !(taper.is_finite() && taper.abs() < 1.0) {
            return Err(GeometryError::degenerate(format!(
                "taper must lie in (-1, 1): {taper}"
            )));
        }

        let closed = curve.is_closed();
        let tubular = tubular.clamp(1, MAX_TUBULAR_SEGMENTS) as usize;
        let params: Vec<f64> = (0..=tubular).map(|i| i as f64 / tubular as f64).collect();

        let centers: Vec<DVec3> = params.iter().map(|&u| curve.point_at(u)).collect();
        let tangents: Vec<DVec3> = params.iter().map(|&u| curve.tangent_at(u)).collect();
        if tangents.iter().any(|t| *t == DVec3::ZERO) {
            return Err(GeometryError::degenerate("sweep path has no direction"));
        }

        let mut frames = rotation_minimizing_frames(&centers, &tangents, closed);
        let mut centers = centers;
        let mut scales: Vec<f64> = params
            .iter()
            .map(|&u| 1.0 + taper * (u - 0.5) * 2.0)
            .collect();

        // The closing sample of a closed curve repeats the first ring
        if closed {
            centers.pop();
            frames.pop();
            scales.pop();
        }

        Ok(Self {
            centers,
            frames,
            scales,
            closed,
        })
    }

    fn ring_count(&self) -> usize {
        self.centers.len()
    }

    /// Number of bands between consecutive rings.
    fn band_count(&self) -> usize {
        if self.closed {
            self.ring_count()
        } else {
            self.ring_count() - 1
        }
    }

    /// Point on ring `i` at angle index `j`.
    fn point(&self, i: usize, j: u32, radial: u32, radius: f64) -> DVec3 {
        let theta = TAU * j as f64 / radial as f64;
        let frame = &self.frames[i];
        let r = radius * self.scales[i];
        self.centers[i] + (frame.normal * theta.cos() + frame.binormal * theta.sin()) * r
    }

    /// Adds every ring of a wall and returns the index of its first vertex.
    fn add_wall_vertices(&self, builder: &mut MeshBuilder, radial: u32, radius: f64) -> u32 {
        let start = builder.vertex_count() as u32;
        for i in 0..self.ring_count() {
            for j in 0..radial {
                builder.add_vertex(self.point(i, j, radial, radius));
            }
        }
        start
    }

    /// Stitches consecutive rings of a wall into triangle strips.
    fn add_wall_faces(&self, builder: &mut MeshBuilder, start: u32, radial: u32, inward: bool) {
        let rings = self.ring_count();
        for band in 0..self.band_count() {
            let i = band;
            let i_next = (band + 1) % rings;
            for j in 0..radial {
                let j_next = (j + 1) % radial;
                let a = start + i as u32 * radial + j;
                let b = start + i_next as u32 * radial + j;
                let c = start + i_next as u32 * radial + j_next;
                let d = start + i as u32 * radial + j_next;
                if inward {
                    builder.add_triangle(a, b, d);
                    builder.add_triangle(d, b, c);
                } else {
                    builder.add_triangle(a, d, b);
                    builder.add_triangle(d, c, b);
                }
            }
        }
    }

    /// Copies ring `i` for a cap and returns the index of its first vertex.
    fn add_ring_copy(&self, builder: &mut MeshBuilder, i: usize, radial: u32, radius: f64) -> u32 {
        let start = builder.vertex_count() as u32;
        for j in 0..radial {
            builder.add_vertex(self.point(i, j, radial, radius));
        }
        start
    }
}

fn check_radius(radius: f64, what: &str) -> Result<(), GeometryError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::degenerate(format!(
            "{what} must be positive: {radius}"
        )))
    }
}

/// Sweeps a solid circular section along a curve.
///
/// Open curves produce `tubular_segments + 1` rings; closed curves wrap
/// around with `tubular_segments` rings.
///
/// # Example
///
/// ```rust
/// use part_geometry::curve::SpaceCurve;
/// use part_geometry::ops::sweep::{sweep_tube, CapMode, TubeSweep};
/// use glam::DVec3;
///
/// let rod = SpaceCurve::new(vec![DVec3::ZERO, DVec3::Y * 2.0], false)?;
/// let tube = TubeSweep { caps: CapMode::Flat, ..TubeSweep::new(0.5, 16, 4) };
/// let mesh = sweep_tube(&rod, &tube)?;
/// assert!(mesh.signed_volume() > 0.0);
/// # Ok::<(), part_geometry::GeometryError>(())
/// ```
pub fn sweep_tube(curve: &SpaceCurve, tube: &TubeSweep) -> Result<Mesh, GeometryError> {
    check_radius(tube.radius, "tube radius")?;
    let radial = tube.radial_segments.clamp(MIN_SEGMENTS, MAX_RADIAL_SEGMENTS);
    let rail = Rail::new(curve, tube.tubular_segments, tube.taper)?;

    let rings = rail.ring_count();
    let mut builder = MeshBuilder::with_capacity(
        (rings + 2) * radial as usize + 2,
        rail.band_count() * radial as usize * 2 + radial as usize * 2,
    );

    let wall = rail.add_wall_vertices(&mut builder, radial, tube.radius);
    rail.add_wall_faces(&mut builder, wall, radial, false);

    if tube.caps == CapMode::Flat && !rail.closed {
        // Start cap faces back along the curve
        let center = builder.add_vertex(rail.centers[0]);
        let ring = rail.add_ring_copy(&mut builder, 0, radial, tube.radius);
        for j in 0..radial {
            let j_next = (j + 1) % radial;
            builder.add_triangle(center, ring + j_next, ring + j);
        }

        let last = rings - 1;
        let center = builder.add_vertex(rail.centers[last]);
        let ring = rail.add_ring_copy(&mut builder, last, radial, tube.radius);
        for j in 0..radial {
            let j_next = (j + 1) % radial;
            builder.add_triangle(center, ring + j, ring + j_next);
        }
    }

    let mesh = builder.build();
    trace!(
        rings,
        radial,
        vertices = mesh.vertex_count(),
        "swept tube"
    );
    Ok(mesh)
}

/// Sweeps a hollow section along a curve.
///
/// Open curves are closed with annulus caps running from the outer ring to
/// the inner ring at both ends.
pub fn sweep_annulus(curve: &SpaceCurve, section: &AnnularSweep) -> Result<Mesh, GeometryError> {
    check_radius(section.outer_radius, "outer radius")?;
    check_radius(section.inner_radius, "inner radius")?;
    if section.inner_radius >= section.outer_radius {
        return Err(GeometryError::degenerate(format!(
            "inner radius {} must be below outer radius {}",
            section.inner_radius, section.outer_radius
        )));
    }

    let radial = section.radial_segments.clamp(MIN_SEGMENTS, MAX_RADIAL_SEGMENTS);
    let rail = Rail::new(curve, section.tubular_segments, section.taper)?;

    let rings = rail.ring_count();
    let mut builder = MeshBuilder::with_capacity(
        (rings + 2) * radial as usize * 2,
        rail.band_count() * radial as usize * 4 + radial as usize * 4,
    );

    let outer = rail.add_wall_vertices(&mut builder, radial, section.outer_radius);
    rail.add_wall_faces(&mut builder, outer, radial, false);
    let inner = rail.add_wall_vertices(&mut builder, radial, section.inner_radius);
    rail.add_wall_faces(&mut builder, inner, radial, true);

    if !rail.closed {
        let o = rail.add_ring_copy(&mut builder, 0, radial, section.outer_radius);
        let i = rail.add_ring_copy(&mut builder, 0, radial, section.inner_radius);
        for j in 0..radial {
            let j_next = (j + 1) % radial;
            builder.add_triangle(o + j, i + j_next, o + j_next);
            builder.add_triangle(o + j, i + j, i + j_next);
        }

        let last = rings - 1;
        let o = rail.add_ring_copy(&mut builder, last, radial, section.outer_radius);
        let i = rail.add_ring_copy(&mut builder, last, radial, section.inner_radius);
        for j in 0..radial {
            let j_next = (j + 1) % radial;
            builder.add_triangle(o + j, o + j_next, i + j_next);
            builder.add_triangle(o + j, i + j_next, i + j);
        }
    }

    let mesh = builder.build();
    trace!(
        rings,
        radial,
        vertices = mesh.vertex_count(),
        "swept annulus"
    );
    Ok(mesh)
}
