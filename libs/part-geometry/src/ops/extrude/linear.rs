//! # Linear Extrusion
//!
//! Extrudes a contour along the Z axis from `z = 0` to `z = depth`.
//!
//! ## Vertex Layout
//!
//! Every side ring holds the outer boundary followed by each hole, in the
//! same order the triangulator indexes them. Caps get their own copies of
//! the first and last ring so their normals stay flat.

use super::bevel::{levels, mitre_directions};
use super::ExtrusionProfile;
use crate::contour::Contour;
use crate::error::GeometryError;
use crate::mesh::{Mesh, MeshBuilder};
use crate::ops::triangulate;
use glam::{DVec2, DVec3};
use tracing::trace;

/// Extrudes a contour into a closed solid.
///
/// # Arguments
///
/// * `contour` - Outer boundary and holes in the XY plane
/// * `profile` - Depth, wall steps and optional bevel
///
/// # Returns
///
/// A mesh with outward-facing triangles.
///
/// # Example
///
/// ```rust
/// use part_geometry::contour::Contour;
/// use part_geometry::ops::extrude::{extrude, ExtrusionProfile};
///
/// let washer = Contour::circle(2.0, 32).with_circular_hole(1.0, 32);
/// let mesh = extrude(&washer, &ExtrusionProfile::new(0.5))?;
/// assert!(mesh.signed_volume() > 0.0);
/// # Ok::<(), part_geometry::GeometryError>(())
/// ```
pub fn extrude(contour: &Contour, profile: &ExtrusionProfile) -> Result<Mesh, GeometryError> {
    if !(profile.depth.is_finite() && profile.depth > 0.0) {
        return Err(GeometryError::degenerate(format!(
            "extrusion depth must be positive: {}",
            profile.depth
        )));
    }

    let loops: Vec<&[DVec2]> = std::iter::once(contour.outer())
        .chain(contour.holes().iter().map(Vec::as_slice))
        .collect();

    // Validates point counts and gives the cap pattern
    let cap = triangulate(contour.outer(), contour.holes())?;

    let mitres: Vec<DVec2> = loops.iter().flat_map(|l| mitre_directions(l)).collect();
    let base: Vec<DVec2> = loops.iter().flat_map(|l| l.iter().copied()).collect();
    let ring_len = base.len();
    let levels = levels(profile);

    let mut builder = MeshBuilder::with_capacity(
        ring_len * (levels.len() + 2),
        ring_len * 2 * (levels.len() - 1) + cap.len() * 2,
    );

    let ring_at = |z: f64, inset: f64| {
        base.iter()
            .zip(&mitres)
            .map(move |(p, m)| {
                let q = *p + *m * inset;
                DVec3::new(q.x, q.y, z)
            })
    };

    // Side rings
    for level in &levels {
        for v in ring_at(level.z, level.inset) {
            builder.add_vertex(v);
        }
    }

    // Side faces (quads split into triangles)
    for band in 0..levels.len() - 1 {
        let lower = (band * ring_len) as u32;
        let upper = ((band + 1) * ring_len) as u32;

        let mut start = 0u32;
        for l in &loops {
            let len = l.len() as u32;
            for k in 0..len {
                let k_next = (k + 1) % len;
                let a = lower + start + k;
                let b = lower + start + k_next;
                let c = upper + start + k_next;
                let d = upper + start + k;
                builder.add_quad(a, b, c, d);
            }
            start += len;
        }
    }

    // Bottom cap faces -Z
    let first = levels[0];
    let bottom = builder.vertex_count() as u32;
    for v in ring_at(first.z, first.inset) {
        builder.add_vertex(v);
    }
    for tri in &cap {
        builder.add_triangle(bottom + tri[0], bottom + tri[2], bottom + tri[1]);
    }

    // Top cap faces +Z
    let last = levels[levels.len() - 1];
    let top = builder.vertex_count() as u32;
    for v in ring_at(last.z, last.inset) {
        builder.add_vertex(v);
    }
    for tri in &cap {
        builder.add_triangle(top + tri[0], top + tri[1], top + tri[2]);
    }

    let mesh = builder.build();
    trace!(
        rings = levels.len(),
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        "extruded contour"
    );
    Ok(mesh)
}
