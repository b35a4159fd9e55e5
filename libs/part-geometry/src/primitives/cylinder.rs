//! # Cylinder Primitive
//!
//! Generates mesh for cylinder, frustum and cone shapes along the Y axis.

use crate::error::GeometryError;
use crate::mesh::{Mesh, MeshBuilder};
use config::constants::MIN_SEGMENTS;
use glam::DVec3;
use std::f64::consts::TAU;

/// Creates a cylinder or cone mesh.
///
/// # Arguments
///
/// * `height` - Height along Y axis
/// * `radius_bottom` - Radius at y=0 (or y=-h/2 if centered)
/// * `radius_top` - Radius at y=h (or y=h/2 if centered)
/// * `center` - If true, center vertically at origin
/// * `segments` - Number of segments around circumference
///
/// # Returns
///
/// A closed mesh. Caps have their own vertices so they shade flat.
///
/// # Example
///
/// ```rust
/// use part_geometry::primitives::create_cylinder;
///
/// // Regular cylinder
/// let mesh = create_cylinder(10.0, 5.0, 5.0, false, 32)?;
///
/// // Cone (r2 = 0)
/// let cone = create_cylinder(10.0, 5.0, 0.0, false, 32)?;
/// assert!(cone.signed_volume() < mesh.signed_volume());
/// # Ok::<(), part_geometry::GeometryError>(())
/// ```
pub fn create_cylinder(
    height: f64,
    radius_bottom: f64,
    radius_top: f64,
    center: bool,
    segments: u32,
) -> Result<Mesh, GeometryError> {
    if !(height.is_finite() && height > 0.0) {
        return Err(GeometryError::degenerate(format!(
            "Cylinder height must be positive: {height}"
        )));
    }

    if !(radius_bottom >= 0.0 && radius_top >= 0.0) {
        return Err(GeometryError::degenerate(format!(
            "Cylinder radii must be non-negative: r1={radius_bottom}, r2={radius_top}"
        )));
    }

    if radius_bottom == 0.0 && radius_top == 0.0 {
        return Err(GeometryError::degenerate(
            "Cylinder must have at least one non-zero radius",
        ));
    }

    if segments < MIN_SEGMENTS {
        return Err(GeometryError::degenerate(format!(
            "Cylinder segments must be at least 3: {segments}"
        )));
    }

    let n = segments as usize;
    let mut builder = MeshBuilder::with_capacity(n * 4, n * 4);

    let (y_bottom, y_top) = if center {
        (-height / 2.0, height / 2.0)
    } else {
        (0.0, height)
    };

    let ring = |builder: &mut MeshBuilder, radius: f64, y: f64| -> Vec<u32> {
        (0..segments)
            .map(|j| {
                let theta = TAU * j as f64 / segments as f64;
                builder.add_vertex(DVec3::new(radius * theta.cos(), y, radius * theta.sin()))
            })
            .collect()
    };

    // Side vertices (a single apex for a pointed end)
    let bottom = if radius_bottom > 0.0 {
        ring(&mut builder, radius_bottom, y_bottom)
    } else {
        vec![builder.add_vertex(DVec3::new(0.0, y_bottom, 0.0))]
    };
    let top = if radius_top > 0.0 {
        ring(&mut builder, radius_top, y_top)
    } else {
        vec![builder.add_vertex(DVec3::new(0.0, y_top, 0.0))]
    };

    // Side faces
    for j in 0..n {
        let j_next = (j + 1) % n;
        if radius_bottom > 0.0 && radius_top > 0.0 {
            builder.add_triangle(bottom[j], top[j], top[j_next]);
            builder.add_triangle(bottom[j], top[j_next], bottom[j_next]);
        } else if radius_bottom > 0.0 {
            builder.add_triangle(bottom[j], top[0], bottom[j_next]);
        } else {
            builder.add_triangle(bottom[0], top[j], top[j_next]);
        }
    }

    // Bottom cap faces -Y
    if radius_bottom > 0.0 {
        let cap = ring(&mut builder, radius_bottom, y_bottom);
        for j in 1..n - 1 {
            builder.add_triangle(cap[0], cap[j], cap[j + 1]);
        }
    }

    // Top cap faces +Y
    if radius_top > 0.0 {
        let cap = ring(&mut builder, radius_top, y_top);
        for j in 1..n - 1 {
            builder.add_triangle(cap[0], cap[j + 1], cap[j]);
        }
    }

    Ok(builder.build())
}
