//! # Surface Perturbation
//!
//! Bounded per-vertex displacement applied after extrusion.
//!
//! Both perturbations work on a Y-up mesh and move vertices radially with
//! respect to the Y axis. Normals are recomputed once all offsets are in
//! place. The input mesh is never modified.
//!
//! ## Determinism
//!
//! Texture noise is a fixed splitmix64 hash of `(seed, key)` where `key` is
//! the index of the first vertex at the same quantized position, so the same
//! seed gives the same surface on every platform and toolchain. Vertices duplicated along
//! cap and wall seams therefore move together and the surface stays closed.

use crate::error::GeometryError;
use crate::mesh::Mesh;
use config::constants::{COORDINATE_SCALE, THREAD_BAND};
use glam::DVec3;
use std::collections::HashMap;
use std::f64::consts::TAU;
use tracing::trace;

/// Helical thread cut into a bore.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadPerturbation {
    pub hole_radius: f64,
    pub pitch: f64,
    pub depth: f64,
}

/// Radial jitter on an outer wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturePerturbation {
    /// Strength in `[0, 1]`
    pub amount: f64,
    /// Part radius; the jitter never exceeds `amount * 0.02 * radius`
    pub radius: f64,
    /// Only vertices farther than this from the axis are moved
    pub threshold: f64,
    pub seed: u64,
}

/// Offsets bore vertices by `sin(2π·y / pitch) · depth` toward the axis.
///
/// Only vertices whose distance from the Y axis lies within
/// `[0.9, 1.1] · hole_radius` are moved.
pub fn perturb_thread(mesh: &Mesh, thread: &ThreadPerturbation) -> Result<Mesh, GeometryError> {
    if !(thread.pitch.is_finite() && thread.pitch > 0.0) {
        return Err(GeometryError::degenerate(format!(
            "thread pitch must be positive: {}",
            thread.pitch
        )));
    }

    let low = thread.hole_radius * THREAD_BAND.0;
    let high = thread.hole_radius * THREAD_BAND.1;
    let mut moved = 0usize;

    let positions: Vec<DVec3> = mesh
        .vertices()
        .iter()
        .map(|&v| {
            let r = radial_distance(v);
            if r < low || r > high || r == 0.0 {
                return v;
            }
            moved += 1;
            let offset = (TAU * v.y / thread.pitch).sin() * thread.depth;
            with_radius(v, r - offset)
        })
        .collect();

    trace!(moved, "threaded bore");
    mesh.with_positions(positions)
}

/// Jitters vertices beyond `threshold` radially by
/// `(noise · 2 − 1) · amount · 0.02 · radius`.
pub fn perturb_texture(mesh: &Mesh, texture: &TexturePerturbation) -> Result<Mesh, GeometryError> {
    let amplitude = texture.amount.clamp(0.0, 1.0) * 0.02 * texture.radius;
    if !(amplitude.is_finite() && amplitude > 0.0) {
        return Ok(mesh.clone());
    }

    let keys = position_keys(mesh.vertices());
    let mut moved = 0usize;

    let positions: Vec<DVec3> = mesh
        .vertices()
        .iter()
        .zip(&keys)
        .map(|(&v, &key)| {
            let r = radial_distance(v);
            if r <= texture.threshold || r == 0.0 {
                return v;
            }
            moved += 1;
            let jitter = (noise(texture.seed, key) * 2.0 - 1.0) * amplitude;
            with_radius(v, r + jitter)
        })
        .collect();

    trace!(moved, amplitude, "textured wall");
    mesh.with_positions(positions)
}

/// Seeded noise in `[0, 1)`.
pub fn noise(seed: u64, key: usize) -> f64 {
    let hash = splitmix64(seed ^ splitmix64(key as u64));
    // Top 53 bits map exactly onto the f64 mantissa
    (hash >> 11) as f64 / (1u64 << 53) as f64
}

/// One step of the splitmix64 generator, used as a 64-bit mixer.
fn splitmix64(state: u64) -> u64 {
    let mut z = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Index of the first vertex at each vertex's quantized position.
fn position_keys(vertices: &[DVec3]) -> Vec<usize> {
    let mut first: HashMap<[i64; 3], usize> = HashMap::with_capacity(vertices.len());
    vertices
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let cell = [
                (v.x * COORDINATE_SCALE).round() as i64,
                (v.y * COORDINATE_SCALE).round() as i64,
                (v.z * COORDINATE_SCALE).round() as i64,
            ];
            *first.entry(cell).or_insert(index)
        })
        .collect()
}

fn radial_distance(v: DVec3) -> f64 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Moves `v` along its radial direction so it sits at distance `r`.
fn with_radius(v: DVec3, r: f64) -> DVec3 {
    let current = radial_distance(v);
    let scale = r / current;
    DVec3::new(v.x * scale, v.y, v.z * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuilder;
    use approx::assert_relative_eq;

    /// Open cylinder wall of radius `r` along Y, `rings` rings.
    fn wall(r: f64, rings: u32, height: f64) -> Mesh {
        let mut builder = MeshBuilder::new();
        let radial = 16u32;
        for i in 0..rings {
            let y = -height / 2.0 + height * i as f64 / (rings - 1) as f64;
            for j in 0..radial {
                let a = TAU * j as f64 / radial as f64;
                builder.add_vertex(DVec3::new(r * a.cos(), y, r * a.sin()));
            }
        }
        for i in 0..rings - 1 {
            for j in 0..radial {
                let j_next = (j + 1) % radial;
                builder.add_quad(
                    i * radial + j,
                    i * radial + j_next,
                    (i + 1) * radial + j_next,
                    (i + 1) * radial + j,
                );
            }
        }
        builder.build()
    }

    #[test]
    fn test_thread_offsets_follow_pitch() {
        let bore = wall(0.4, 41, 1.0);
        let thread = ThreadPerturbation {
            hole_radius: 0.4,
            pitch: 0.2,
            depth: 0.01,
        };
        let threaded = perturb_thread(&bore, &thread).unwrap();
        for (before, after) in bore.vertices().iter().zip(threaded.vertices()) {
            let expected = 0.4 - (TAU * before.y / 0.2).sin() * 0.01;
            assert_relative_eq!(radial_distance(*after), expected, epsilon = 1e-12);
            assert_eq!(before.y, after.y);
        }
    }

    #[test]
    fn test_thread_ignores_vertices_outside_band() {
        let outer = wall(1.0, 5, 1.0);
        let thread = ThreadPerturbation {
            hole_radius: 0.4,
            pitch: 0.2,
            depth: 0.02,
        };
        let result = perturb_thread(&outer, &thread).unwrap();
        assert_eq!(result.vertices(), outer.vertices());
    }

    #[test]
    fn test_thread_rejects_zero_pitch() {
        let bore = wall(0.4, 3, 1.0);
        let thread = ThreadPerturbation {
            hole_radius: 0.4,
            pitch: 0.0,
            depth: 0.01,
        };
        assert!(perturb_thread(&bore, &thread).is_err());
    }

    #[test]
    fn test_texture_is_bounded_and_deterministic() {
        let outer = wall(1.0, 9, 1.0);
        let texture = TexturePerturbation {
            amount: 1.0,
            radius: 1.0,
            threshold: 0.5,
            seed: 7,
        };
        let a = perturb_texture(&outer, &texture).unwrap();
        let b = perturb_texture(&outer, &texture).unwrap();
        assert_eq!(a, b);

        let mut changed = 0;
        for v in a.vertices() {
            let r = radial_distance(*v);
            assert!((r - 1.0).abs() <= 0.02 + 1e-12);
            if (r - 1.0).abs() > 1e-12 {
                changed += 1;
            }
        }
        assert!(changed > 0);
    }

    #[test]
    fn test_texture_seed_changes_result() {
        let outer = wall(1.0, 5, 1.0);
        let texture = TexturePerturbation {
            amount: 0.5,
            radius: 1.0,
            threshold: 0.5,
            seed: 1,
        };
        let a = perturb_texture(&outer, &texture).unwrap();
        let b = perturb_texture(&outer, &TexturePerturbation { seed: 2, ..texture }).unwrap();
        assert_ne!(a.vertices(), b.vertices());
    }

    #[test]
    fn test_texture_zero_amount_is_identity() {
        let outer = wall(1.0, 3, 1.0);
        let texture = TexturePerturbation {
            amount: 0.0,
            radius: 1.0,
            threshold: 0.0,
            seed: 1,
        };
        assert_eq!(perturb_texture(&outer, &texture).unwrap(), outer);
    }

    #[test]
    fn test_coincident_vertices_share_offset() {
        let mut builder = MeshBuilder::new();
        let p = DVec3::new(1.0, 0.0, 0.0);
        let a = builder.add_vertex(p);
        let b = builder.add_vertex(DVec3::new(1.0, 1.0, 0.0));
        let c = builder.add_vertex(DVec3::new(0.0, 0.0, 1.0));
        let d = builder.add_vertex(p);
        builder.add_triangle(a, b, c);
        builder.add_triangle(d, c, b);
        let mesh = builder.build();

        let texture = TexturePerturbation {
            amount: 1.0,
            radius: 1.0,
            threshold: 0.5,
            seed: 99,
        };
        let result = perturb_texture(&mesh, &texture).unwrap();
        assert_eq!(result.vertex(a), result.vertex(d));
    }

    #[test]
    fn test_noise_range() {
        for key in 0..1000 {
            let n = noise(42, key);
            assert!((0.0..1.0).contains(&n));
        }
        assert_eq!(noise(42, 3), noise(42, 3));
    }

    #[test]
    fn test_noise_is_pinned_across_builds() {
        assert_eq!(splitmix64(0), 0xE220_A839_7B1D_CDAF);
        assert_eq!(noise(1, 0), 306_350_170_640_982.0 / (1u64 << 53) as f64);
    }
}
