//! Ring layout of the extruded side surface, including the rounded bevel
//! profile and the mitred inset directions.

use super::ExtrusionProfile;
use config::constants::EPSILON;
use glam::DVec2;
use std::f64::consts::FRAC_PI_2;

/// Mitre vectors never grow beyond `1 / MITRE_LIMIT` times the inset.
const MITRE_LIMIT: f64 = 0.25;

/// One ring of the side surface: height and inset from the contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Level {
    pub z: f64,
    pub inset: f64,
}

/// Rings from `z = 0` up to `z = depth`.
///
/// With a bevel the first and last rings are inset by the full bevel size
/// and follow a quarter-ellipse back to the contour over the bevel
/// thickness. The thickness is held to half the depth.
pub(super) fn levels(profile: &ExtrusionProfile) -> Vec<Level> {
    let depth = profile.depth;
    let steps = profile.steps.max(1);

    let bevel = profile
        .bevel
        .filter(|b| b.thickness > EPSILON && b.size >= 0.0 && b.segments > 0);

    let Some(bevel) = bevel else {
        return (0..=steps)
            .map(|s| Level {
                z: depth * s as f64 / steps as f64,
                inset: 0.0,
            })
            .collect();
    };

    let thickness = bevel.thickness.min(depth * 0.5);
    let segments = bevel.segments;
    let ring = |b: u32| {
        let phi = b as f64 / segments as f64 * FRAC_PI_2;
        (thickness * (1.0 - phi.cos()), bevel.size * (1.0 - phi.sin()))
    };

    let mut levels = Vec::with_capacity((segments * 2 + steps) as usize + 1);

    for b in 0..=segments {
        let (rise, inset) = ring(b);
        levels.push(Level { z: rise, inset });
    }

    let wall = depth - 2.0 * thickness;
    if wall > EPSILON {
        for s in 1..=steps {
            levels.push(Level {
                z: thickness + wall * s as f64 / steps as f64,
                inset: 0.0,
            });
        }
    }

    for b in (0..segments).rev() {
        let (rise, inset) = ring(b);
        levels.push(Level {
            z: depth - rise,
            inset,
        });
    }

    levels
}

/// Per-vertex inset direction for a closed ring.
///
/// Each vector points to the left of the ring's direction of travel (into
/// the material for a counter-clockwise boundary or a clockwise hole) and
/// is scaled so that moving by `d` along it keeps both adjacent edges
/// offset by `d`.
pub(super) fn mitre_directions(ring: &[DVec2]) -> Vec<DVec2> {
    let n = ring.len();
    (0..n)
        .map(|k| {
            let prev = ring[(k + n - 1) % n];
            let cur = ring[k];
            let next = ring[(k + 1) % n];

            let n_in = (cur - prev).perp().normalize_or_zero();
            let n_out = (next - cur).perp().normalize_or_zero();

            let mitre = (n_in + n_out).normalize_or_zero();
            if mitre == DVec2::ZERO {
                return n_in;
            }
            mitre / mitre.dot(n_in).max(MITRE_LIMIT)
        })
        .collect()
}
