//! # Rotation-Minimizing Frames
//!
//! Propagates an orthonormal frame along sampled curve points with the
//! double-reflection method (Wang, Jüttler, Zheng, Liu 2008). Unlike the
//! Frenet frame it never flips at inflection points or on straight runs.

use glam::{DQuat, DVec3};

/// Degenerate-segment threshold on squared lengths.
const MIN_SQUARED_LENGTH: f64 = 1e-30;

/// Orthonormal frame at a curve sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub tangent: DVec3,
    pub normal: DVec3,
    pub binormal: DVec3,
}

/// Computes one frame per sample.
///
/// `tangents` must be unit vectors, one per point. For a closed curve the
/// last sample must coincide with the first; the residual twist between
/// them is spread evenly over all frames so the seam closes.
pub fn rotation_minimizing_frames(
    points: &[DVec3],
    tangents: &[DVec3],
    closed: bool,
) -> Vec<Frame> {
    let n = points.len().min(tangents.len());
    let mut frames = Vec::with_capacity(n);
    if n == 0 {
        return frames;
    }

    // Initial normal: the axis least aligned with the first tangent
    let t0 = tangents[0];
    let axis = if t0.x.abs() <= t0.y.abs() && t0.x.abs() <= t0.z.abs() {
        DVec3::X
    } else if t0.y.abs() <= t0.z.abs() {
        DVec3::Y
    } else {
        DVec3::Z
    };
    let n0 = (axis - t0 * axis.dot(t0)).normalize_or_zero();
    frames.push(Frame {
        tangent: t0,
        normal: n0,
        binormal: t0.cross(n0),
    });

    // Propagate frame along path using rotation minimizing frames (double reflection)
    for i in 1..n {
        let prev = frames[i - 1];
        let ti = tangents[i];

        let v1 = points[i] - points[i - 1];
        let c1 = v1.dot(v1);
        if c1 < MIN_SQUARED_LENGTH {
            // Degenerate segment, reuse previous frame
            frames.push(reorthonormalized(ti, prev.normal, prev.normal));
            continue;
        }

        // Reflect previous normal and tangent
        let r_l = prev.normal - v1 * (2.0 * v1.dot(prev.normal) / c1);
        let t_l = prev.tangent - v1 * (2.0 * v1.dot(prev.tangent) / c1);

        // Second reflection to align with new tangent
        let v2 = ti - t_l;
        let c2 = v2.dot(v2);
        let ri = if c2 < MIN_SQUARED_LENGTH {
            r_l
        } else {
            r_l - v2 * (2.0 * v2.dot(r_l) / c2)
        };

        frames.push(reorthonormalized(ti, ri, prev.normal));
    }

    if closed && n > 1 {
        distribute_twist(&mut frames);
    }

    frames
}

/// Builds a frame from a tangent and an approximate normal.
fn reorthonormalized(tangent: DVec3, normal: DVec3, fallback: DVec3) -> Frame {
    let mut normal = (normal - tangent * tangent.dot(normal)).normalize_or_zero();
    if normal == DVec3::ZERO {
        normal = (fallback - tangent * tangent.dot(fallback)).normalize_or_zero();
    }
    Frame {
        tangent,
        normal,
        binormal: tangent.cross(normal),
    }
}

/// Rotates frame `i` by `i / (n - 1)` of the angle between the first and
/// the last normal.
fn distribute_twist(frames: &mut [Frame]) {
    let last = frames.len() - 1;
    let first = frames[0];
    let end = frames[last];

    let mut theta = first.normal.dot(end.normal).clamp(-1.0, 1.0).acos() / last as f64;
    if first.tangent.dot(first.normal.cross(end.normal)) > 0.0 {
        theta = -theta;
    }

    for (i, frame) in frames.iter_mut().enumerate().skip(1) {
        let rotation = DQuat::from_axis_angle(frame.tangent, theta * i as f64);
        let normal = rotation * frame.normal;
        *frame = reorthonormalized(frame.tangent, normal, frame.normal);
    }
}
