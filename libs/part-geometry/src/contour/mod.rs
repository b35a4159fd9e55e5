//! # Contours
//!
//! Closed 2D cross-sections in the XY plane: an outer boundary plus
//! optional holes. Orientation is normalized on construction (outer
//! counter-clockwise, holes clockwise) so extrusion never has to guess.
//!
//! ## Builders
//!
//! - [`Contour::circle`] / [`Contour::regular_polygon`]
//! - [`gear_outline`]: alternating root and tip points
//! - [`Contour::with_circular_hole`]: appends a round bore

#[cfg(test)]
mod tests;

use config::constants::{
    MAX_TEETH, MAX_TOOTH_DEPTH_RATIO, MAX_TOOTH_WIDTH, MIN_SEGMENTS, MIN_TOOTH_WIDTH,
};
use glam::DVec2;
use std::f64::consts::TAU;

/// A closed 2D shape with optional holes.
///
/// # Example
///
/// ```rust
/// use part_geometry::contour::Contour;
///
/// let ring = Contour::circle(2.0, 64).with_circular_hole(1.0, 64);
/// assert_eq!(ring.holes().len(), 1);
/// assert!(ring.area() > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    outer: Vec<DVec2>,
    holes: Vec<Vec<DVec2>>,
}

impl Contour {
    /// Creates a contour, normalizing orientation.
    pub fn new(outer: Vec<DVec2>, holes: Vec<Vec<DVec2>>) -> Self {
        let outer = oriented(outer, true);
        let holes = holes.into_iter().map(|h| oriented(h, false)).collect();
        Self { outer, holes }
    }

    /// Creates a contour without holes.
    pub fn from_outline(outer: Vec<DVec2>) -> Self {
        Self::new(outer, Vec::new())
    }

    /// Approximates a circle with `segments` points starting at angle 0.
    pub fn circle(radius: f64, segments: u32) -> Self {
        Self::from_outline(circle_points(radius, segments))
    }

    /// Regular polygon circumscribed at `radius`, first corner at angle 0.
    pub fn regular_polygon(sides: u32, radius: f64) -> Self {
        Self::from_outline(circle_points(radius, sides))
    }

    /// Returns a copy with a circular hole of the given radius appended.
    pub fn with_circular_hole(mut self, radius: f64, segments: u32) -> Self {
        self.holes.push(oriented(circle_points(radius, segments), false));
        self
    }

    /// Outer boundary, counter-clockwise.
    pub fn outer(&self) -> &[DVec2] {
        &self.outer
    }

    /// Holes, each clockwise.
    pub fn holes(&self) -> &[Vec<DVec2>] {
        &self.holes
    }

    /// Total number of points across the boundary and holes.
    pub fn vertex_count(&self) -> usize {
        self.outer.len() + self.holes.iter().map(Vec::len).sum::<usize>()
    }

    /// Enclosed area (outer area minus hole areas).
    pub fn area(&self) -> f64 {
        signed_area(&self.outer).abs()
            - self
                .holes
                .iter()
                .map(|h| signed_area(h).abs())
                .sum::<f64>()
    }

    /// Minimum distance from the origin to the outer boundary.
    ///
    /// For a regular polygon this is the apothem.
    pub fn clearance(&self) -> f64 {
        let n = self.outer.len();
        (0..n)
            .map(|i| distance_to_segment(DVec2::ZERO, self.outer[i], self.outer[(i + 1) % n]))
            .fold(f64::INFINITY, f64::min)
    }

    /// Largest distance from the origin to any outer boundary point.
    pub fn max_radius(&self) -> f64 {
        self.outer.iter().map(|p| p.length()).fold(0.0, f64::max)
    }

    /// Returns a copy with every outer edge split into `pieces` edges.
    ///
    /// Holes are left unchanged.
    pub fn subdivided(&self, pieces: usize) -> Self {
        if pieces <= 1 {
            return self.clone();
        }
        let n = self.outer.len();
        let mut outer = Vec::with_capacity(n * pieces);
        for i in 0..n {
            let a = self.outer[i];
            let b = self.outer[(i + 1) % n];
            for k in 0..pieces {
                outer.push(a.lerp(b, k as f64 / pieces as f64));
            }
        }
        Self {
            outer,
            holes: self.holes.clone(),
        }
    }
}

// =============================================================================
// GEAR OUTLINE
// =============================================================================

/// Builds a gear outline of `teeth` triangular teeth.
///
/// Each tooth contributes a root point at `i * step` (radius
/// `radius * (1 - depth_ratio)`) and a tip at `i * step + step * width`
/// (radius `radius`). The next tooth's root closes the tooth, so the
/// outline has `2 * teeth` points.
///
/// `teeth == 0` gives a plain circle of `circle_segments` points. Positive
/// counts below 3 are raised to 3, `width` is held in `[0.1, 0.9]` and
/// `depth_ratio` in `[0, 0.5]`.
///
/// # Example
///
/// ```rust
/// use part_geometry::contour::gear_outline;
///
/// let outline = gear_outline(8, 5.0, 0.15, 0.5, 64);
/// assert_eq!(outline.len(), 16);
/// ```
pub fn gear_outline(
    teeth: u32,
    radius: f64,
    depth_ratio: f64,
    width: f64,
    circle_segments: u32,
) -> Vec<DVec2> {
    if teeth == 0 {
        return circle_points(radius, circle_segments.max(MIN_SEGMENTS));
    }

    let teeth = teeth.clamp(MIN_SEGMENTS, MAX_TEETH);
    let width = width.clamp(MIN_TOOTH_WIDTH, MAX_TOOTH_WIDTH);
    let base_radius = radius * (1.0 - depth_ratio.clamp(0.0, MAX_TOOTH_DEPTH_RATIO));
    let step = TAU / teeth as f64;

    let mut points = Vec::with_capacity(teeth as usize * 2);
    for i in 0..teeth {
        let angle = i as f64 * step;
        let tip = angle + step * width;
        points.push(DVec2::from_angle(angle) * base_radius);
        points.push(DVec2::from_angle(tip) * radius);
    }
    points
}

// =============================================================================
// HELPERS
// =============================================================================

/// `segments` evenly spaced points on a circle, counter-clockwise.
pub fn circle_points(radius: f64, segments: u32) -> Vec<DVec2> {
    (0..segments)
        .map(|i| DVec2::from_angle(TAU * i as f64 / segments as f64) * radius)
        .collect()
}

/// Shoelace signed area; positive for counter-clockwise rings.
pub fn signed_area(points: &[DVec2]) -> f64 {
    let n = points.len();
    (0..n)
        .map(|i| points[i].perp_dot(points[(i + 1) % n]))
        .sum::<f64>()
        * 0.5
}

fn oriented(mut points: Vec<DVec2>, ccw: bool) -> Vec<DVec2> {
    if (signed_area(&points) > 0.0) != ccw {
        points.reverse();
    }
    points
}

fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
