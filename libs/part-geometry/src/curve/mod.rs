//! # Space Curves
//!
//! Smooth 3D curves through control points, used as sweep paths.
//!
//! Interpolation is centripetal Catmull-Rom (alpha 0.5), which avoids the
//! cusps and self-intersections of the uniform variant when control points
//! are unevenly spaced. Open curves extrapolate a phantom point past each
//! end by reflection.

pub mod helix;


pub use helix::{SpringHelix, ThreadHelix};

use crate::error::GeometryError;
use config::constants::MAX_CURVE_POINTS;
use glam::DVec3;

/// Knot spacing below which a segment is treated as degenerate.
const MIN_KNOT_INTERVAL: f64 = 1e-4;

/// A Catmull-Rom curve through a list of control points.
///
/// The parameter `u` runs from 0 to 1 and maps uniformly onto segments:
/// segment `i` covers `[i / segments, (i + 1) / segments]`.
///
/// # Example
///
/// ```rust
/// use part_geometry::curve::SpaceCurve;
/// use glam::DVec3;
///
/// let curve = SpaceCurve::new(vec![DVec3::ZERO, DVec3::X, DVec3::new(2.0, 1.0, 0.0)], false)?;
/// assert_eq!(curve.segment_count(), 2);
/// assert_eq!(curve.point_at(0.5), DVec3::X);
/// # Ok::<(), part_geometry::GeometryError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceCurve {
    points: Vec<DVec3>,
    closed: bool,
}

impl SpaceCurve {
    /// Creates a curve from control points.
    ///
    /// Requires at least two finite points (three for a closed curve).
    pub fn new(points: Vec<DVec3>, closed: bool) -> Result<Self, GeometryError> {
        let min_points = if closed { 3 } else { 2 };
        if points.len() < min_points {
            return Err(GeometryError::degenerate(format!(
                "curve needs at least {min_points} control points, got {}",
                points.len()
            )));
        }
        if points.len() > MAX_CURVE_POINTS + 1 {
            return Err(GeometryError::degenerate(format!(
                "curve has {} control points (max: {})",
                points.len(),
                MAX_CURVE_POINTS + 1
            )));
        }
        if !points.iter().all(|p| p.is_finite()) {
            return Err(GeometryError::degenerate("curve control point is not finite"));
        }
        Ok(Self { points, closed })
    }

    /// Control points.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns true if the last point connects back to the first.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of interpolated segments.
    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    /// Position at `u` in `[0, 1]`.
    pub fn point_at(&self, u: f64) -> DVec3 {
        let (segment, w) = self.locate(u);
        self.segment(segment).point(w)
    }

    /// Unit tangent at `u` in `[0, 1]`.
    pub fn tangent_at(&self, u: f64) -> DVec3 {
        let (segment, w) = self.locate(u);
        let poly = self.segment(segment);
        let tangent = poly.derivative(w).normalize_or_zero();
        if tangent != DVec3::ZERO {
            return tangent;
        }
        // Coincident control points: fall back to the chord
        (poly.point(1.0) - poly.point(0.0)).normalize_or_zero()
    }

    /// `divisions + 1` points at evenly spaced parameters, ends included.
    pub fn sample(&self, divisions: usize) -> Vec<DVec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|i| self.point_at(i as f64 / divisions as f64))
            .collect()
    }

    /// Maps `u` onto a segment index and local parameter.
    fn locate(&self, u: f64) -> (usize, f64) {
        let segments = self.segment_count();
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        let p = u * segments as f64;
        let index = p.floor() as usize;
        if index >= segments {
            (segments - 1, 1.0)
        } else {
            (index, p - index as f64)
        }
    }

    fn segment(&self, i: usize) -> CubicPoly {
        let n = self.points.len();
        let pts = &self.points;

        let (p0, p1, p2, p3) = if self.closed {
            (pts[(i + n - 1) % n], pts[i % n], pts[(i + 1) % n], pts[(i + 2) % n])
        } else {
            let p0 = if i > 0 { pts[i - 1] } else { 2.0 * pts[0] - pts[1] };
            let p3 = if i + 2 < n {
                pts[i + 2]
            } else {
                2.0 * pts[n - 1] - pts[n - 2]
            };
            (p0, pts[i], pts[i + 1], p3)
        };

        CubicPoly::centripetal(p0, p1, p2, p3)
    }
}

/// Cubic `c0 + c1 w + c2 w^2 + c3 w^3` for one segment.
#[derive(Debug, Clone, Copy)]
struct CubicPoly {
    c0: DVec3,
    c1: DVec3,
    c2: DVec3,
    c3: DVec3,
}

impl CubicPoly {
    /// Hermite form with centripetal (non-uniform) tangents.
    fn centripetal(x0: DVec3, x1: DVec3, x2: DVec3, x3: DVec3) -> Self {
        let mut dt0 = x0.distance_squared(x1).powf(0.25);
        let mut dt1 = x1.distance_squared(x2).powf(0.25);
        let mut dt2 = x2.distance_squared(x3).powf(0.25);

        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        let t1 = ((x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1) * dt1;
        let t2 = ((x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2) * dt1;

        Self {
            c0: x1,
            c1: t1,
            c2: -3.0 * x1 + 3.0 * x2 - 2.0 * t1 - t2,
            c3: 2.0 * x1 - 2.0 * x2 + t1 + t2,
        }
    }

    fn point(&self, w: f64) -> DVec3 {
        self.c0 + w * (self.c1 + w * (self.c2 + w * self.c3))
    }

    fn derivative(&self, w: f64) -> DVec3 {
        self.c1 + w * (2.0 * self.c2 + 3.0 * w * self.c3)
    }
}
