//! # Helices
//!
//! Control-point generators for the spring coil and the bolt thread.
//! Both run along the Y axis, centred on the origin.

use super::SpaceCurve;
use crate::error::GeometryError;
use config::constants::{
    spring_point_count, MAX_THREAD_TURNS, SPRING_TAPER_RANGE, SPRING_TENSION_RANGE,
    THREAD_SAMPLES_PER_TURN,
};
use glam::DVec3;
use std::f64::consts::TAU;

// =============================================================================
// SPRING
// =============================================================================

/// Coil spring centreline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringHelix {
    pub coils: f64,
    pub height: f64,
    pub radius: f64,
    /// Compresses or stretches the coil, held in `[-0.5, 0.5]`.
    pub tension: f64,
    /// Linear radius change from bottom to top, held in `[-0.4, 0.4]`.
    pub taper: f64,
    pub wave_amplitude: f64,
    /// Points per coil before quantization.
    pub resolution: f64,
}

impl SpringHelix {
    /// Number of curve segments, a multiple of 8 and at least 512.
    pub fn segment_count(&self) -> u32 {
        spring_point_count(self.coils, self.resolution)
    }

    /// Control points, `segment_count() + 1` of them.
    ///
    /// # Example
    ///
    /// ```rust
    /// use part_geometry::curve::SpringHelix;
    ///
    /// let spring = SpringHelix {
    ///     coils: 5.0, height: 5.0, radius: 1.0,
    ///     tension: 0.0, taper: 0.0, wave_amplitude: 0.0, resolution: 256.0,
    /// };
    /// assert_eq!(spring.control_points().len(), 1281);
    /// ```
    pub fn control_points(&self) -> Vec<DVec3> {
        let total = self.segment_count();
        let tension = self.tension.clamp(SPRING_TENSION_RANGE.0, SPRING_TENSION_RANGE.1);
        let taper = self.taper.clamp(SPRING_TAPER_RANGE.0, SPRING_TAPER_RANGE.1);
        let tension_factor = 1.0 + tension * 0.5;

        (0..=total)
            .map(|i| {
                let t = i as f64 / total as f64;
                let angle = t * TAU * self.coils;

                let radius = self.radius * (1.0 + taper * (t - 0.5) * 2.0);
                let wave = self.wave_amplitude * (angle * 4.0).sin() * radius * 0.2;

                let x = radius * angle.cos() + wave * (angle * 0.5).cos();
                let y = (t * self.height - self.height / 2.0) / tension_factor
                    + (angle * 2.0).sin() * tension * self.height * 0.02;
                let z = radius * angle.sin() + wave * (angle * 0.5).sin();

                DVec3::new(x, y, z)
            })
            .collect()
    }

    /// Open Catmull-Rom curve through the control points.
    pub fn curve(&self) -> Result<SpaceCurve, GeometryError> {
        SpaceCurve::new(self.control_points(), false)
    }
}

// =============================================================================
// THREAD
// =============================================================================

/// Thread helix wound around a bolt shaft, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreadHelix {
    pub length: f64,
    pub pitch: f64,
    pub radius: f64,
}

impl ThreadHelix {
    /// Whole turns over the shaft, at least 1 and at most 200.
    pub fn turns(&self) -> u32 {
        let turns = (self.length / self.pitch).floor();
        if turns.is_finite() && turns >= 1.0 {
            (turns as u32).min(MAX_THREAD_TURNS)
        } else {
            1
        }
    }

    /// Number of curve segments (four per turn).
    pub fn segment_count(&self) -> u32 {
        self.turns() * THREAD_SAMPLES_PER_TURN
    }

    /// Control points from `y = length / 2` down to `y = -length / 2`.
    pub fn control_points(&self) -> Vec<DVec3> {
        let turns = self.turns() as f64;
        let samples = self.segment_count();

        (0..=samples)
            .map(|i| {
                let t = i as f64 / samples as f64;
                let angle = t * TAU * turns;
                DVec3::new(
                    self.radius * angle.cos(),
                    self.length / 2.0 - t * self.length,
                    self.radius * angle.sin(),
                )
            })
            .collect()
    }

    /// Open Catmull-Rom curve through the control points.
    pub fn curve(&self) -> Result<SpaceCurve, GeometryError> {
        SpaceCurve::new(self.control_points(), false)
    }
}
