//! # Geometry Errors
//!
//! Error types for part generation.
//!
//! Only [`GeometryError::MissingParameter`] reaches callers of
//! [`crate::generate`]; the other variants are recovered inside the factory
//! by substituting a fallback solid.

use crate::params::PartType;
use thiserror::Error;

/// Errors that can occur during mesh generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A required parameter id is absent from the parameter map
    #[error("Missing parameter '{id}' for {part}")]
    MissingParameter { part: PartType, id: String },

    /// Degenerate geometry (empty contour, zero depth, stuck triangulation)
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// Too many vertices
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// Too many triangles
    #[error("Too many triangles: {count} (max: {max})")]
    TooManyTriangles { count: usize, max: usize },
}

impl GeometryError {
    /// Creates a missing parameter error.
    pub fn missing(part: PartType, id: impl Into<String>) -> Self {
        Self::MissingParameter {
            part,
            id: id.into(),
        }
    }

    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Returns true if the factory may replace the result with a fallback
    /// solid instead of failing the call.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::MissingParameter { .. })
    }
}

/// A value that was outside its declared bounds and has been clamped.
///
/// This is a warning, not a failure: it is only ever logged.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parameter '{id}' out of range: {requested} clamped to {applied}")]
pub struct ParameterOutOfRange {
    pub id: String,
    pub requested: f64,
    pub applied: f64,
}
