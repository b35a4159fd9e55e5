//! # Config Crate
//!
//! Centralized configuration constants for the part geometry pipeline.
//! All magic numbers and tunable parameters are defined here so that the
//! contour, curve, extrusion and sweep code stays declarative.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{CIRCLE_SEGMENTS, EPSILON, GeneratorConfig};
//!
//! // Use EPSILON for floating-point comparisons
//! let value: f64 = 1e-11;
//! assert!(value.abs() < EPSILON);
//!
//! // The default generator configuration carries the same segment count
//! let config = GeneratorConfig::default();
//! assert_eq!(config.circle_segments, CIRCLE_SEGMENTS);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Bounded Output**: Every segment count has a cap
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
