//! # Configuration Constants
//!
//! Centralized constants for the part geometry pipeline. All tessellation
//! parameters, safety caps, clamp ratios and precision values are defined
//! here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Resolution**: Default tessellation parameters
//! - **Limits**: Maximum values for safety bounds
//! - **Clamp Ratios**: Part-specific safe bands (hole vs. radius, etc.)
//! - **Runtime Config**: [`GeneratorConfig`] snapshot passed to the factory

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-9;

/// Epsilon below which a triangle is considered to have zero area.
///
/// Compared against the length of the (unnormalized) face normal, i.e. twice
/// the triangle area.
pub const VERTEX_MERGE_EPSILON: f64 = 1e-8;

/// Scaling factor for quantizing f64 coordinates to i64 keys.
///
/// Vertices whose quantized coordinates match are treated as the same
/// physical point (used to key surface noise so seams stay closed).
///
/// # Example
///
/// ```rust
/// use config::constants::COORDINATE_SCALE;
///
/// fn to_integer_coord(value: f64) -> i64 {
///     (value * COORDINATE_SCALE).round() as i64
/// }
///
/// assert_eq!(to_integer_coord(0.5), 500_000);
/// ```
pub const COORDINATE_SCALE: f64 = 1e6;

/// Minimum wall left between an inner and an outer radius.
///
/// A pipe with zero wall thickness ends up with an inner radius of
/// `radius - WALL_EPSILON`.
pub const WALL_EPSILON: f64 = 1e-3;

// =============================================================================
// RESOLUTION CONSTANTS
// =============================================================================

/// Segment count used for circles (plain gear outlines, hole paths,
/// round bolt heads).
///
/// # Example
///
/// ```rust
/// use config::constants::CIRCLE_SEGMENTS;
/// assert_eq!(CIRCLE_SEGMENTS, 64);
/// ```
pub const CIRCLE_SEGMENTS: u32 = 64;

/// Number of interpolated rings per bevel.
pub const BEVEL_SEGMENTS: u32 = 8;

/// Minimum segments for any closed polygonal ring.
pub const MIN_SEGMENTS: u32 = 3;

/// Radial segments used for the bolt thread tube.
pub const THREAD_RADIAL_SEGMENTS: u32 = 8;

/// Control points emitted per thread turn.
pub const THREAD_SAMPLES_PER_TURN: u32 = 4;

/// Spring curve points are quantized to a multiple of this value.
pub const SPRING_POINT_QUANTUM: u32 = 8;

/// Minimum number of quanta in a spring curve (`64 * 8 = 512` points).
pub const SPRING_MIN_QUANTA: u32 = 64;

/// Lower bound on spring tube segments.
pub const SPRING_MIN_TUBULAR_SEGMENTS: u32 = 128;

/// Upper bound on spring tube segments.
pub const SPRING_MAX_TUBULAR_SEGMENTS: u32 = 512;

/// Wire thickness multiplier used to derive a minimum radial segment count.
pub const SPRING_RADIAL_DENSITY: f64 = 24.0;

/// Wall subdivisions per thread pitch when a nut bore is threaded.
pub const NUT_STEPS_PER_PITCH: f64 = 8.0;

/// Every nut side is split into this many edges when texture is applied.
pub const NUT_TEXTURE_EDGE_SPLITS: usize = 8;

/// Pipe wall subdivisions along its length.
pub const PIPE_TUBULAR_SEGMENTS: u32 = 16;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum radial segments for any tube sweep.
pub const MAX_RADIAL_SEGMENTS: u32 = 64;

/// Maximum radial segments for a spring tube.
pub const SPRING_MAX_RADIAL_SEGMENTS: u32 = 32;

/// Maximum tubular segments for any tube sweep.
pub const MAX_TUBULAR_SEGMENTS: u32 = 4096;

/// Maximum control points in a space curve.
pub const MAX_CURVE_POINTS: usize = 16_384;

/// Maximum wall subdivisions in an extrusion.
pub const MAX_EXTRUDE_STEPS: u32 = 256;

/// Maximum bevel rings at each end of an extrusion.
pub const MAX_BEVEL_SEGMENTS: u32 = 32;

/// Maximum number of gear teeth.
pub const MAX_TEETH: u32 = 256;

/// Maximum number of bolt thread turns.
pub const MAX_THREAD_TURNS: u32 = 200;

/// Maximum number of vertices in a single mesh.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1000;
/// assert!(vertex_count < MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = 2_000_000;

/// Maximum number of triangles in a single mesh.
pub const MAX_TRIANGLES: usize = 4_000_000;

// =============================================================================
// CLAMP RATIOS
// =============================================================================

/// Largest gear hole as a fraction of the outer radius.
pub const GEAR_MAX_HOLE_RATIO: f64 = 0.9;

/// Largest hole as a fraction of the outer boundary clearance.
pub const HOLE_CLEARANCE_RATIO: f64 = 0.9;

/// Tooth width bounds (fraction of the angular pitch).
pub const MIN_TOOTH_WIDTH: f64 = 0.1;

/// Keeps each tooth tip strictly before the next tooth's base angle.
pub const MAX_TOOTH_WIDTH: f64 = 0.9;

/// Largest tooth depth as a fraction of the radius.
pub const MAX_TOOTH_DEPTH_RATIO: f64 = 0.5;

/// Gear bevel thickness as a fraction of the gear thickness.
pub const GEAR_BEVEL_THICKNESS_RATIO: f64 = 0.05;

/// Smallest nut hole as a fraction of the circumradius.
pub const NUT_MIN_HOLE_RATIO: f64 = 0.35;

/// Largest nut hole as a fraction of the circumradius.
pub const NUT_MAX_HOLE_RATIO: f64 = 0.75;

/// Largest nut hole as a fraction of the polygon apothem (wall strength).
pub const NUT_WALL_CLEARANCE_RATIO: f64 = 0.85;

/// Allowed nut side counts.
pub const NUT_SIDES: [u32; 3] = [4, 6, 8];

/// Largest thread depth as a fraction of the nut hole radius.
pub const NUT_MAX_THREAD_DEPTH_RATIO: f64 = 0.05;

/// Thread band around the nut bore, as fractions of the hole radius.
pub const THREAD_BAND: (f64, f64) = (0.9, 1.1);

/// Texture jitter amplitude as a fraction of the nut radius.
pub const TEXTURE_AMPLITUDE_RATIO: f64 = 0.02;

/// Largest pipe wall as a fraction of the radius.
pub const PIPE_MAX_WALL_RATIO: f64 = 0.95;

/// Largest spring wire thickness as a fraction of the coil radius.
pub const SPRING_MAX_THICKNESS_RATIO: f64 = 0.5;

/// Spring tension bounds.
pub const SPRING_TENSION_RANGE: (f64, f64) = (-0.5, 0.5);

/// Spring taper bounds.
pub const SPRING_TAPER_RANGE: (f64, f64) = (-0.4, 0.4);

/// Largest bolt shaft as a fraction of the head radius.
pub const BOLT_MAX_SHAFT_RATIO: f64 = 0.9;

/// Largest thread depth as a fraction of the shaft radius.
pub const BOLT_MAX_THREAD_DEPTH_RATIO: f64 = 0.5;

/// Default bolt head height as a fraction of the head radius.
pub const BOLT_HEAD_HEIGHT_RATIO: f64 = 0.7;

// =============================================================================
// SEEDS
// =============================================================================

/// Seed for the index-keyed texture noise.
pub const DEFAULT_TEXTURE_SEED: u64 = 0x5EED_CAFE_F00D_0001;

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Immutable snapshot of generator settings shared between the factory and
/// the geometry engines.
///
/// Deserialization runs the same validation as [`GeneratorConfig::new`] and
/// [`GeneratorConfig::with_caps`].
///
/// # Examples
/// ```
/// use config::constants::GeneratorConfig;
/// let config = GeneratorConfig::default();
/// assert!(config.tolerance > 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeneratorConfig")]
pub struct GeneratorConfig {
    /// Feature sizes at or below this are treated as absent (chamfers,
    /// threads, countersinks).
    pub tolerance: f64,
    /// Segment count for circles and hole paths.
    pub circle_segments: u32,
    /// Rings per bevel.
    pub bevel_segments: u32,
    /// Vertex cap checked after every generation.
    pub max_vertices: usize,
    /// Triangle cap checked after every generation.
    pub max_triangles: usize,
    /// Seed for texture noise.
    pub texture_seed: u64,
}

impl GeneratorConfig {
    /// Builds a configuration enforcing strict validation of the supplied
    /// tolerance and segment counts.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeneratorConfig;
    /// let cfg = GeneratorConfig::new(1.0e-6, 48, 4).expect("valid config");
    /// assert_eq!(cfg.circle_segments, 48);
    /// ```
    pub fn new(
        tolerance: f64,
        circle_segments: u32,
        bevel_segments: u32,
    ) -> Result<Self, ConfigError> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance));
        }
        if circle_segments < MIN_SEGMENTS {
            return Err(ConfigError::InvalidSegments(circle_segments));
        }
        if bevel_segments == 0 || bevel_segments > MAX_BEVEL_SEGMENTS {
            return Err(ConfigError::InvalidBevelSegments(bevel_segments));
        }
        Ok(Self {
            tolerance,
            circle_segments,
            bevel_segments,
            ..Self::default()
        })
    }

    /// Returns a copy with different output caps.
    ///
    /// # Examples
    /// ```
    /// use config::constants::GeneratorConfig;
    /// let cfg = GeneratorConfig::default().with_caps(10_000, 20_000).unwrap();
    /// assert_eq!(cfg.max_vertices, 10_000);
    /// assert!(GeneratorConfig::default().with_caps(0, 1).is_err());
    /// ```
    pub fn with_caps(self, max_vertices: usize, max_triangles: usize) -> Result<Self, ConfigError> {
        if max_vertices == 0 {
            return Err(ConfigError::InvalidCap("max_vertices"));
        }
        if max_triangles == 0 {
            return Err(ConfigError::InvalidCap("max_triangles"));
        }
        Ok(Self {
            max_vertices,
            max_triangles,
            ..self
        })
    }

    /// Returns a copy with a different texture seed.
    pub fn with_texture_seed(self, texture_seed: u64) -> Self {
        Self {
            texture_seed,
            ..self
        }
    }
}

/// Unvalidated wire form of [`GeneratorConfig`].
#[derive(Deserialize)]
struct RawGeneratorConfig {
    tolerance: f64,
    circle_segments: u32,
    bevel_segments: u32,
    max_vertices: usize,
    max_triangles: usize,
    texture_seed: u64,
}

impl TryFrom<RawGeneratorConfig> for GeneratorConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGeneratorConfig) -> Result<Self, Self::Error> {
        Ok(Self::new(raw.tolerance, raw.circle_segments, raw.bevel_segments)?
            .with_caps(raw.max_vertices, raw.max_triangles)?
            .with_texture_seed(raw.texture_seed))
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tolerance: EPSILON,
            circle_segments: CIRCLE_SEGMENTS,
            bevel_segments: BEVEL_SEGMENTS,
            max_vertices: MAX_VERTICES,
            max_triangles: MAX_TRIANGLES,
            texture_seed: DEFAULT_TEXTURE_SEED,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Raised when tolerance is zero, negative or NaN.
    #[error("tolerance must be positive: {0}")]
    InvalidTolerance(f64),
    /// Raised when the requested segment count is too small to form a polygon.
    #[error("circle_segments must be >= 3: {0}")]
    InvalidSegments(u32),
    /// Raised when the bevel ring count is zero or above the cap.
    #[error("bevel_segments must be in 1..=32: {0}")]
    InvalidBevelSegments(u32),
    /// Raised when an output cap is zero.
    #[error("{0} must be positive")]
    InvalidCap(&'static str),
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Computes the number of curve points for a spring.
///
/// `max(floor(coils * resolution / 8), 64) * 8`, capped at
/// [`MAX_CURVE_POINTS`] (rounded down to a whole quantum).
///
/// # Example
///
/// ```rust
/// use config::constants::spring_point_count;
///
/// assert_eq!(spring_point_count(5.0, 256.0), 1280);
/// // Short springs never drop below 64 quanta
/// assert_eq!(spring_point_count(2.0, 32.0), 512);
/// ```
pub fn spring_point_count(coils: f64, resolution: f64) -> u32 {
    let quanta = (coils * resolution / SPRING_POINT_QUANTUM as f64).floor();
    let quanta = if quanta.is_finite() { quanta.max(0.0) as u32 } else { 0 };
    let max_quanta = MAX_CURVE_POINTS as u32 / SPRING_POINT_QUANTUM;
    quanta.clamp(SPRING_MIN_QUANTA, max_quanta) * SPRING_POINT_QUANTUM
}

/// Checks if two f64 values are approximately equal within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_equal;
///
/// assert!(approx_equal(1.0, 1.0 + 1e-11));
/// assert!(!approx_equal(1.0, 1.1));
/// ```
#[inline]
pub fn approx_equal(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

/// Checks if a f64 value is approximately zero within EPSILON.
///
/// # Example
///
/// ```rust
/// use config::constants::approx_zero;
///
/// assert!(approx_zero(1e-11));
/// assert!(!approx_zero(0.1));
/// ```
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() < EPSILON
}
