//! # Part Factory Tests
//!
//! End-to-end checks of each part family through `generate`.

use super::*;
use crate::params::{schema, Parameter};
use approx::assert_relative_eq;
use config::constants::WALL_EPSILON;
use glam::DVec3;

fn with_values(part: PartType, values: &[(&str, f64)]) -> ParameterMap {
    ParameterMap::from_values(&schema::default_parameters(part), values.iter().copied())
}

fn radial(v: &DVec3) -> f64 {
    (v.x * v.x + v.z * v.z).sqrt()
}

/// Distinct polar angles (degrees, sorted) of vertices at distance `r`.
fn angles_at_radius(mesh: &Mesh, r: f64) -> Vec<f64> {
    let mut angles: Vec<f64> = mesh
        .vertices()
        .iter()
        .filter(|v| (radial(v) - r).abs() < 1e-9)
        .map(|v| v.z.atan2(v.x).to_degrees().rem_euclid(360.0))
        .collect();
    angles.sort_by(|a, b| a.total_cmp(b));
    angles.dedup_by(|a, b| (*a - *b).abs() < 1e-6);
    if angles.len() > 1
        && (angles[angles.len() - 1] - 360.0).abs() < 1e-6
        && angles[0].abs() < 1e-6
    {
        angles.pop();
    }
    angles
}

fn assert_well_formed(mesh: &Mesh) {
    assert!(mesh.vertex_count() > 0);
    assert_eq!(mesh.index_count() % 3, 0);
    let count = mesh.vertex_count() as u32;
    assert!(mesh.indices_u32().iter().all(|&i| i < count));
    assert_eq!(mesh.normals().len(), mesh.vertex_count());
}

// =============================================================================
// ALL PARTS
// =============================================================================

#[test]
fn test_default_parts_generate() {
    for part in PartType::ALL {
        let mesh = generate(part, &schema::default_parameters(part)).unwrap();
        assert_well_formed(&mesh);
        assert!(mesh.signed_volume() > 0.0, "{part} has inverted winding");
    }
}

#[test]
fn test_generation_is_deterministic() {
    for part in PartType::ALL {
        let parameters = schema::default_parameters(part);
        assert_eq!(
            generate(part, &parameters).unwrap(),
            generate(part, &parameters).unwrap()
        );
    }
}

#[test]
fn test_missing_parameter_fails() {
    let parameters: ParameterMap = schema::default_parameters(PartType::Gear)
        .iter()
        .filter(|p| p.id != "teeth")
        .cloned()
        .collect();
    let err = generate(PartType::Gear, &parameters).unwrap_err();
    assert_eq!(err, GeometryError::missing(PartType::Gear, "teeth"));
}

#[test]
fn test_optional_parameters_have_defaults() {
    let parameters: ParameterMap = ["headRadius", "shaftRadius", "length"]
        .iter()
        .filter_map(|id| schema::default_parameters(PartType::Bolt).get(id).cloned())
        .collect();
    let bolt = Bolt::from_parameters(&parameters).unwrap();
    assert_relative_eq!(bolt.head_height, 0.8 * 0.7);
    assert_eq!(bolt.head_type, HeadType::Hex);
    assert_relative_eq!(bolt.thread_pitch, 0.2);
    assert_eq!(bolt.thread_segments, 32);
}

#[test]
fn test_out_of_range_values_are_clamped() {
    let parameters = with_values(PartType::Gear, &[("teeth", 500.0), ("radius", -4.0)]);
    let gear = Gear::from_parameters(&parameters).unwrap();
    assert_eq!(gear.teeth, 36);
    assert_eq!(gear.radius, 3.0);
}

#[test]
fn test_degenerate_geometry_falls_back_to_cylinder() {
    let mut parameters = schema::default_parameters(PartType::Pipe);
    parameters.insert(Parameter::new("length", 0.0, 0.0, 0.0, 0.0));
    let mesh = generate(PartType::Pipe, &parameters).unwrap();
    let expected = create_cylinder(1.0, 1.0, 1.0, true, 64).unwrap();
    assert_eq!(mesh, expected);
}

#[test]
fn test_caps_fall_back_to_cylinder() {
    let config = GeneratorConfig::default().with_caps(100, 100).unwrap();
    let parameters = schema::default_parameters(PartType::Gear);
    let mesh = generate_with_config(PartType::Gear, &parameters, &config).unwrap();
    let expected = create_cylinder(1.0, 5.0, 5.0, true, 64).unwrap();
    assert_eq!(mesh, expected);
}

#[test]
fn test_check_caps_reports_counts() {
    let mesh = create_cylinder(1.0, 1.0, 1.0, true, 8).unwrap();
    let config = GeneratorConfig::default().with_caps(10, 1000).unwrap();
    let err = check_caps(mesh, &config).unwrap_err();
    assert_eq!(err, GeometryError::TooManyVertices { count: 32, max: 10 });
}

// =============================================================================
// GEAR
// =============================================================================

#[test]
fn test_fallback_survives_zero_circle_segments() {
    let config = GeneratorConfig {
        circle_segments: 0,
        ..GeneratorConfig::default()
    };
    for part in PartType::ALL {
        let parameters = schema::default_parameters(part);
        assert!(generate_with_config(part, &parameters, &config).is_ok(), "{part}");
    }

    let mut parameters = schema::default_parameters(PartType::Pipe);
    parameters.insert(Parameter::new("length", 0.0, 0.0, 0.0, 0.0));
    let mesh = generate_with_config(PartType::Pipe, &parameters, &config).unwrap();
    assert_eq!(mesh, create_cylinder(1.0, 1.0, 1.0, true, 3).unwrap());
}

#[test]
fn test_tolerance_drops_small_features() {
    let coarse = GeneratorConfig::new(0.1, 64, 8).unwrap();

    let nut_defaults = schema::default_parameters(PartType::Nut);
    let nut = generate_with_config(PartType::Nut, &nut_defaults, &coarse).unwrap();
    let plain_nut = with_values(PartType::Nut, &[("threadDepth", 0.0), ("chamferSize", 0.0)]);
    assert_eq!(nut, generate(PartType::Nut, &plain_nut).unwrap());

    let bolt_defaults = schema::default_parameters(PartType::Bolt);
    let bolt = generate_with_config(PartType::Bolt, &bolt_defaults, &coarse).unwrap();
    let plain_bolt = with_values(PartType::Bolt, &[("threadDepth", 0.0)]);
    assert_eq!(bolt, generate(PartType::Bolt, &plain_bolt).unwrap());
}

#[test]
fn test_gear_example() {
    let parameters = with_values(
        PartType::Gear,
        &[
            ("teeth", 8.0),
            ("radius", 5.0),
            ("thickness", 1.0),
            ("hole", 1.0),
            ("toothDepthRatio", 0.15),
        ],
    );
    let mesh = generate(PartType::Gear, &parameters).unwrap();

    let radii: Vec<f64> = mesh.vertices().iter().map(radial).collect();
    let max = radii.iter().copied().fold(0.0, f64::max);
    let min = radii.iter().copied().fold(f64::INFINITY, f64::min);
    assert_relative_eq!(max, 5.0, epsilon = 1e-9);
    assert_relative_eq!(min, 1.0, epsilon = 1e-9);

    let tips = angles_at_radius(&mesh, 5.0);
    assert_eq!(tips.len(), 8);
    for pair in tips.windows(2) {
        assert_relative_eq!(pair[1] - pair[0], 45.0, epsilon = 1e-6);
    }
    assert_eq!(angles_at_radius(&mesh, 4.25).len(), 8);

    let (low, high) = mesh.bounding_box();
    assert_relative_eq!(low.y, -0.5, epsilon = 1e-12);
    assert_relative_eq!(high.y, 0.5, epsilon = 1e-12);
}

#[test]
fn test_gear_without_teeth_is_round() {
    let mut parameters = schema::default_parameters(PartType::Gear);
    parameters.insert(Parameter::new("teeth", 0.0, 0.0, 36.0, 1.0));
    let mesh = generate(PartType::Gear, &parameters).unwrap();

    for v in mesh.vertices() {
        assert!(radial(v) <= 5.0 + 1e-9);
    }
    assert_eq!(angles_at_radius(&mesh, 5.0).len(), 64);
}

#[test]
fn test_gear_hole_is_held_inside_roots() {
    let mut parameters = with_values(PartType::Gear, &[("radius", 3.0), ("toothDepthRatio", 0.3)]);
    parameters.insert(Parameter::new("hole", 2.9, 0.0, 3.0, 0.1));
    let mesh = generate(PartType::Gear, &parameters).unwrap();
    let min = mesh.vertices().iter().map(radial).fold(f64::INFINITY, f64::min);
    // Roots sit at 2.1; the bore stays below 0.9 of the clearance
    assert!(min < 2.1 * 0.9 + 1e-9);
    assert!(mesh.signed_volume() > 0.0);
}

#[test]
fn test_gear_without_hole() {
    let mut parameters = schema::default_parameters(PartType::Gear);
    parameters.insert(Parameter::new("hole", 0.0, 0.0, 3.0, 0.1));
    let mesh = generate(PartType::Gear, &parameters).unwrap();
    // Nothing inside the tooth roots at 4.25 apart from bevel insets
    let min = mesh.vertices().iter().map(radial).fold(f64::INFINITY, f64::min);
    assert!(min > 4.0);
}

// =============================================================================
// PIPE
// =============================================================================

#[test]
fn test_pipe_zero_thickness_keeps_thin_wall() {
    let parameters = with_values(PartType::Pipe, &[("thickness", 0.0)]);
    let pipe = Pipe::from_parameters(&parameters).unwrap();
    assert_relative_eq!(pipe.inner_radius(), 1.0 - WALL_EPSILON);

    let mesh = pipe.build(&GeneratorConfig::default()).unwrap();
    let min = mesh.vertices().iter().map(radial).fold(f64::INFINITY, f64::min);
    assert_relative_eq!(min, 1.0 - WALL_EPSILON, epsilon = 1e-9);
}

#[test]
fn test_pipe_wall_is_capped() {
    let parameters = with_values(PartType::Pipe, &[("radius", 0.5), ("thickness", 1.0)]);
    let pipe = Pipe::from_parameters(&parameters).unwrap();
    assert_relative_eq!(pipe.inner_radius(), 0.5 * 0.05, epsilon = 1e-12);
}

#[test]
fn test_pipe_is_centred() {
    let mesh = generate(PartType::Pipe, &schema::default_parameters(PartType::Pipe)).unwrap();
    let (low, high) = mesh.bounding_box();
    assert_relative_eq!(low.y, -2.5, epsilon = 1e-9);
    assert_relative_eq!(high.y, 2.5, epsilon = 1e-9);
    assert_relative_eq!(high.x, 1.0, epsilon = 1e-9);
}

// =============================================================================
// SPRING
// =============================================================================

#[test]
fn test_spring_point_count() {
    let parameters = with_values(PartType::Spring, &[("coils", 7.0), ("resolution", 96.0)]);
    let spring = Spring::from_parameters(&parameters).unwrap();
    // floor(7 * 96 / 8) = 84 quanta
    assert_eq!(spring.helix.segment_count(), 84 * 8);
    assert_eq!(spring.helix.control_points().len(), 84 * 8 + 1);
    assert_eq!(spring.tubular_segments(), 512);
}

#[test]
fn test_spring_radius_is_constant_without_taper() {
    let spring = Spring::from_parameters(&schema::default_parameters(PartType::Spring)).unwrap();
    let radii: Vec<f64> = spring.helix.control_points().iter().map(radial).collect();
    let mean = radii.iter().sum::<f64>() / radii.len() as f64;
    let variance = radii.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / radii.len() as f64;
    assert!(variance < 1e-20);
    assert_relative_eq!(mean, 1.0, epsilon = 1e-12);
}

#[test]
fn test_spring_wire_segments() {
    let parameters = with_values(
        PartType::Spring,
        &[("thickness", 0.5), ("radius", 2.0), ("radialSegments", 3.0)],
    );
    let spring = Spring::from_parameters(&parameters).unwrap();
    assert_eq!(spring.wire_segments(), 12);
}

#[test]
fn test_spring_thickness_is_capped() {
    let parameters = with_values(PartType::Spring, &[("radius", 0.2), ("thickness", 0.5)]);
    let spring = Spring::from_parameters(&parameters).unwrap();
    assert_relative_eq!(spring.thickness, 0.1);
}

// =============================================================================
// BOLT
// =============================================================================

#[test]
fn test_bolt_layout() {
    let parameters = with_values(PartType::Bolt, &[("threadDepth", 0.0)]);
    let mesh = generate(PartType::Bolt, &parameters).unwrap();
    let (low, high) = mesh.bounding_box();
    assert_relative_eq!(low.y, -1.5, epsilon = 1e-9);
    assert_relative_eq!(high.y, 1.5 + 0.6, epsilon = 1e-9);
}

#[test]
fn test_bolt_thread_adds_geometry() {
    let unthreaded = with_values(PartType::Bolt, &[("threadDepth", 0.0)]);
    let plain = generate(PartType::Bolt, &unthreaded).unwrap();
    let threaded = generate(PartType::Bolt, &schema::default_parameters(PartType::Bolt)).unwrap();
    assert!(threaded.vertex_count() > plain.vertex_count());
}

#[test]
fn test_bolt_head_types() {
    for head in [0.0, 1.0, 2.0] {
        let parameters = with_values(PartType::Bolt, &[("headType", head)]);
        let mesh = generate(PartType::Bolt, &parameters).unwrap();
        assert_well_formed(&mesh);
        let (_, high) = mesh.bounding_box();
        assert_relative_eq!(high.y, 2.1, epsilon = 1e-9);
    }
}

#[test]
fn test_bolt_countersink() {
    let plain = generate(PartType::Bolt, &schema::default_parameters(PartType::Bolt)).unwrap();
    let countersunk = with_values(PartType::Bolt, &[("countersink", 0.5)]);
    let sunk = generate(PartType::Bolt, &countersunk).unwrap();
    assert_eq!(sunk.vertex_count(), plain.vertex_count() + 64 * 4);
}

#[test]
fn test_bolt_shaft_and_thread_clamps() {
    let parameters = with_values(
        PartType::Bolt,
        &[("headRadius", 0.5), ("shaftRadius", 1.0), ("threadDepth", 0.2)],
    );
    let bolt = Bolt::from_parameters(&parameters).unwrap();
    assert_relative_eq!(bolt.shaft_radius, 0.45);
    assert_relative_eq!(bolt.thread_depth, 0.2_f64.min(0.45 * 0.5));
}

#[test]
fn test_bolt_pitch_raised_to_turn_limit() {
    let mut parameters = with_values(PartType::Bolt, &[("length", 10.0)]);
    parameters.insert(Parameter::new("threadPitch", 0.01, 0.01, 0.5, 0.01));
    let bolt = Bolt::from_parameters(&parameters).unwrap();
    assert_relative_eq!(bolt.thread_pitch, 10.0 / 200.0);
}

// =============================================================================
// NUT
// =============================================================================

#[test]
fn test_nut_hexagon_corners() {
    let parameters = with_values(PartType::Nut, &[("threadDepth", 0.0)]);
    let mesh = generate(PartType::Nut, &parameters).unwrap();
    let corners = angles_at_radius(&mesh, 0.8);
    assert_eq!(corners.len(), 6);
    for (i, angle) in corners.iter().enumerate() {
        assert_relative_eq!(*angle, i as f64 * 60.0, epsilon = 1e-6);
    }
}

#[test]
fn test_nut_sides_snap() {
    for (requested, expected) in [(4.0, 4), (5.0, 4), (7.0, 6), (8.0, 8)] {
        let parameters = with_values(PartType::Nut, &[("sides", requested)]);
        let nut = Nut::from_parameters(&parameters).unwrap();
        assert_eq!(nut.sides, expected);
    }
}

#[test]
fn test_nut_hole_policy() {
    let nut = Nut::from_parameters(&with_values(PartType::Nut, &[("holeRadius", 0.8)])).unwrap();
    let apothem = 0.8 * (std::f64::consts::PI / 6.0).cos();
    assert_relative_eq!(nut.hole_radius, (0.8 * 0.75_f64).min(apothem * 0.85));

    let nut = Nut::from_parameters(&with_values(PartType::Nut, &[("holeRadius", 0.1)])).unwrap();
    assert_relative_eq!(nut.hole_radius, 0.8 * 0.35);
}

#[test]
fn test_nut_thread_stays_near_bore() {
    let mesh = generate(PartType::Nut, &schema::default_parameters(PartType::Nut)).unwrap();
    let min = mesh.vertices().iter().map(radial).fold(f64::INFINITY, f64::min);
    // Default bore 0.4 with depth held to 0.05 * 0.4
    assert!(min >= 0.4 - 0.02 - 1e-9);
    assert!(min < 0.4);
}

#[test]
fn test_nut_texture_is_bounded() {
    let parameters = with_values(PartType::Nut, &[("texture", 1.0)]);
    let mesh = generate(PartType::Nut, &parameters).unwrap();
    assert_well_formed(&mesh);
    let max = mesh.vertices().iter().map(radial).fold(0.0, f64::max);
    assert!(max <= 0.8 * 1.02 + 1e-9);

    let config = GeneratorConfig::default().with_texture_seed(1);
    let other = generate_with_config(PartType::Nut, &parameters, &config).unwrap();
    assert_ne!(mesh, other);
}

#[test]
fn test_nut_is_centred() {
    let mesh = generate(PartType::Nut, &schema::default_parameters(PartType::Nut)).unwrap();
    let (low, high) = mesh.bounding_box();
    assert_relative_eq!(low.y, -0.3, epsilon = 1e-9);
    assert_relative_eq!(high.y, 0.3, epsilon = 1e-9);
}
