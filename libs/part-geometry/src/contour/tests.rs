//! Tests for contour construction.

use super::*;
use approx::assert_relative_eq;

/// Number of strict local radius maxima around a closed ring.
fn local_maxima(points: &[DVec2]) -> usize {
    let n = points.len();
    (0..n)
        .filter(|&i| {
            let r = points[i].length();
            r > points[(i + n - 1) % n].length() && r > points[(i + 1) % n].length()
        })
        .count()
}

fn angle_of(p: DVec2) -> f64 {
    p.y.atan2(p.x)
}

// =============================================================================
// GEAR TESTS
// =============================================================================

#[test]
fn test_gear_zero_teeth_is_circle() {
    let outline = gear_outline(0, 5.0, 0.15, 0.5, 64);
    assert_eq!(outline.len(), 64);
    for p in &outline {
        assert_relative_eq!(p.length(), 5.0, epsilon = 1e-12);
    }
}

#[test]
fn test_gear_tip_count_matches_teeth() {
    for teeth in [3, 8, 20, 36, 100] {
        let outline = gear_outline(teeth, 5.0, 0.15, 0.5, 64);
        assert_eq!(outline.len(), teeth as usize * 2);
        assert_eq!(local_maxima(&outline), teeth as usize);
    }
}

#[test]
fn test_max_radius_reaches_tips() {
    let gear =
        Contour::from_outline(gear_outline(12, 5.0, 0.2, 0.5, 64)).with_circular_hole(1.0, 64);
    assert_relative_eq!(gear.max_radius(), 5.0, epsilon = 1e-12);

    let nut = Contour::regular_polygon(6, 0.8).with_circular_hole(0.4, 64);
    assert_relative_eq!(nut.max_radius(), 0.8, epsilon = 1e-12);
}

#[test]
fn test_gear_eight_teeth_example() {
    let outline = gear_outline(8, 5.0, 0.15, 0.5, 64);
    let tips: Vec<DVec2> = outline.iter().skip(1).step_by(2).copied().collect();
    let roots: Vec<DVec2> = outline.iter().step_by(2).copied().collect();

    for tip in &tips {
        assert_relative_eq!(tip.length(), 5.0, epsilon = 1e-12);
    }
    for root in &roots {
        assert_relative_eq!(root.length(), 4.25, epsilon = 1e-12);
    }
    for pair in tips.windows(2) {
        let delta = angle_of(pair[1]) - angle_of(pair[0]);
        assert_relative_eq!(delta.rem_euclid(TAU), TAU / 8.0, epsilon = 1e-9);
    }
}

#[test]
fn test_gear_small_teeth_raised_to_three() {
    let outline = gear_outline(1, 5.0, 0.15, 0.5, 64);
    assert_eq!(outline.len(), 6);
}

#[test]
fn test_gear_width_clamped_keeps_ring_simple() {
    // Width 1.0 would put the tip on the next root angle
    let outline = gear_outline(8, 5.0, 0.15, 1.0, 64);
    let step = TAU / 8.0;
    let tip_angle = angle_of(outline[1]).rem_euclid(TAU);
    assert_relative_eq!(tip_angle, step * MAX_TOOTH_WIDTH, epsilon = 1e-9);
}

#[test]
fn test_gear_contour_is_counter_clockwise() {
    let contour = Contour::from_outline(gear_outline(12, 5.0, 0.2, 0.5, 64));
    assert!(signed_area(contour.outer()) > 0.0);
    assert!(contour.clearance() < 5.0 * 0.8 + 1e-9);
}

// =============================================================================
// POLYGON TESTS
// =============================================================================

#[test]
fn test_hexagon_corners_sixty_degrees_apart() {
    let hex = Contour::regular_polygon(6, 1.0);
    assert_eq!(hex.outer().len(), 6);
    for (i, p) in hex.outer().iter().enumerate() {
        let expected = TAU * i as f64 / 6.0;
        assert_relative_eq!(angle_of(*p).rem_euclid(TAU), expected, epsilon = 1e-9);
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_regular_polygon_clearance_is_apothem() {
    for sides in [4u32, 6, 8] {
        let polygon = Contour::regular_polygon(sides, 2.0);
        let apothem = 2.0 * (std::f64::consts::PI / sides as f64).cos();
        assert_relative_eq!(polygon.clearance(), apothem, epsilon = 1e-12);
    }
}

// =============================================================================
// HOLE AND AREA TESTS
// =============================================================================

#[test]
fn test_hole_is_clockwise() {
    let contour = Contour::circle(2.0, 32).with_circular_hole(1.0, 32);
    assert!(signed_area(&contour.holes()[0]) < 0.0);
    assert_eq!(contour.vertex_count(), 64);
}

#[test]
fn test_new_normalizes_orientation() {
    let mut cw = circle_points(1.0, 8);
    cw.reverse();
    let contour = Contour::new(cw, vec![circle_points(0.5, 8)]);
    assert!(signed_area(contour.outer()) > 0.0);
    assert!(signed_area(&contour.holes()[0]) < 0.0);
}

#[test]
fn test_square_area_with_hole() {
    let square = Contour::from_outline(vec![
        DVec2::new(-1.0, -1.0),
        DVec2::new(1.0, -1.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(-1.0, 1.0),
    ]);
    assert_relative_eq!(square.area(), 4.0);
    let holed = Contour::new(
        square.outer().to_vec(),
        vec![vec![
            DVec2::new(-0.5, -0.5),
            DVec2::new(0.5, -0.5),
            DVec2::new(0.5, 0.5),
            DVec2::new(-0.5, 0.5),
        ]],
    );
    assert_relative_eq!(holed.area(), 3.0);
}

#[test]
fn test_subdivided_keeps_shape() {
    let hex = Contour::regular_polygon(6, 1.0).with_circular_hole(0.4, 16);
    let fine = hex.subdivided(8);
    assert_eq!(fine.outer().len(), 48);
    assert_eq!(fine.holes()[0].len(), 16);
    assert_relative_eq!(fine.area(), hex.area(), epsilon = 1e-12);
    assert_eq!(fine.outer()[8], hex.outer()[1]);
}
