//! # Polygon Triangulation
//!
//! Ear clipping for simple polygons with holes.
//!
//! ## Algorithm
//!
//! 1. Normalize orientation (outer counter-clockwise, holes clockwise)
//! 2. Bridge each hole into the outer ring, rightmost hole first, through a
//!    mutually visible vertex pair (Eberly, "Triangulation by Ear Clipping")
//! 3. Clip ears from the merged ring until one triangle remains
//!
//! Orientation tests use the adaptive-precision `robust::orient2d`
//! predicate, so nearly collinear vertices are classified exactly.

use crate::contour::signed_area;
use crate::error::GeometryError;
use glam::DVec2;
use robust::{orient2d, Coord};

/// Triangulates an outer ring with holes.
///
/// Returned indices address the concatenation of `outer` followed by each
/// hole in order. Triangles are counter-clockwise in the XY plane.
///
/// # Example
///
/// ```rust
/// use part_geometry::ops::triangulate;
/// use glam::DVec2;
///
/// let square = [
///     DVec2::new(0.0, 0.0),
///     DVec2::new(1.0, 0.0),
///     DVec2::new(1.0, 1.0),
///     DVec2::new(0.0, 1.0),
/// ];
/// let triangles = triangulate(&square, &[])?;
/// assert_eq!(triangles.len(), 2);
/// # Ok::<(), part_geometry::GeometryError>(())
/// ```
pub fn triangulate(outer: &[DVec2], holes: &[Vec<DVec2>]) -> Result<Vec<[u32; 3]>, GeometryError> {
    if outer.len() < 3 {
        return Err(GeometryError::degenerate(format!(
            "outer boundary needs at least 3 points, got {}",
            outer.len()
        )));
    }
    if let Some(hole) = holes.iter().find(|h| h.len() < 3) {
        return Err(GeometryError::degenerate(format!(
            "hole needs at least 3 points, got {}",
            hole.len()
        )));
    }

    let total = outer.len() + holes.iter().map(Vec::len).sum::<usize>();
    let mut points = Vec::with_capacity(total);
    points.extend_from_slice(outer);

    let mut ring: Vec<u32> = (0..outer.len() as u32).collect();
    if signed_area(outer) < 0.0 {
        ring.reverse();
    }

    let mut hole_rings = Vec::with_capacity(holes.len());
    for hole in holes {
        let start = points.len() as u32;
        points.extend_from_slice(hole);
        let mut indices: Vec<u32> = (start..start + hole.len() as u32).collect();
        if signed_area(hole) > 0.0 {
            indices.reverse();
        }
        hole_rings.push(indices);
    }

    // Rightmost hole first so later bridges never cross earlier ones
    hole_rings.sort_by(|a, b| max_x(&points, b).total_cmp(&max_x(&points, a)));
    for hole in &hole_rings {
        ring = bridge_hole(&points, ring, hole)?;
    }

    clip_ears(&points, &ring)
}

// =============================================================================
// HOLE BRIDGING
// =============================================================================

/// Splices `hole` into `ring` through a visible vertex pair.
fn bridge_hole(points: &[DVec2], ring: Vec<u32>, hole: &[u32]) -> Result<Vec<u32>, GeometryError> {
    let (m_pos, &m_index) = hole
        .iter()
        .enumerate()
        .max_by(|a, b| points[*a.1 as usize].x.total_cmp(&points[*b.1 as usize].x))
        .ok_or_else(|| GeometryError::degenerate("empty hole"))?;
    let m = points[m_index as usize];
    let n = ring.len();
    let at = |pos: usize| points[ring[pos] as usize];

    // Nearest boundary edge hit by the ray from M towards +x. The outer ring
    // is counter-clockwise, so the ray leaves the interior through an edge
    // running upwards.
    let mut hit: Option<(f64, usize)> = None;
    for i in 0..n {
        let a = at(i);
        let b = at((i + 1) % n);
        if a.y <= m.y && m.y <= b.y && a.y < b.y {
            let x = a.x + (m.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x >= m.x && hit.map_or(true, |(best, _)| x < best) {
                hit = Some((x, i));
            }
        }
    }
    let (hit_x, edge) =
        hit.ok_or_else(|| GeometryError::degenerate("hole lies outside the outer boundary"))?;

    let intersection = DVec2::new(hit_x, m.y);
    let a_pos = edge;
    let b_pos = (edge + 1) % n;

    let mut p_pos = if at(a_pos) == intersection {
        a_pos
    } else if at(b_pos) == intersection {
        b_pos
    } else {
        let candidate = if at(a_pos).x >= at(b_pos).x { a_pos } else { b_pos };
        closest_blocking_vertex(points, &ring, m, intersection, candidate)
    };

    // Bridges from earlier holes duplicate vertices; pick the copy whose
    // wedge actually contains M.
    let p_index = ring[p_pos];
    if let Some(pos) = (0..n)
        .filter(|&i| ring[i] == p_index)
        .find(|&i| locally_inside(at((i + n - 1) % n), at(i), at((i + 1) % n), m))
    {
        p_pos = pos;
    }

    let mut merged = Vec::with_capacity(n + hole.len() + 2);
    merged.extend_from_slice(&ring[..=p_pos]);
    merged.extend_from_slice(&hole[m_pos..]);
    merged.extend_from_slice(&hole[..m_pos]);
    merged.push(m_index);
    merged.push(ring[p_pos]);
    merged.extend_from_slice(&ring[p_pos + 1..]);
    Ok(merged)
}

/// Among ring vertices inside triangle (M, I, P), returns the one with the
/// smallest angle to the ray; `candidate` if none blocks the view.
fn closest_blocking_vertex(
    points: &[DVec2],
    ring: &[u32],
    m: DVec2,
    intersection: DVec2,
    candidate: usize,
) -> usize {
    let p = points[ring[candidate] as usize];
    let (t0, t1, t2) = if orient(m, intersection, p) > 0.0 {
        (m, intersection, p)
    } else {
        (m, p, intersection)
    };

    let ray_angle = |v: DVec2| (v - m).y.abs().atan2((v - m).x);
    let mut best = candidate;
    let mut best_angle = ray_angle(p);
    let mut best_distance = m.distance_squared(p);

    for (pos, &index) in ring.iter().enumerate() {
        let v = points[index as usize];
        if pos == candidate || v == p || v == m || !in_triangle(t0, t1, t2, v) {
            continue;
        }
        let angle = ray_angle(v);
        let distance = m.distance_squared(v);
        if angle < best_angle || (angle == best_angle && distance < best_distance) {
            best = pos;
            best_angle = angle;
            best_distance = distance;
        }
    }
    best
}

/// True if `m` lies inside the wedge formed at `a` by its neighbours.
fn locally_inside(prev: DVec2, a: DVec2, next: DVec2, m: DVec2) -> bool {
    if orient(prev, a, next) > 0.0 {
        orient(a, m, next) <= 0.0 && orient(a, prev, m) <= 0.0
    } else {
        orient(a, m, prev) > 0.0 || orient(a, next, m) > 0.0
    }
}

// =============================================================================
// EAR CLIPPING
// =============================================================================

fn clip_ears(points: &[DVec2], ring: &[u32]) -> Result<Vec<[u32; 3]>, GeometryError> {
    let n = ring.len();
    let mut prev: Vec<usize> = (0..n).map(|i| (i + n - 1) % n).collect();
    let mut next: Vec<usize> = (0..n).map(|i| (i + 1) % n).collect();
    let at = |node: usize| points[ring[node] as usize];

    let mut triangles = Vec::with_capacity(n.saturating_sub(2));
    let mut remaining = n;
    let mut current = 0;
    let mut stalled = 0;

    while remaining > 3 {
        let a = prev[current];
        let c = next[current];

        if is_ear(&at, &next, a, current, c) {
            triangles.push([ring[a], ring[current], ring[c]]);
            next[a] = c;
            prev[c] = a;
            remaining -= 1;
            current = c;
            stalled = 0;
            continue;
        }

        current = c;
        stalled += 1;

        if stalled >= remaining {
            // A full pass without an ear: drop a zero-area vertex and retry
            let mut node = current;
            let collinear = (0..remaining).find_map(|_| {
                let found = orient(at(prev[node]), at(node), at(next[node])) == 0.0;
                let hit = found.then_some(node);
                node = next[node];
                hit
            });
            let Some(node) = collinear else {
                return Err(GeometryError::degenerate(format!(
                    "ear clipping stalled with {remaining} vertices left"
                )));
            };
            next[prev[node]] = next[node];
            prev[next[node]] = prev[node];
            current = next[node];
            remaining -= 1;
            stalled = 0;
        }
    }

    let a = prev[current];
    let c = next[current];
    if orient(at(a), at(current), at(c)) > 0.0 {
        triangles.push([ring[a], ring[current], ring[c]]);
    }

    if triangles.is_empty() {
        return Err(GeometryError::degenerate("contour encloses no area"));
    }
    Ok(triangles)
}

fn is_ear(at: &impl Fn(usize) -> DVec2, next: &[usize], a: usize, b: usize, c: usize) -> bool {
    let (pa, pb, pc) = (at(a), at(b), at(c));
    if orient(pa, pb, pc) <= 0.0 {
        return false;
    }

    let mut node = next[c];
    while node != a {
        let v = at(node);
        if v != pa && v != pb && v != pc && in_triangle(pa, pb, pc, v) {
            return false;
        }
        node = next[node];
    }
    true
}

// =============================================================================
// PREDICATES
// =============================================================================

fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// Inclusive point-in-triangle test for a counter-clockwise triangle.
fn in_triangle(a: DVec2, b: DVec2, c: DVec2, p: DVec2) -> bool {
    orient(a, b, p) >= 0.0 && orient(b, c, p) >= 0.0 && orient(c, a, p) >= 0.0
}

fn max_x(points: &[DVec2], ring: &[u32]) -> f64 {
    ring.iter()
        .map(|&i| points[i as usize].x)
        .fold(f64::NEG_INFINITY, f64::max)
}
