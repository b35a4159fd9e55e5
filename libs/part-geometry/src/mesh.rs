//! # Mesh Data Structure
//!
//! Core mesh representation with vertices, normals and triangles.
//!
//! A [`Mesh`] is immutable once built. Geometry engines assemble one through
//! a [`MeshBuilder`]; every later transform (centering, rotating, merging,
//! perturbing) returns a new `Mesh` and leaves the input untouched.

use crate::error::GeometryError;
use config::constants::VERTEX_MERGE_EPSILON;
use glam::{DMat4, DVec3};
use serde::{Deserialize, Serialize};

/// Incremental construction of a [`Mesh`].
///
/// # Example
///
/// ```rust
/// use part_geometry::MeshBuilder;
/// use glam::DVec3;
///
/// let mut builder = MeshBuilder::new();
/// let a = builder.add_vertex(DVec3::new(0.0, 0.0, 0.0));
/// let b = builder.add_vertex(DVec3::new(1.0, 0.0, 0.0));
/// let c = builder.add_vertex(DVec3::new(0.0, 1.0, 0.0));
/// builder.add_triangle(a, b, c);
/// let mesh = builder.build();
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl MeshBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with pre-allocated capacity.
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            triangles: Vec::with_capacity(triangle_count),
        }
    }

    /// Returns the number of vertices added so far.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, position: DVec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        index
    }

    /// Adds a triangle by vertex indices.
    pub fn add_triangle(&mut self, v0: u32, v1: u32, v2: u32) {
        self.triangles.push([v0, v1, v2]);
    }

    /// Adds a quad `a, b, c, d` (counter-clockwise seen from its front) as
    /// two triangles.
    pub fn add_quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.triangles.push([a, b, c]);
        self.triangles.push([a, c, d]);
    }

    /// Appends another mesh, offsetting its indices.
    pub fn append(&mut self, other: &Mesh) {
        let offset = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.triangles.extend(
            other
                .triangles
                .iter()
                .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
        );
    }

    /// Finishes construction and computes vertex normals.
    pub fn build(self) -> Mesh {
        let normals = compute_normals(&self.vertices, &self.triangles);
        Mesh {
            vertices: self.vertices,
            normals,
            triangles: self.triangles,
        }
    }
}

/// A triangle mesh with vertices, per-vertex normals and indices.
///
/// All geometry calculations use f64 internally. Export to f32 only
/// happens at the renderer boundary.
///
/// Deserialization goes through [`Mesh::from_buffers`]: indices are checked
/// and normals are recomputed rather than trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMesh")]
pub struct Mesh {
    /// Vertex positions (f64 for precision)
    vertices: Vec<DVec3>,
    /// Unit vertex normals, one per vertex
    normals: Vec<DVec3>,
    /// Triangle indices (3 indices per triangle)
    triangles: Vec<[u32; 3]>,
}

/// Unchecked wire form of [`Mesh`]; stored normals are ignored.
#[derive(Deserialize)]
struct RawMesh {
    vertices: Vec<DVec3>,
    triangles: Vec<[u32; 3]>,
}

impl TryFrom<RawMesh> for Mesh {
    type Error = GeometryError;

    fn try_from(raw: RawMesh) -> Result<Self, Self::Error> {
        Mesh::from_buffers(raw.vertices, raw.triangles)
    }
}

impl Mesh {
    /// Builds a mesh from raw buffers, computing normals.
    ///
    /// Fails if any index is out of range.
    pub fn from_buffers(
        vertices: Vec<DVec3>,
        triangles: Vec<[u32; 3]>,
    ) -> Result<Self, GeometryError> {
        let count = vertices.len() as u32;
        if let Some(tri) = triangles.iter().find(|tri| tri.iter().any(|&i| i >= count)) {
            return Err(GeometryError::degenerate(format!(
                "triangle {tri:?} references a vertex outside 0..{count}"
            )));
        }
        Ok(MeshBuilder { vertices, triangles }.build())
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the number of indices (three per triangle).
    #[inline]
    pub fn index_count(&self) -> usize {
        self.triangles.len() * 3
    }

    /// Returns true if the mesh is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Returns a reference to the vertices.
    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    /// Returns a reference to the vertex normals.
    #[inline]
    pub fn normals(&self) -> &[DVec3] {
        &self.normals
    }

    /// Returns a reference to the triangles.
    #[inline]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Returns the vertex at the given index.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        self.vertices[index as usize]
    }

    /// Returns the triangle at the given index.
    #[inline]
    pub fn triangle(&self, index: usize) -> [u32; 3] {
        self.triangles[index]
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.vertices.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        rest.iter()
            .fold((*first, *first), |(min, max), v| (min.min(*v), max.max(*v)))
    }

    /// Signed enclosed volume (divergence theorem).
    ///
    /// Positive when triangles wind counter-clockwise seen from outside.
    pub fn signed_volume(&self) -> f64 {
        self.triangles
            .iter()
            .map(|tri| {
                let v0 = self.vertices[tri[0] as usize];
                let v1 = self.vertices[tri[1] as usize];
                let v2 = self.vertices[tri[2] as usize];
                v0.dot(v1.cross(v2))
            })
            .sum::<f64>()
            / 6.0
    }

    /// Returns a copy with every vertex transformed by a 4x4 matrix.
    ///
    /// Normals are transformed by the inverse transpose.
    pub fn transformed(&self, matrix: &DMat4) -> Mesh {
        let normal_matrix = matrix.inverse().transpose();
        Mesh {
            vertices: self
                .vertices
                .iter()
                .map(|v| matrix.transform_point3(*v))
                .collect(),
            normals: self
                .normals
                .iter()
                .map(|n| normal_matrix.transform_vector3(*n).normalize_or_zero())
                .collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Returns a copy translated by a vector.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let moved = mesh.translated(DVec3::new(10.0, 0.0, 0.0));
    /// ```
    pub fn translated(&self, offset: DVec3) -> Mesh {
        Mesh {
            vertices: self.vertices.iter().map(|v| *v + offset).collect(),
            normals: self.normals.clone(),
            triangles: self.triangles.clone(),
        }
    }

    /// Returns a copy whose bounding box is centered on the origin.
    pub fn centered(&self) -> Mesh {
        let (min, max) = self.bounding_box();
        self.translated(-(min + max) * 0.5)
    }

    /// Returns a copy with new vertex positions and recomputed normals.
    ///
    /// Used by surface perturbation; the triangle list is shared unchanged.
    pub fn with_positions(&self, vertices: Vec<DVec3>) -> Result<Mesh, GeometryError> {
        if vertices.len() != self.vertices.len() {
            return Err(GeometryError::degenerate(format!(
                "expected {} positions, got {}",
                self.vertices.len(),
                vertices.len()
            )));
        }
        let normals = compute_normals(&vertices, &self.triangles);
        Ok(Mesh {
            vertices,
            normals,
            triangles: self.triangles.clone(),
        })
    }

    /// Merges several meshes into one (no boolean, just concatenation).
    pub fn merged<'a>(meshes: impl IntoIterator<Item = &'a Mesh>) -> Mesh {
        let mut vertices = Vec::new();
        let mut normals = Vec::new();
        let mut triangles = Vec::new();

        for mesh in meshes {
            let offset = vertices.len() as u32;
            vertices.extend_from_slice(&mesh.vertices);
            normals.extend_from_slice(&mesh.normals);
            triangles.extend(
                mesh.triangles
                    .iter()
                    .map(|tri| [tri[0] + offset, tri[1] + offset, tri[2] + offset]),
            );
        }

        Mesh {
            vertices,
            normals,
            triangles,
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - All triangle indices are valid
    /// - No degenerate triangles (repeated index or zero area)
    /// - One normal per vertex
    ///
    /// Returns true if valid.
    pub fn validate(&self) -> bool {
        let vertex_count = self.vertices.len() as u32;

        if self.normals.len() != self.vertices.len() {
            return false;
        }

        for tri in &self.triangles {
            // Check indices are valid
            if tri[0] >= vertex_count || tri[1] >= vertex_count || tri[2] >= vertex_count {
                return false;
            }

            // Check for degenerate triangles
            if tri[0] == tri[1] || tri[1] == tri[2] || tri[0] == tri[2] {
                return false;
            }

            // Check for zero-area triangles
            let v0 = self.vertices[tri[0] as usize];
            let v1 = self.vertices[tri[1] as usize];
            let v2 = self.vertices[tri[2] as usize];
            let area = (v1 - v0).cross(v2 - v0).length();
            if area < VERTEX_MERGE_EPSILON {
                return false;
            }
        }

        true
    }

    /// Exports vertices as f32 array for GPU.
    ///
    /// Returns flattened [x, y, z, x, y, z, ...] array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        flatten_f32(&self.vertices)
    }

    /// Exports normals as f32 array for GPU.
    pub fn normals_f32(&self) -> Vec<f32> {
        flatten_f32(&self.normals)
    }

    /// Exports triangle indices as u32 array for GPU.
    ///
    /// Returns flattened [i0, i1, i2, i0, i1, i2, ...] array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

fn flatten_f32(values: &[DVec3]) -> Vec<f32> {
    let mut result = Vec::with_capacity(values.len() * 3);
    for v in values {
        result.push(v.x as f32);
        result.push(v.y as f32);
        result.push(v.z as f32);
    }
    result
}

/// Area-weighted average of adjacent face normals, per vertex.
fn compute_normals(vertices: &[DVec3], triangles: &[[u32; 3]]) -> Vec<DVec3> {
    let mut normals = vec![DVec3::ZERO; vertices.len()];

    for tri in triangles {
        let v0 = vertices[tri[0] as usize];
        let v1 = vertices[tri[1] as usize];
        let v2 = vertices[tri[2] as usize];

        let normal = (v1 - v0).cross(v2 - v0);

        normals[tri[0] as usize] += normal;
        normals[tri[1] as usize] += normal;
        normals[tri[2] as usize] += normal;
    }

    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }

    normals
}
