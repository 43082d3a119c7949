/// Indexed polygon meshes
use crate::error::{RenderError, RenderResult};
use crate::material::Material;
use crate::transform::Transform;
use crate::vector::Vector3;

/// Ordered vertex indices. Two indices form a standalone edge, three or more
/// a polygon; anything shorter is ignored by the draw passes.
pub type Face = Vec<usize>;

/// Normal reported for faces with fewer than three indices
pub const DEFAULT_NORMAL: Vector3 = Vector3::new(0.0, 0.0, 1.0);

/// A mesh in local space plus its placement and material.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vector3>,
    pub faces: Vec<Face>,
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            transform: Transform::identity(),
            material: Material::default(),
            visible: true,
        }
    }

    pub fn with_capacity(vertices: usize, faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            faces: Vec::with_capacity(faces),
            ..Self::new()
        }
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, x: f32, y: f32, z: f32) -> usize {
        self.vertices.push(Vector3::new(x, y, z));
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, indices: impl Into<Face>) {
        self.faces.push(indices.into());
    }

    /// Check every face index against the vertex list.
    pub fn validate(&self) -> RenderResult<()> {
        for (face_index, face) in self.faces.iter().enumerate() {
            for &index in face {
                vertex_at(&self.vertices, face_index, index)?;
            }
        }
        Ok(())
    }

    /// World-space copies of every vertex, index-aligned with `vertices`.
    pub fn transformed_vertices(&self) -> Vec<Vector3> {
        self.vertices
            .iter()
            .map(|vertex| self.transform.apply(vertex))
            .collect()
    }

    /// Normal of `face` from its first three transformed vertices.
    ///
    /// A collinear face yields the zero vector rather than NaNs.
    pub fn face_normal(&self, face_index: usize, transformed: &[Vector3]) -> RenderResult<Vector3> {
        let face = self.faces.get(face_index).ok_or(RenderError::FaceOutOfBounds {
            face: face_index,
            face_count: self.faces.len(),
        })?;
        face_normal(face_index, face, transformed)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, rx: f32, ry: f32, rz: f32) {
        self.transform.rotate(rx, ry, rz);
    }

    pub fn reset_rotation(&mut self) {
        self.transform.reset_rotation();
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the normal for a face against an already-transformed vertex list.
pub fn face_normal(face_index: usize, face: &[usize], transformed: &[Vector3]) -> RenderResult<Vector3> {
    if face.len() < 3 {
        return Ok(DEFAULT_NORMAL);
    }

    let v1 = vertex_at(transformed, face_index, face[0])?;
    let v2 = vertex_at(transformed, face_index, face[1])?;
    let v3 = vertex_at(transformed, face_index, face[2])?;

    let edge1 = v2 - v1;
    let edge2 = v3 - v1;
    let normal = edge1.cross(&edge2);

    let length = normal.norm();
    if length > 0.0 {
        Ok(normal / length)
    } else {
        Ok(normal)
    }
}

/// Bounds-checked lookup of a face's vertex.
pub fn vertex_at<T>(items: &[T], face: usize, index: usize) -> RenderResult<&T> {
    items.get(index).ok_or(RenderError::FaceIndexOutOfBounds {
        face,
        index,
        vertex_count: items.len(),
    })
}
