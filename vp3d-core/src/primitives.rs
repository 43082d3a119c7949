/// Factories that populate a generic `Mesh` with common shapes
use crate::mesh::Mesh;

/// Axis-aligned cube centred on the origin with quad faces.
///
/// Faces are wound so that the face nearest the camera (z = -size/2) has a
/// +Z normal and survives backface culling at the default orientation.
pub fn cube(size: f32) -> Mesh {
    let s = size / 2.0;
    let mut mesh = Mesh::with_capacity(8, 6);

    mesh.add_vertex(-s, -s, -s); // 0
    mesh.add_vertex(s, -s, -s); // 1
    mesh.add_vertex(s, s, -s); // 2
    mesh.add_vertex(-s, s, -s); // 3
    mesh.add_vertex(-s, -s, s); // 4
    mesh.add_vertex(s, -s, s); // 5
    mesh.add_vertex(s, s, s); // 6
    mesh.add_vertex(-s, s, s); // 7

    mesh.add_face([0, 1, 2, 3]); // front
    mesh.add_face([5, 4, 7, 6]); // back
    mesh.add_face([4, 0, 3, 7]); // left
    mesh.add_face([1, 5, 6, 2]); // right
    mesh.add_face([3, 2, 6, 7]); // top
    mesh.add_face([4, 5, 1, 0]); // bottom

    mesh
}
