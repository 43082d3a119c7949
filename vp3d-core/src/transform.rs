/// Mesh placement: scale, axis rotations and translation
use crate::vector::{AxisRotation, Vector3};

/// Position, rotation (radians per axis) and per-axis scale of a mesh.
///
/// Applied to a local vertex in a fixed order:
/// scale, rotate about X, rotate about Y, rotate about Z, translate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3,
    pub rotation: Vector3,
    pub scale: Vector3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    /// Transform a copy of `local` into world space.
    pub fn apply(&self, local: &Vector3) -> Vector3 {
        let mut v = local.component_mul(&self.scale);

        v.rotate_x(self.rotation.x);
        v.rotate_y(self.rotation.y);
        v.rotate_z(self.rotation.z);

        v + self.position
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.rotation.x += dx;
        self.rotation.y += dy;
        self.rotation.z += dz;
    }

    pub fn reset_rotation(&mut self) {
        self.rotation = Vector3::zeros();
    }

    /// Multiply every scale axis by `factor`.
    pub fn scale_by(&mut self, factor: f32) {
        self.scale *= factor;
    }

    /// Zero the rotation and restore unit scale. Position is kept.
    pub fn reset(&mut self) {
        self.reset_rotation();
        self.scale = Vector3::new(1.0, 1.0, 1.0);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
