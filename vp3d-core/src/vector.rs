/// Vector math and in-place axis rotations
use nalgebra::Vector3 as NVector3;

/// A 3D point or direction. Copying a vector never aliases the source.
pub type Vector3 = NVector3<f32>;

/// In-place rotation about the coordinate axes through the origin.
///
/// Each call recomputes `sin`/`cos` from the given angle (radians), so a
/// sequence of calls composes as extrinsic rotations in call order.
pub trait AxisRotation {
    fn rotate_x(&mut self, angle: f32);
    fn rotate_y(&mut self, angle: f32);
    fn rotate_z(&mut self, angle: f32);
}

impl AxisRotation for Vector3 {
    fn rotate_x(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (y, z) = (self.y, self.z);
        self.y = y * cos - z * sin;
        self.z = y * sin + z * cos;
    }

    fn rotate_y(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (x, z) = (self.x, self.z);
        self.x = x * cos + z * sin;
        self.z = z * cos - x * sin;
    }

    fn rotate_z(&mut self, angle: f32) {
        let (sin, cos) = angle.sin_cos();
        let (x, y) = (self.x, self.y);
        self.x = x * cos - y * sin;
        self.y = y * cos + x * sin;
    }
}
