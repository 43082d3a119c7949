/// Camera and projection utilities
use nalgebra::{Point2, Point3};

use crate::vector::Vector3;

/// Perspective camera looking down +Z from `distance` units behind the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal field of view in degrees
    pub fov: f32,
    pub distance: f32,
    pub center: Point2<f32>,
    /// Screen width in surface units, used for the focal length
    pub width: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            fov: 60.0,
            distance: 6.0,
            center: Point2::new(width as f32 / 2.0, height as f32 / 2.0),
            width: width as f32,
        }
    }

    pub fn focal_length(&self) -> f32 {
        self.width / (2.0 * (self.fov.to_radians() / 2.0).tan())
    }

    /// Project a world-space point to screen space.
    ///
    /// Screen Y grows downward. The returned `z` is the unmodified world Z.
    /// A point at `z == -distance` divides by zero; callers must check the
    /// result with [`is_drawable`].
    pub fn project(&self, vertex: &Vector3) -> Point3<f32> {
        let scale = self.focal_length() / (vertex.z + self.distance);

        Point3::new(
            vertex.x * scale + self.center.x,
            -vertex.y * scale + self.center.y,
            vertex.z,
        )
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Whether a projected point has finite screen coordinates.
pub fn is_drawable(point: &Point3<f32>) -> bool {
    point.x.is_finite() && point.y.is_finite()
}
