/// Directional light with an ambient floor
use crate::color::Color;
use crate::vector::Vector3;

/// A single directional light.
///
/// `direction` is used as given. It is not normalized, so its length scales
/// the diffuse term and a face turned toward the light can come out brighter
/// than its base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vector3,
    pub ambient: f32,
}

impl Light {
    /// Brightness multiplier for a surface with the given normal. Never below
    /// `ambient`; above 1 when the diffuse term exceeds 1.
    pub fn intensity(&self, normal: &Vector3) -> f32 {
        let diffuse = (-normal.dot(&self.direction)).max(0.0);
        self.ambient + (1.0 - self.ambient) * diffuse
    }

    /// Scale each channel of `base` by the intensity at `normal`, flooring.
    /// Channels saturate at 255.
    pub fn shade(&self, base: Color, normal: &Vector3) -> Color {
        let intensity = self.intensity(normal);
        let channel = |c: u8| (c as f32 * intensity).floor().clamp(0.0, 255.0) as u8;

        Color::rgb(channel(base.r), channel(base.g), channel(base.b))
    }
}

impl Default for Light {
    fn default() -> Self {
        Self {
            direction: Vector3::new(0.3, -0.5, -1.0),
            ambient: 0.3,
        }
    }
}
