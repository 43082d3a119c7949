use crate::color::Color;

/// Per-mesh shading parameters.
///
/// `metallic` and `roughness` are carried for authoring tools; the current
/// lighting model only reads `base_color`.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub base_color: Color,
    pub metallic: f32,
    pub roughness: f32,
    pub visible: bool,
}

impl Material {
    pub fn with_base_color(r: u8, g: u8, b: u8) -> Self {
        Self {
            base_color: Color::rgb(r, g, b),
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: Color::rgb(0, 255, 65),
            metallic: 0.0,
            roughness: 0.5,
            visible: true,
        }
    }
}
