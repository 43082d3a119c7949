/// VP3D Core Library - Shared geometry, projection and viewport rendering
///
/// This library provides the frontend-independent rendering pipeline:
/// mesh transforms, face normals, perspective projection, painter's-order
/// visibility, shading, and the draw commands issued to a `DrawSurface`.

pub mod color;
pub mod error;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod primitives;
pub mod projection;
pub mod renderer;
pub mod session;
pub mod stl;
pub mod surface;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use color::Color;
pub use error::{RenderError, RenderResult, StlError};
pub use lighting::Light;
pub use material::Material;
pub use mesh::{Face, Mesh};
pub use projection::Camera;
pub use renderer::{RenderState, RenderStyle, Renderer, ViewportMode};
pub use session::{ControlCommand, Gesture, Session};
pub use surface::{CommandRecorder, DrawCommand, DrawSurface, Glow};
pub use transform::Transform;
pub use vector::{AxisRotation, Vector3};
