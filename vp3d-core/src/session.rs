/// Viewer session: renderer, scene and the control commands that drive them
use std::str::FromStr;

use log::{debug, warn};

use crate::error::RenderResult;
use crate::mesh::Mesh;
use crate::primitives;
use crate::renderer::{Renderer, ViewportMode};
use crate::surface::DrawSurface;

/// Rotation step for one gesture, in radians
pub const GESTURE_ROTATION_STEP: f32 = 0.2;
/// Scale factor for one zoom gesture
pub const ZOOM_FACTOR: f32 = 1.1;

/// A user or device request that changes what the next frame shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    SetViewportMode(ViewportMode),
    ToggleWireframeOverlay,
    ToggleBackfaceCulling,
    /// Added to the active mesh's rotation (radians)
    Rotate { dx: f32, dy: f32, dz: f32 },
    /// Multiplies every scale axis of the active mesh
    ScaleMultiply(f32),
    /// Zero rotation and unit scale; position is kept
    ResetTransform,
}

/// Gesture names sent by the hand-tracking relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    RotateRight,
    RotateLeft,
    RotateUp,
    RotateDown,
    ZoomIn,
    ZoomOut,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gesture: {0:?}")]
pub struct UnknownGesture(pub String);

impl FromStr for Gesture {
    type Err = UnknownGesture;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ROTATE_RIGHT" => Ok(Gesture::RotateRight),
            "ROTATE_LEFT" => Ok(Gesture::RotateLeft),
            "ROTATE_UP" => Ok(Gesture::RotateUp),
            "ROTATE_DOWN" => Ok(Gesture::RotateDown),
            "ZOOM_IN" => Ok(Gesture::ZoomIn),
            "ZOOM_OUT" => Ok(Gesture::ZoomOut),
            "RESET" => Ok(Gesture::Reset),
            other => Err(UnknownGesture(other.to_string())),
        }
    }
}

impl From<Gesture> for ControlCommand {
    fn from(gesture: Gesture) -> Self {
        let step = GESTURE_ROTATION_STEP;
        match gesture {
            Gesture::RotateRight => ControlCommand::Rotate { dx: 0.0, dy: step, dz: 0.0 },
            Gesture::RotateLeft => ControlCommand::Rotate { dx: 0.0, dy: -step, dz: 0.0 },
            Gesture::RotateUp => ControlCommand::Rotate { dx: -step, dy: 0.0, dz: 0.0 },
            Gesture::RotateDown => ControlCommand::Rotate { dx: step, dy: 0.0, dz: 0.0 },
            Gesture::ZoomIn => ControlCommand::ScaleMultiply(ZOOM_FACTOR),
            Gesture::ZoomOut => ControlCommand::ScaleMultiply(1.0 / ZOOM_FACTOR),
            Gesture::Reset => ControlCommand::ResetTransform,
        }
    }
}

/// Everything a viewer front end mutates: the renderer settings, the
/// meshes and which mesh transform commands apply to.
pub struct Session {
    pub renderer: Renderer,
    pub meshes: Vec<Mesh>,
    active: usize,
}

impl Session {
    pub fn new(renderer: Renderer, meshes: Vec<Mesh>) -> Self {
        Self {
            renderer,
            meshes,
            active: 0,
        }
    }

    /// The default scene: a size-2 cube two units in front of the origin.
    pub fn with_default_scene(width: u32, height: u32) -> Self {
        let mut cube = primitives::cube(2.0);
        cube.transform.position.z = -2.0;
        Self::new(Renderer::new(width, height), vec![cube])
    }

    pub fn active_mesh(&self) -> Option<&Mesh> {
        self.meshes.get(self.active)
    }

    pub fn active_mesh_mut(&mut self) -> Option<&mut Mesh> {
        self.meshes.get_mut(self.active)
    }

    /// Select which mesh receives transform commands.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.meshes.len() {
            self.active = index;
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, command: ControlCommand) {
        match command {
            ControlCommand::SetViewportMode(mode) => self.renderer.set_mode(mode),
            ControlCommand::ToggleWireframeOverlay => {
                self.renderer.toggle_wireframe_overlay();
            }
            ControlCommand::ToggleBackfaceCulling => {
                self.renderer.toggle_backface_culling();
            }
            ControlCommand::Rotate { dx, dy, dz } => {
                if let Some(mesh) = self.active_mesh_mut() {
                    mesh.rotate(dx, dy, dz);
                }
            }
            ControlCommand::ScaleMultiply(factor) => {
                if let Some(mesh) = self.active_mesh_mut() {
                    mesh.transform.scale_by(factor);
                }
            }
            ControlCommand::ResetTransform => {
                if let Some(mesh) = self.active_mesh_mut() {
                    mesh.transform.reset();
                }
            }
        }
    }

    /// Apply a gesture name received from the relay. Unknown names are
    /// logged and ignored.
    pub fn apply_gesture(&mut self, message: &str) -> Option<Gesture> {
        debug!("Gesture received: {}", message.trim());
        match message.parse::<Gesture>() {
            Ok(gesture) => {
                self.apply(gesture.into());
                Some(gesture)
            }
            Err(err) => {
                warn!("{}", err);
                None
            }
        }
    }

    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) -> RenderResult<()> {
        self.renderer.render(&self.meshes, surface)
    }
}
