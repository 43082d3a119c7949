/// VP3D Web - canvas 2D viewport renderer for browsers
///
/// Wraps a viewer `Session` for JavaScript. The page owns the frame loop
/// (`requestAnimationFrame`) and the gesture socket; it calls `render` once
/// per frame and forwards gesture names to `handle_gesture`.

use vp3d_core::{ControlCommand, Session};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

pub mod canvas;

pub use canvas::CanvasSurface;

#[wasm_bindgen]
pub struct WebRenderer {
    session: Session,
    surface: Option<CanvasSurface>,
}

#[wasm_bindgen]
impl WebRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebRenderer, JsValue> {
        Ok(WebRenderer {
            session: Session::with_default_scene(800, 600),
            surface: None,
        })
    }

    /// Initialize the renderer with a canvas element
    pub fn init(&mut self, canvas_id: &str) -> Result<(), JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id {:?}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element {:?} is not a canvas", canvas_id)))?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("unexpected context type"))?;

        let (width, height) = (canvas.width(), canvas.height());
        self.session.renderer.resize(width, height);
        self.surface = Some(CanvasSurface::new(ctx, width, height));
        log::info!("Canvas {:?} attached at {}x{}", canvas_id, width, height);
        Ok(())
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), JsValue> {
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| JsValue::from_str("renderer not initialized; call init() first"))?;
        self.session
            .render(surface)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn set_viewport_mode(&mut self, mode: &str) {
        self.session.renderer.set_viewport_mode(mode);
    }

    pub fn viewport_mode(&self) -> String {
        self.session.renderer.viewport_mode().to_string()
    }

    pub fn toggle_wireframe_overlay(&mut self) -> bool {
        self.session.renderer.toggle_wireframe_overlay()
    }

    pub fn toggle_backface_culling(&mut self) -> bool {
        self.session.renderer.toggle_backface_culling()
    }

    /// Update rotation state
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.session.apply(ControlCommand::Rotate { dx, dy, dz });
    }

    pub fn scale_multiply(&mut self, factor: f32) {
        self.session.apply(ControlCommand::ScaleMultiply(factor));
    }

    pub fn reset_transform(&mut self) {
        self.session.apply(ControlCommand::ResetTransform);
    }

    /// Apply a gesture name from the relay; returns false for unknown names.
    pub fn handle_gesture(&mut self, message: &str) -> bool {
        self.session.apply_gesture(message).is_some()
    }
}

/// WASM entry point, runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    log::info!("vp3d web viewer loaded");
}
