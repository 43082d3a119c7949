/// Viewport renderer: projection, painter's ordering, culling and shading
use std::fmt;

use log::{debug, info, warn};
use nalgebra::Point3;

use crate::color::Color;
use crate::error::RenderResult;
use crate::lighting::Light;
use crate::mesh::{face_normal, vertex_at, Mesh};
use crate::projection::{is_drawable, Camera};
use crate::surface::{DrawSurface, Glow};
use crate::vector::Vector3;

/// Shading style applied to every visible mesh in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewportMode {
    /// Edges and vertex markers, no sorting or culling
    Wireframe,
    /// Flat gray polygons
    #[default]
    Solid,
    /// Polygons lit by the directional light
    Material,
    /// Material pass followed by a glow style
    Rendered,
}

impl ViewportMode {
    /// Parse a mode name, ignoring case. Unknown names select `Solid`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "WIREFRAME" => ViewportMode::Wireframe,
            "SOLID" => ViewportMode::Solid,
            "MATERIAL" => ViewportMode::Material,
            "RENDERED" => ViewportMode::Rendered,
            _ => {
                warn!("Unknown viewport mode {:?}, using SOLID", name);
                ViewportMode::Solid
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewportMode::Wireframe => "WIREFRAME",
            ViewportMode::Solid => "SOLID",
            ViewportMode::Material => "MATERIAL",
            ViewportMode::Rendered => "RENDERED",
        }
    }
}

impl fmt::Display for ViewportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed colors and sizes used by the draw passes
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    pub background: Color,
    pub solid: Color,
    pub wireframe: Color,
    pub overlay: Color,
    pub glow: Glow,
    pub line_width: f32,
    pub marker_radius: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x1a, 0x1a, 0x1a),
            solid: Color::rgb(0x80, 0x80, 0x80),
            wireframe: Color::rgb(0, 0, 255),
            overlay: Color::rgba(0, 255, 65, 0.4),
            glow: Glow {
                color: Color::rgba(0, 255, 65, 0.3),
                blur: 10.0,
            },
            line_width: 2.0,
            marker_radius: 3.0,
        }
    }
}

/// Session-wide render settings, changed only through the toggles
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub viewport_mode: ViewportMode,
    pub show_wireframe_overlay: bool,
    pub backface_culling: bool,
    pub style: RenderStyle,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            viewport_mode: ViewportMode::Solid,
            show_wireframe_overlay: false,
            backface_culling: true,
            style: RenderStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Shading {
    Flat,
    Lit,
}

/// A face with its sort key and normal for one frame
struct DepthFace<'a> {
    index: usize,
    indices: &'a [usize],
    depth: f32,
    normal: Vector3,
}

/// Draws meshes onto a [`DrawSurface`].
pub struct Renderer {
    pub camera: Camera,
    pub light: Light,
    pub state: RenderState,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            camera: Camera::new(width, height),
            light: Light::default(),
            state: RenderState::default(),
            width,
            height,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Change the surface size, re-centring the camera.
    pub fn resize(&mut self, width: u32, height: u32) {
        let Camera { fov, distance, .. } = self.camera;
        self.camera = Camera {
            fov,
            distance,
            ..Camera::new(width, height)
        };
        self.width = width;
        self.height = height;
    }

    pub fn set_viewport_mode(&mut self, name: &str) {
        self.set_mode(ViewportMode::from_name(name));
    }

    pub fn set_mode(&mut self, mode: ViewportMode) {
        self.state.viewport_mode = mode;
        info!("Viewport mode set to: {}", mode);
    }

    pub fn viewport_mode(&self) -> ViewportMode {
        self.state.viewport_mode
    }

    pub fn toggle_wireframe_overlay(&mut self) -> bool {
        self.state.show_wireframe_overlay = !self.state.show_wireframe_overlay;
        info!("Wireframe overlay: {}", on_off(self.state.show_wireframe_overlay));
        self.state.show_wireframe_overlay
    }

    pub fn toggle_backface_culling(&mut self) -> bool {
        self.state.backface_culling = !self.state.backface_culling;
        info!("Backface culling: {}", on_off(self.state.backface_culling));
        self.state.backface_culling
    }

    /// Draw one frame.
    ///
    /// Every face index of a mesh is resolved before that mesh issues its
    /// first draw call, so an out-of-range index aborts the frame without
    /// leaving a half-drawn mesh.
    pub fn render<S: DrawSurface + ?Sized>(&self, meshes: &[Mesh], surface: &mut S) -> RenderResult<()> {
        self.clear(surface);

        for mesh in meshes.iter().filter(|mesh| mesh.visible) {
            surface.set_glow(None);

            match self.state.viewport_mode {
                ViewportMode::Wireframe => {
                    self.draw_wireframe(mesh, self.state.style.wireframe, surface)?;
                }
                ViewportMode::Solid => {
                    self.draw_faces(mesh, Shading::Flat, surface)?;
                    self.draw_overlay(mesh, surface)?;
                }
                ViewportMode::Material => {
                    self.draw_faces(mesh, Shading::Lit, surface)?;
                    self.draw_overlay(mesh, surface)?;
                }
                ViewportMode::Rendered => {
                    self.draw_faces(mesh, Shading::Lit, surface)?;
                    surface.set_glow(Some(self.state.style.glow));
                    self.draw_overlay(mesh, surface)?;
                }
            }
        }

        Ok(())
    }

    fn clear<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        surface.clear();
        surface.set_fill_color(self.state.style.background);
        surface.fill_rect(0.0, 0.0, self.width as f32, self.height as f32);
    }

    fn project_all(&self, world: &[Vector3]) -> Vec<Point3<f32>> {
        world.iter().map(|v| self.camera.project(v)).collect()
    }

    fn draw_overlay<S: DrawSurface + ?Sized>(&self, mesh: &Mesh, surface: &mut S) -> RenderResult<()> {
        if self.state.show_wireframe_overlay {
            self.draw_wireframe(mesh, self.state.style.overlay, surface)?;
        }
        Ok(())
    }

    fn draw_wireframe<S: DrawSurface + ?Sized>(
        &self,
        mesh: &Mesh,
        color: Color,
        surface: &mut S,
    ) -> RenderResult<()> {
        let screen = self.project_all(&mesh.transformed_vertices());

        let mut paths = Vec::with_capacity(mesh.faces.len());
        for (index, face) in mesh.faces.iter().enumerate() {
            let points = resolve(&screen, index, face)?;
            if points.len() < 2 {
                continue;
            }
            if !points.iter().all(is_drawable) {
                debug!("Skipping edges of face {}: non-finite projection", index);
                continue;
            }
            paths.push((points, face.len() > 2));
        }

        surface.set_stroke_color(color);
        surface.set_line_width(self.state.style.line_width);
        for (points, closed) in &paths {
            trace_path(surface, points, *closed);
            surface.stroke();
        }

        surface.set_fill_color(color);
        for (index, point) in screen.iter().enumerate() {
            if !is_drawable(point) {
                debug!("Skipping marker of vertex {}: non-finite projection", index);
                continue;
            }
            surface.fill_circle(point.x, point.y, self.state.style.marker_radius);
        }

        Ok(())
    }

    fn draw_faces<S: DrawSurface + ?Sized>(
        &self,
        mesh: &Mesh,
        shading: Shading,
        surface: &mut S,
    ) -> RenderResult<()> {
        let world = mesh.transformed_vertices();
        let screen = self.project_all(&world);
        let faces = depth_sorted(mesh, &world)?;

        let mut polygons = Vec::with_capacity(faces.len());
        for face in faces {
            if face.indices.len() < 3 {
                continue;
            }
            if self.state.backface_culling && face.normal.z <= 0.0 {
                continue;
            }

            let points = resolve(&screen, face.index, face.indices)?;
            if !points.iter().all(is_drawable) {
                debug!("Skipping face {}: non-finite projection", face.index);
                continue;
            }

            let color = match shading {
                Shading::Flat => self.state.style.solid,
                Shading::Lit => self.light.shade(mesh.material.base_color, &face.normal),
            };
            polygons.push((color, points));
        }

        for (color, points) in &polygons {
            surface.set_fill_color(*color);
            trace_path(surface, points, true);
            surface.fill();
        }

        Ok(())
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Faces ordered farthest first by mean world Z; ties keep insertion order.
fn depth_sorted<'a>(mesh: &'a Mesh, world: &[Vector3]) -> RenderResult<Vec<DepthFace<'a>>> {
    let mut faces = Vec::with_capacity(mesh.faces.len());

    for (index, indices) in mesh.faces.iter().enumerate() {
        let mut depth = 0.0;
        for &vertex in indices {
            depth += vertex_at(world, index, vertex)?.z;
        }
        if !indices.is_empty() {
            depth /= indices.len() as f32;
        }

        faces.push(DepthFace {
            index,
            indices,
            depth,
            normal: face_normal(index, indices, world)?,
        });
    }

    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    Ok(faces)
}

fn resolve(screen: &[Point3<f32>], face: usize, indices: &[usize]) -> RenderResult<Vec<Point3<f32>>> {
    indices
        .iter()
        .map(|&index| vertex_at(screen, face, index).copied())
        .collect()
}

fn trace_path<S: DrawSurface + ?Sized>(surface: &mut S, points: &[Point3<f32>], closed: bool) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    surface.begin_path();
    surface.move_to(first.x, first.y);
    for point in rest {
        surface.line_to(point.x, point.y);
    }
    if closed {
        surface.close_path();
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use crate::primitives;
    use crate::surface::{CommandRecorder, DrawCommand};

    /// A triangle in the z = `z` plane whose normal is +Z, or -Z if `flip`.
    fn add_triangle(mesh: &mut Mesh, z: f32, flip: bool) {
        let a = mesh.add_vertex(-1.0, -1.0, z);
        let b = mesh.add_vertex(1.0, -1.0, z);
        let c = mesh.add_vertex(1.0, 1.0, z);
        if flip {
            mesh.add_face([a, c, b]);
        } else {
            mesh.add_face([a, b, c]);
        }
    }

    fn render(renderer: &Renderer, meshes: &[Mesh]) -> CommandRecorder {
        let mut recorder = CommandRecorder::new();
        renderer.render(meshes, &mut recorder).unwrap();
        recorder
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!(ViewportMode::from_name("wireframe"), ViewportMode::Wireframe);
        assert_eq!(ViewportMode::from_name("Material"), ViewportMode::Material);
        assert_eq!(ViewportMode::from_name("RENDERED"), ViewportMode::Rendered);
        assert_eq!(ViewportMode::from_name("glitter"), ViewportMode::Solid);
        assert_eq!(ViewportMode::Material.to_string(), "MATERIAL");
    }

    #[test]
    fn test_toggles() {
        let mut renderer = Renderer::new(800, 600);
        assert!(!renderer.state.show_wireframe_overlay);
        assert!(renderer.state.backface_culling);
        assert!(renderer.toggle_wireframe_overlay());
        assert!(!renderer.toggle_backface_culling());
        assert!(!renderer.toggle_wireframe_overlay());
    }

    #[test]
    fn test_frame_starts_with_background() {
        let renderer = Renderer::new(800, 600);
        let recorder = render(&renderer, &[]);
        assert_eq!(
            recorder.commands,
            vec![
                DrawCommand::Clear,
                DrawCommand::SetFillColor(Color::rgb(0x1a, 0x1a, 0x1a)),
                DrawCommand::FillRect {
                    x: 0.0,
                    y: 0.0,
                    width: 800.0,
                    height: 600.0
                },
            ]
        );
    }

    #[test]
    fn test_depth_sort_draws_larger_z_first() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, -1.0, false);
        add_triangle(&mut mesh, 1.0, false);

        let world = mesh.transformed_vertices();
        let sorted = depth_sorted(&mesh, &world).unwrap();
        let order: Vec<usize> = sorted.iter().map(|f| f.index).collect();
        assert_eq!(order, vec![1, 0]);
        assert!((sorted[0].depth - 1.0).abs() < 1e-6);
        assert!((sorted[1].depth + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_depth_ties_keep_insertion_order() {
        let mut mesh = Mesh::new();
        for _ in 0..4 {
            add_triangle(&mut mesh, 0.5, false);
        }
        let world = mesh.transformed_vertices();
        let order: Vec<usize> = depth_sorted(&mesh, &world)
            .unwrap()
            .iter()
            .map(|f| f.index)
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_backface_culling_skips_averted_faces() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, 0.0, true);

        let mut renderer = Renderer::new(800, 600);
        assert_eq!(render(&renderer, &[mesh.clone()]).fill_count(), 0);

        renderer.toggle_backface_culling();
        assert_eq!(render(&renderer, &[mesh]).fill_count(), 1);
    }

    #[test]
    fn test_zero_normal_is_culled() {
        let mut mesh = Mesh::new();
        mesh.add_vertex(0.0, 0.0, 0.0);
        mesh.add_vertex(1.0, 0.0, 0.0);
        mesh.add_vertex(2.0, 0.0, 0.0);
        mesh.add_face([0, 1, 2]);

        let mut renderer = Renderer::new(800, 600);
        assert_eq!(render(&renderer, &[mesh.clone()]).fill_count(), 0);
        renderer.toggle_backface_culling();
        assert_eq!(render(&renderer, &[mesh]).fill_count(), 1);
    }

    #[test]
    fn test_solid_skips_edges_and_degenerate_faces() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, 0.0, false);
        mesh.add_face([0, 1]);
        mesh.add_face([2]);
        mesh.add_face(Vec::<usize>::new());

        let renderer = Renderer::new(800, 600);
        let recorder = render(&renderer, &[mesh]);
        assert_eq!(recorder.fill_count(), 1);
        assert_eq!(recorder.fill_colors(), vec![Color::rgb(0x80, 0x80, 0x80)]);
    }

    #[test]
    fn test_polygon_path_starts_at_first_index() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, 0.0, false);

        let mut renderer = Renderer::new(800, 600);
        renderer.set_mode(ViewportMode::Material);
        let recorder = render(&renderer, &[mesh.clone()]);

        let first = renderer.camera.project(&mesh.vertices[0]);
        let second = renderer.camera.project(&mesh.vertices[1]);
        let path: Vec<&DrawCommand> = recorder
            .commands
            .iter()
            .skip_while(|c| !matches!(c, DrawCommand::BeginPath))
            .collect();
        assert_eq!(path[1], &DrawCommand::MoveTo { x: first.x, y: first.y });
        assert_eq!(path[2], &DrawCommand::LineTo { x: second.x, y: second.y });
    }

    #[test]
    fn test_material_uses_lit_color() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, 0.0, false);
        mesh.material.base_color = Color::rgb(200, 100, 50);

        let mut renderer = Renderer::new(800, 600);
        renderer.set_viewport_mode("material");
        let recorder = render(&renderer, &[mesh]);
        assert_eq!(recorder.fill_colors(), vec![Color::rgb(200, 100, 50)]);
    }

    #[test]
    fn test_wireframe_draws_everything() {
        let mut mesh = primitives::cube(2.0);
        mesh.add_face([0, 6]);

        let mut renderer = Renderer::new(800, 600);
        renderer.set_viewport_mode("wireframe");
        let recorder = render(&renderer, &[mesh]);

        let strokes = recorder
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count();
        let closes = recorder
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::ClosePath))
            .count();
        let markers = recorder
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { radius, .. } if *radius == 3.0))
            .count();

        assert_eq!(strokes, 7);
        assert_eq!(closes, 6);
        assert_eq!(markers, 8);
        assert_eq!(recorder.fill_count(), 0);
        assert!(recorder
            .commands
            .contains(&DrawCommand::SetStrokeColor(Color::rgb(0, 0, 255))));
    }

    #[test]
    fn test_overlay_follows_fill() {
        let mut renderer = Renderer::new(800, 600);
        renderer.toggle_wireframe_overlay();
        let recorder = render(&renderer, &[primitives::cube(2.0)]);

        let last_fill = recorder
            .commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Fill))
            .unwrap();
        let overlay = recorder
            .commands
            .iter()
            .position(|c| *c == DrawCommand::SetStrokeColor(Color::rgba(0, 255, 65, 0.4)))
            .unwrap();
        assert!(overlay > last_fill);
    }

    #[test]
    fn test_rendered_is_material_plus_glow() {
        let cube = primitives::cube(2.0);

        let mut renderer = Renderer::new(800, 600);
        renderer.set_mode(ViewportMode::Material);
        let material = render(&renderer, &[cube.clone()]).commands;

        renderer.set_mode(ViewportMode::Rendered);
        let mut rendered = render(&renderer, &[cube]).commands;

        let glow = rendered.pop().unwrap();
        assert_eq!(
            glow,
            DrawCommand::SetGlow(Some(Glow {
                color: Color::rgba(0, 255, 65, 0.3),
                blur: 10.0
            }))
        );
        assert_eq!(rendered, material);
    }

    #[test]
    fn test_unknown_mode_matches_solid() {
        let mut cube = primitives::cube(2.0);
        cube.rotate(0.4, 0.7, 0.1);
        cube.transform.position.z = -2.0;

        let mut renderer = Renderer::new(800, 600);
        renderer.set_viewport_mode("solid");
        let solid = render(&renderer, &[cube.clone()]).commands;
        renderer.set_viewport_mode("glitter");
        let glitter = render(&renderer, &[cube]).commands;
        assert_eq!(solid, glitter);
    }

    #[test]
    fn test_invisible_mesh_is_skipped() {
        let mut cube = primitives::cube(2.0);
        cube.visible = false;
        let renderer = Renderer::new(800, 600);
        assert_eq!(render(&renderer, &[cube]).commands.len(), 3);
    }

    #[test]
    fn test_bad_index_fails_before_drawing_mesh() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, 0.0, false);
        mesh.add_face([0, 1, 42]);

        for mode in ["wireframe", "solid", "material", "rendered"] {
            let mut renderer = Renderer::new(800, 600);
            renderer.set_viewport_mode(mode);
            let mut recorder = CommandRecorder::new();
            let result = renderer.render(&[mesh.clone()], &mut recorder);
            assert_eq!(
                result,
                Err(RenderError::FaceIndexOutOfBounds {
                    face: 1,
                    index: 42,
                    vertex_count: 3
                })
            );
            // background plus the per-mesh glow reset only
            assert_eq!(recorder.commands.len(), 4);
        }
    }

    #[test]
    fn test_singular_projection_is_skipped() {
        let mut mesh = Mesh::new();
        add_triangle(&mut mesh, 0.0, false);
        add_triangle(&mut mesh, -6.0, false);

        let renderer = Renderer::new(800, 600);
        let recorder = render(&renderer, &[mesh]);
        assert_eq!(recorder.fill_count(), 1);
        for command in &recorder.commands {
            if let DrawCommand::MoveTo { x, y } | DrawCommand::LineTo { x, y } = command {
                assert!(x.is_finite() && y.is_finite());
            }
        }
    }

    #[test]
    fn test_resize_recenters_camera() {
        let mut renderer = Renderer::new(800, 600);
        renderer.camera.fov = 45.0;
        renderer.resize(100, 50);
        assert_eq!(renderer.size(), (100, 50));
        assert_eq!(renderer.camera.center, nalgebra::Point2::new(50.0, 25.0));
        assert_eq!(renderer.camera.fov, 45.0);
    }
}
