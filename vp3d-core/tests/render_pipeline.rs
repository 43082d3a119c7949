use vp3d_core::{
    primitives, stl, Color, CommandRecorder, ControlCommand, DrawCommand, Mesh, RenderError,
    Session, ViewportMode,
};

fn frame(session: &Session) -> CommandRecorder {
    let mut recorder = CommandRecorder::new();
    session.render(&mut recorder).unwrap();
    recorder
}

fn count(recorder: &CommandRecorder, pred: impl Fn(&DrawCommand) -> bool) -> usize {
    recorder.commands.iter().filter(|c| pred(c)).count()
}

#[test]
fn default_scene_shows_front_face_only() {
    let session = Session::with_default_scene(800, 600);
    let recorder = frame(&session);
    assert_eq!(recorder.fill_colors(), vec![Color::rgb(0x80, 0x80, 0x80)]);
}

#[test]
fn rotated_cube_shows_at_most_three_faces() {
    let mut session = Session::with_default_scene(800, 600);
    session.apply(ControlCommand::Rotate { dx: 0.5, dy: 0.6, dz: 0.0 });
    let visible = frame(&session).fill_count();
    assert!((1..=3).contains(&visible), "{} faces drawn", visible);

    session.apply(ControlCommand::ToggleBackfaceCulling);
    assert_eq!(frame(&session).fill_count(), 6);
}

#[test]
fn material_shading_stays_within_light_range() {
    let mut session = Session::with_default_scene(800, 600);
    session.apply(ControlCommand::SetViewportMode(ViewportMode::Material));
    session.apply(ControlCommand::Rotate { dx: 0.5, dy: 0.6, dz: 0.0 });

    let base = session.active_mesh().unwrap().material.base_color;
    let colors = frame(&session).fill_colors();
    assert!(!colors.is_empty());
    // Between ambient (0.3) and the brightest unnormalized-light response (~1.11)
    for color in colors {
        assert_eq!(color.r, 0);
        assert!(color.g >= 76 && color.g <= base.g);
        assert!(color.b >= 19 && color.b <= 72);
    }
}

#[test]
fn every_mode_draws_the_default_scene() {
    for mode in ["wireframe", "solid", "material", "rendered", "glitter"] {
        let mut session = Session::with_default_scene(800, 600);
        session.renderer.set_viewport_mode(mode);
        session.apply(ControlCommand::ToggleWireframeOverlay);
        let recorder = frame(&session);

        let strokes = count(&recorder, |c| matches!(c, DrawCommand::Stroke));
        let markers = count(&recorder, |c| matches!(c, DrawCommand::FillCircle { .. }));
        assert_eq!(strokes, 6, "mode {}", mode);
        assert_eq!(markers, 8, "mode {}", mode);
    }
}

#[test]
fn all_screen_coordinates_are_finite() {
    let mut session = Session::with_default_scene(800, 600);
    session.apply(ControlCommand::SetViewportMode(ViewportMode::Wireframe));
    for _ in 0..10 {
        session.apply(ControlCommand::Rotate { dx: 0.3, dy: 0.2, dz: 0.1 });
        session.apply(ControlCommand::ScaleMultiply(1.05));
        for command in frame(&session).commands {
            match command {
                DrawCommand::MoveTo { x, y }
                | DrawCommand::LineTo { x, y }
                | DrawCommand::FillCircle { x, y, .. } => {
                    assert!(x.is_finite() && y.is_finite());
                }
                _ => {}
            }
        }
    }
}

#[test]
fn later_meshes_paint_over_earlier_ones() {
    let mut near = primitives::cube(1.0);
    near.material = vp3d_core::Material::with_base_color(255, 0, 0);
    let mut far = primitives::cube(1.0);
    far.transform.position.z = 3.0;
    far.material = vp3d_core::Material::with_base_color(0, 0, 255);

    let mut session = Session::new(vp3d_core::Renderer::new(800, 600), vec![far, near]);
    session.apply(ControlCommand::SetViewportMode(ViewportMode::Material));
    let colors = frame(&session).fill_colors();
    assert_eq!(colors, vec![Color::rgb(0, 0, 255), Color::rgb(255, 0, 0)]);
}

#[test]
fn broken_mesh_reports_its_face() {
    let mut mesh = Mesh::new();
    mesh.add_vertex(0.0, 0.0, 0.0);
    mesh.add_face([0, 3]);
    let session = Session::new(vp3d_core::Renderer::new(100, 100), vec![mesh]);

    let mut recorder = CommandRecorder::new();
    let err = session.render(&mut recorder).unwrap_err();
    assert_eq!(
        err,
        RenderError::FaceIndexOutOfBounds {
            face: 0,
            index: 3,
            vertex_count: 1
        }
    );
    assert!(err.to_string().contains("face 0"));
}

#[test]
fn imported_stl_renders() {
    // One facet facing the camera (outward normal -Z)
    let source = "solid quad
facet normal 0 0 -1
outer loop
vertex 0 0 0
vertex 0 1 0
vertex 1 0 0
endloop
endfacet
endsolid quad
";
    let mesh = stl::parse_stl(source.as_bytes()).unwrap();
    let session = Session::new(vp3d_core::Renderer::new(800, 600), vec![mesh]);
    assert_eq!(frame(&session).fill_count(), 1);
}
