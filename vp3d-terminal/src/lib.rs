/// Terminal front end: frame loop and keyboard controls around the
/// character-cell drawing surface
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use vp3d_core::{ControlCommand, Mesh, Renderer, Session, ViewportMode};

pub mod canvas;

pub use canvas::TerminalCanvas;

/// Rotation applied per arrow-key press, in radians
const KEY_ROTATION_STEP: f32 = 0.1;
const KEY_ZOOM_FACTOR: f32 = 1.1;

/// Map a key to the control command it triggers, if any.
pub fn command_for_key(code: KeyCode) -> Option<ControlCommand> {
    let step = KEY_ROTATION_STEP;
    let command = match code {
        KeyCode::Char('1') => ControlCommand::SetViewportMode(ViewportMode::Wireframe),
        KeyCode::Char('2') => ControlCommand::SetViewportMode(ViewportMode::Solid),
        KeyCode::Char('3') => ControlCommand::SetViewportMode(ViewportMode::Material),
        KeyCode::Char('4') => ControlCommand::SetViewportMode(ViewportMode::Rendered),
        KeyCode::Char('w') | KeyCode::Char('W') => ControlCommand::ToggleWireframeOverlay,
        KeyCode::Char('b') | KeyCode::Char('B') => ControlCommand::ToggleBackfaceCulling,
        KeyCode::Up => ControlCommand::Rotate { dx: -step, dy: 0.0, dz: 0.0 },
        KeyCode::Down => ControlCommand::Rotate { dx: step, dy: 0.0, dz: 0.0 },
        KeyCode::Left => ControlCommand::Rotate { dx: 0.0, dy: -step, dz: 0.0 },
        KeyCode::Right => ControlCommand::Rotate { dx: 0.0, dy: step, dz: 0.0 },
        KeyCode::Char('e') => ControlCommand::Rotate { dx: 0.0, dy: 0.0, dz: step },
        KeyCode::Char('r') | KeyCode::Char('R') => ControlCommand::ResetTransform,
        KeyCode::Char('+') | KeyCode::Char('=') => ControlCommand::ScaleMultiply(KEY_ZOOM_FACTOR),
        KeyCode::Char('-') => ControlCommand::ScaleMultiply(1.0 / KEY_ZOOM_FACTOR),
        _ => return None,
    };
    Some(command)
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    session: Session,
    canvas: TerminalCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(meshes: Vec<Mesh>) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        let canvas = TerminalCanvas::new(columns as usize, rows as usize);
        let (width, height) = canvas.surface_size();

        Ok(Self {
            session: Session::new(Renderer::new(width, height), meshes),
            canvas,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    /// The default scene: a cube in front of the camera
    pub fn with_default_scene() -> io::Result<Self> {
        let mut app = Self::new(Vec::new())?;
        let (width, height) = app.canvas.surface_size();
        app.session = Session::with_default_scene(width, height);
        Ok(app)
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                code => {
                    if let Some(command) = command_for_key(code) {
                        self.session.apply(command);
                    }
                }
            },
            Event::Resize(columns, rows) => {
                log::debug!("Terminal resized to {}x{}", columns, rows);
                self.canvas.resize(columns as usize, rows as usize);
                let (width, height) = self.canvas.surface_size();
                self.session.renderer.resize(width, height);
            }
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.session
            .render(&mut self.canvas)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        // Output to terminal
        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        let state = &self.session.renderer.state;
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "VP3D | FPS: {:.1} | {} | Overlay: {} | Culling: {} | 1-4=Mode W=Overlay B=Culling Arrows/E=Rotate +/-=Zoom R=Reset Q=Quit",
                self.fps,
                state.viewport_mode,
                if state.show_wireframe_overlay { "ON" } else { "OFF" },
                if state.backface_culling { "ON" } else { "OFF" },
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
