/// Immediate-mode 2D drawing surface used by the renderer
use crate::color::Color;

/// Soft outer glow applied to subsequent fills and strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub color: Color,
    pub blur: f32,
}

/// The drawing primitives the renderer issues.
///
/// Path methods follow canvas semantics: `begin_path` discards the current
/// path, `move_to` starts a new subpath, `close_path` joins a subpath back to
/// its start, and `fill`/`stroke` paint the current path with the current
/// fill/stroke color.
pub trait DrawSurface {
    /// Erase everything drawn so far.
    fn clear(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f32);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);
    /// Paint a filled disc with the current fill color.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
    /// Set or remove the glow style for subsequent draw calls.
    fn set_glow(&mut self, glow: Option<Glow>);
}

/// One recorded call on a [`DrawSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f32),
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    ClosePath,
    Stroke,
    Fill,
    FillCircle { x: f32, y: f32, radius: f32 },
    SetGlow(Option<Glow>),
}

/// A surface that records commands instead of drawing them.
#[derive(Debug, Default, Clone)]
pub struct CommandRecorder {
    pub commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `Fill` commands recorded so far
    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Fill))
            .count()
    }

    /// Fill colors in the order polygons were filled.
    ///
    /// Tracks the last `SetFillColor` and reports it at every `Fill`.
    pub fn fill_colors(&self) -> Vec<Color> {
        let mut current = None;
        let mut colors = Vec::new();
        for command in &self.commands {
            match command {
                DrawCommand::SetFillColor(color) => current = Some(*color),
                DrawCommand::Fill => {
                    if let Some(color) = current {
                        colors.push(color);
                    }
                }
                _ => {}
            }
        }
        colors
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetFillColor(color));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::SetStrokeColor(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::LineTo { x, y });
    }

    fn close_path(&mut self) {
        self.commands.push(DrawCommand::ClosePath);
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        self.commands.push(DrawCommand::FillCircle { x, y, radius });
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        self.commands.push(DrawCommand::SetGlow(glow));
    }
}
