/// Character-cell drawing surface for terminal rendering
use crossterm::{
    cursor,
    style::{self, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use vp3d_core::{Color, DrawSurface, Glow};

/// Character luminosity ramp for filled polygons (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];
const EDGE_CHAR: char = '#';
const MARKER_CHAR: char = 'o';

/// Logical pixels per cell row. Terminal cells are roughly twice as tall
/// as they are wide, so each row covers two logical pixels.
const CELL_ASPECT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::rgb(0, 0, 0),
};

#[derive(Debug, Default)]
struct Subpath {
    points: Vec<(f32, f32)>,
    closed: bool,
}

/// A [`DrawSurface`] that rasterizes into a grid of colored characters.
///
/// Coordinates are logical pixels: one per column horizontally and
/// `CELL_ASPECT` per row vertically.
pub struct TerminalCanvas {
    columns: usize,
    rows: usize,
    cells: Vec<Cell>,
    fill_color: Color,
    stroke_color: Color,
    line_width: f32,
    glow: Option<Glow>,
    path: Vec<Subpath>,
}

impl TerminalCanvas {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows,
            cells: vec![BLANK; columns * rows],
            fill_color: Color::rgb(255, 255, 255),
            stroke_color: Color::rgb(255, 255, 255),
            line_width: 1.0,
            glow: None,
            path: Vec::new(),
        }
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
        self.cells = vec![BLANK; columns * rows];
    }

    /// Size in logical pixels, as passed to the renderer.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.columns as u32, (self.rows * CELL_ASPECT) as u32)
    }

    pub fn cell(&self, column: usize, row: usize) -> Option<&Cell> {
        if column < self.columns && row < self.rows {
            self.cells.get(row * self.columns + column)
        } else {
            None
        }
    }

    pub fn glow(&self) -> Option<Glow> {
        self.glow
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    fn plot(&mut self, x: f32, y: f32, ch: char, color: Color) {
        if !(x.is_finite() && y.is_finite()) || x < 0.0 || y < 0.0 {
            return;
        }
        let column = x.floor() as usize;
        let row = (y / CELL_ASPECT as f32).floor() as usize;
        if column >= self.columns || row >= self.rows {
            return;
        }

        let cell = &mut self.cells[row * self.columns + column];
        *cell = Cell {
            ch,
            color: blend(color, cell.color),
        };
    }

    /// Visit the centre of every cell, in logical pixels.
    fn cell_centres(&self) -> impl Iterator<Item = (f32, f32)> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| {
            (0..columns).map(move |column| {
                (
                    column as f32 + 0.5,
                    (row as f32 + 0.5) * CELL_ASPECT as f32,
                )
            })
        })
    }

    fn rasterize_triangle(&mut self, v0: (f32, f32), v1: (f32, f32), v2: (f32, f32), ch: char, color: Color) {
        let inside: Vec<(f32, f32)> = self
            .cell_centres()
            .filter(|&p| {
                matches!(barycentric(v0, v1, v2, p), Some((w0, w1, w2)) if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0)
            })
            .collect();

        for (x, y) in inside {
            self.plot(x, y, ch, color);
        }
    }

    fn rasterize_line(&mut self, from: (f32, f32), to: (f32, f32), ch: char, color: Color) {
        let (width, height) = self.surface_size();
        let Some((from, to)) = clip_segment(from, to, width as f32, height as f32) else {
            return;
        };
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        // One step per logical pixel along the longer axis
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(from.0 + dx * t, from.1 + dy * t, ch, color);
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for cell in &self.cells[row * self.columns..(row + 1) * self.columns] {
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_terminal_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawSurface for TerminalCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
        self.path.clear();
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let (ch, color) = (ramp_char(self.fill_color), self.fill_color);
        let inside: Vec<(f32, f32)> = self
            .cell_centres()
            .filter(|&(px, py)| px >= x && px < x + width && py >= y && py < y + height)
            .collect();
        for (px, py) in inside {
            self.plot(px, py, ch, color);
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.path.push(Subpath {
            points: vec![(x, y)],
            closed: false,
        });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        match self.path.last_mut() {
            Some(subpath) => subpath.points.push((x, y)),
            None => self.move_to(x, y),
        }
    }

    fn close_path(&mut self) {
        if let Some(subpath) = self.path.last_mut() {
            subpath.closed = true;
        }
    }

    fn stroke(&mut self) {
        let color = self.stroke_color;
        let mut segments = Vec::new();
        for subpath in &self.path {
            segments.extend(subpath.points.windows(2).map(|w| (w[0], w[1])));
            if subpath.closed && subpath.points.len() > 2 {
                if let (Some(&first), Some(&last)) = (subpath.points.first(), subpath.points.last()) {
                    segments.push((last, first));
                }
            }
        }
        for (from, to) in segments {
            self.rasterize_line(from, to, EDGE_CHAR, color);
        }
    }

    fn fill(&mut self) {
        let color = self.fill_color;
        let ch = ramp_char(color);
        let mut triangles = Vec::new();
        for subpath in &self.path {
            if let Some((&first, rest)) = subpath.points.split_first() {
                triangles.extend(rest.windows(2).map(|w| (first, w[0], w[1])));
            }
        }
        for (a, b, c) in triangles {
            self.rasterize_triangle(a, b, c, ch, color);
        }
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) {
        let color = self.fill_color;
        let inside: Vec<(f32, f32)> = self
            .cell_centres()
            .filter(|&(px, py)| (px - x).powi(2) + (py - y).powi(2) <= radius * radius)
            .collect();
        // Always mark the cell under the centre, even for tiny radii
        self.plot(x, y, MARKER_CHAR, color);
        for (px, py) in inside {
            self.plot(px, py, MARKER_CHAR, color);
        }
    }

    fn set_glow(&mut self, glow: Option<Glow>) {
        // Character cells cannot blur; the style is kept so front ends can
        // show it, but it does not change what is plotted.
        self.glow = glow;
    }
}

fn ramp_char(color: Color) -> char {
    let index = (color.luminance() * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Composite `over` onto `under` using `over`'s alpha.
fn blend(over: Color, under: Color) -> Color {
    let a = over.a.clamp(0.0, 1.0);
    if a >= 1.0 {
        return Color::rgb(over.r, over.g, over.b);
    }
    let mix = |o: u8, u: u8| (o as f32 * a + u as f32 * (1.0 - a)).round() as u8;
    Color::rgb(mix(over.r, under.r), mix(over.g, under.g), mix(over.b, under.b))
}

fn to_terminal_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Clip a segment to `[0, width] x [0, height]` (Liang-Barsky).
fn clip_segment(
    from: (f32, f32),
    to: (f32, f32),
    width: f32,
    height: f32,
) -> Option<((f32, f32), (f32, f32))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    if !(dx.is_finite() && dy.is_finite() && from.0.is_finite() && from.1.is_finite()) {
        return None;
    }

    let (mut t0, mut t1) = (0.0f32, 1.0f32);
    for (p, q) in [(-dx, from.0), (dx, width - from.0), (-dy, from.1), (dy, height - from.1)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((
        (from.0 + dx * t0, from.1 + dy * t0),
        (from.0 + dx * t1, from.1 + dy * t1),
    ))
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
