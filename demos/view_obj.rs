//! Interactive terminal viewer for dualview
//!
//! Renders both viewer slots as stacked ASCII panes and routes mouse
//! input to the pane under the cursor:
//! - Drag with the left button to rotate a view
//! - Scroll to zoom a view
//! - Press q or Esc to quit
//!
//! Pass an OBJ path as the first argument, or run without arguments to
//! view a generated cube.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use dualview_core::{Point3f, Rgb, Vector3f};
use dualview_visualization::{
    DualViewer, Frame, OrthoBounds, Primitive, SlotId, AXIS_X_COLOR, AXIS_Y_COLOR, AXIS_Z_COLOR,
};
use std::env;
use std::fs;
use std::io::{stdout, Write};
use std::time::Duration;

const CUBE_OBJ: &str = "\
# unit cube with quad faces
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vn 0 0 -1
vn 0 0 1
vn -1 0 0
vn 1 0 0
vn 0 -1 0
vn 0 1 0
f 1//1 2//1 3//1 4//1
f 5//2 8//2 7//2 6//2
f 1//3 4//3 8//3 5//3
f 2//4 6//4 7//4 3//4
f 1//5 5//5 6//5 2//5
f 4//6 3//6 7//6 8//6
";

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal cells are roughly twice as tall as wide; viewport heights
/// reported to the slots double the row count so projections stay square
/// on screen.
const CELL_ASPECT: u32 = 2;

fn main() -> Result<()> {
    let (path, is_temp) = match env::args().nth(1) {
        Some(path) => (path, false),
        None => {
            let path = env::temp_dir().join("dualview_demo_cube.obj");
            fs::write(&path, CUBE_OBJ)?;
            (path.display().to_string(), true)
        }
    };

    let mut dual = DualViewer::new();
    let report = dual.load(&path);
    if is_temp {
        let _ = fs::remove_file(&path);
    }
    if !report.success() {
        println!("{}", report.message);
        return Ok(());
    }

    let mut app = TerminalApp::new(dual)?;
    let result = app.run();
    println!("{}", report.message);
    result
}

/// Splits the terminal into two stacked panes, each with a label row
#[derive(Debug, Clone, Copy)]
struct Layout {
    cols: u16,
    pane_rows: u16,
}

impl Layout {
    fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            pane_rows: rows.saturating_sub(2) / 2,
        }
    }

    fn label_row(&self, slot: SlotId) -> u16 {
        match slot {
            SlotId::Top => 0,
            SlotId::Bottom => self.pane_rows + 1,
        }
    }

    fn content_row(&self, slot: SlotId) -> u16 {
        self.label_row(slot) + 1
    }

    /// Which pane a screen row falls in
    fn slot_at(&self, row: u16) -> SlotId {
        if row <= self.pane_rows {
            SlotId::Top
        } else {
            SlotId::Bottom
        }
    }
}

/// Interactive terminal application driving both viewer slots
struct TerminalApp {
    dual: DualViewer,
    layout: Layout,
    top_pane: AsciiRenderer,
    bottom_pane: AsciiRenderer,
    drag_slot: Option<SlotId>,
    running: bool,
}

impl TerminalApp {
    fn new(mut dual: DualViewer) -> Result<Self> {
        let (cols, rows) = terminal::size()?;
        let layout = Layout::new(cols, rows);
        Self::apply_layout(&mut dual, layout);

        Ok(Self {
            dual,
            layout,
            top_pane: AsciiRenderer::new(layout.cols as usize, layout.pane_rows as usize),
            bottom_pane: AsciiRenderer::new(layout.cols as usize, layout.pane_rows as usize),
            drag_slot: None,
            running: true,
        })
    }

    fn apply_layout(dual: &mut DualViewer, layout: Layout) {
        for slot in [SlotId::Top, SlotId::Bottom] {
            dual.resize(
                slot,
                layout.cols as u32,
                layout.pane_rows as u32 * CELL_ASPECT,
            );
        }
    }

    fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            if self.dual.needs_redraw() {
                self.redraw()?;
            }
            if event::poll(Duration::from_millis(33))? {
                self.handle_event(event::read()?)?;
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                _ => {}
            },
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(cols, rows) => {
                self.layout = Layout::new(cols, rows);
                Self::apply_layout(&mut self.dual, self.layout);
                self.top_pane =
                    AsciiRenderer::new(self.layout.cols as usize, self.layout.pane_rows as usize);
                self.bottom_pane =
                    AsciiRenderer::new(self.layout.cols as usize, self.layout.pane_rows as usize);
                execute!(stdout(), Clear(ClearType::All))?;
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let hover_slot = self.layout.slot_at(mouse.row);
        let x = mouse.column as f32;
        let y = mouse.row as f32 * CELL_ASPECT as f32;

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_slot = Some(hover_slot);
                self.dual.pointer_pressed(hover_slot, x, y);
            }
            // A drag stays with the slot it started in, like a pointer
            // grab would.
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(slot) = self.drag_slot {
                    self.dual.pointer_moved(slot, x, y, true);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_slot = None,
            MouseEventKind::Moved => self.dual.pointer_moved(hover_slot, x, y, false),
            MouseEventKind::ScrollUp => self.dual.wheel(hover_slot, 1.0),
            MouseEventKind::ScrollDown => self.dual.wheel(hover_slot, -1.0),
            _ => {}
        }
    }

    fn redraw(&mut self) -> Result<()> {
        let mut out = stdout();
        self.draw_pane(SlotId::Top, &mut out)?;
        self.draw_pane(SlotId::Bottom, &mut out)?;
        out.flush()?;
        Ok(())
    }

    fn draw_pane<W: Write>(&mut self, slot: SlotId, writer: &mut W) -> Result<()> {
        let layout = self.layout;
        let frame = self.dual.render(slot);
        let zoom = self.dual.viewer(slot).state().zoom;
        let label = self.dual.label(slot);

        let pane = match slot {
            SlotId::Top => &mut self.top_pane,
            SlotId::Bottom => &mut self.bottom_pane,
        };
        pane.clear();
        pane.render_frame(&frame);
        pane.draw(writer, layout.content_row(slot))?;

        let skipped = if frame.stats.is_clean() {
            String::new()
        } else {
            format!(" | skipped {} triangles", frame.stats.triangles_dropped)
        };
        queue!(
            writer,
            cursor::MoveTo(0, layout.label_row(slot)),
            Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{label} | zoom {zoom:.2}{skipped} | drag=rotate scroll=zoom q=quit"
            )),
            ResetColor
        )?;
        Ok(())
    }
}

/// ASCII rasterizer converting a frame's primitives to terminal cells
struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    fn clear(&mut self) {
        for i in 0..self.depth_buffer.len() {
            self.depth_buffer[i] = f32::INFINITY;
            self.char_buffer[i] = ' ';
            self.color_buffer[i] = Color::Reset;
        }
    }

    fn render_frame(&mut self, frame: &Frame) {
        for primitive in &frame.primitives {
            match primitive {
                Primitive::Line { start, end, color } => {
                    self.render_line(start, end, *color, &frame.projection);
                }
                Primitive::Triangle { positions, normals } => {
                    self.render_triangle(positions, normals, &frame.projection);
                }
            }
        }
    }

    /// Map a view-space point to fractional cell coordinates plus a depth
    /// key. View z grows toward the viewer, so the key is its negation.
    fn project(&self, p: &Point3f, ortho: &OrthoBounds) -> (f32, f32, f32) {
        let sx = (p.x - ortho.left) / (ortho.right - ortho.left) * (self.width as f32 - 1.0);
        let sy = (ortho.top - p.y) / (ortho.top - ortho.bottom) * (self.height as f32 - 1.0);
        (sx, sy, -p.z)
    }

    fn render_line(&mut self, start: &Point3f, end: &Point3f, color: Rgb, ortho: &OrthoBounds) {
        let (x0, y0, z0) = self.project(start, ortho);
        let (x1, y1, z1) = self.project(end, ortho);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        let color = line_color(color);

        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(
                x0 + (x1 - x0) * t,
                y0 + (y1 - y0) * t,
                z0 + (z1 - z0) * t,
                '+',
                color,
            );
        }
    }

    fn render_triangle(
        &mut self,
        positions: &[Point3f; 3],
        normals: &[Option<Vector3f>; 3],
        ortho: &OrthoBounds,
    ) {
        let coords = [
            self.project(&positions[0], ortho),
            self.project(&positions[1], ortho),
            self.project(&positions[2], ortho),
        ];

        // Shade by how much the surface faces the viewer, lighting both
        // sides so winding order does not matter.
        let brightness = match shading_normal(positions, normals).try_normalize(1e-6) {
            Some(n) => n.z.abs(),
            None => 0.3,
        };
        let char_index = ((brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize)
            .min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];
        let color = match character {
            ' ' | '.' | ':' => Color::DarkGrey,
            '-' | '=' => Color::Grey,
            '+' | '*' => Color::White,
            _ => Color::Cyan,
        };

        self.rasterize_triangle(&coords, character, color);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char, color: Color) {
        let (a, b, c) = (coords[0], coords[1], coords[2]);

        let min_x = (a.0.min(b.0).min(c.0).floor() as i32).max(0);
        let max_x = (a.0.max(b.0).max(c.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (a.1.min(b.1).min(c.1).floor() as i32).max(0);
        let max_y = (a.1.max(b.1).max(c.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;
                let Some((w0, w1, w2)) =
                    barycentric((a.0, a.1), (b.0, b.1), (c.0, c.1), (px, py))
                else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * a.2 + w1 * b.2 + w2 * c.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                    self.color_buffer[idx] = color;
                }
            }
        }
    }

    fn plot(&mut self, x: f32, y: f32, depth: f32, character: char, color: Color) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x.round() as usize, y.round() as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        if depth < self.depth_buffer[idx] {
            self.depth_buffer[idx] = depth;
            self.char_buffer[idx] = character;
            self.color_buffer[idx] = color;
        }
    }

    fn draw<W: Write>(&self, writer: &mut W, row_offset: u16) -> Result<()> {
        for y in 0..self.height {
            queue!(writer, cursor::MoveTo(0, row_offset + y as u16))?;
            for x in 0..self.width {
                let idx = y * self.width + x;
                queue!(
                    writer,
                    SetForegroundColor(self.color_buffer[idx]),
                    Print(self.char_buffer[idx])
                )?;
            }
        }
        queue!(writer, ResetColor)?;
        Ok(())
    }
}

/// Average the available vertex normals, falling back to the face cross
/// product when none are present
fn shading_normal(positions: &[Point3f; 3], normals: &[Option<Vector3f>; 3]) -> Vector3f {
    let mut sum = Vector3f::zeros();
    let mut count = 0;
    for normal in normals.iter().flatten() {
        sum += *normal;
        count += 1;
    }
    if count > 0 {
        sum / count as f32
    } else {
        (positions[1] - positions[0]).cross(&(positions[2] - positions[0]))
    }
}

fn line_color(color: Rgb) -> Color {
    if color == AXIS_X_COLOR {
        Color::Blue
    } else if color == AXIS_Y_COLOR {
        Color::Green
    } else if color == AXIS_Z_COLOR {
        Color::Red
    } else {
        Color::White
    }
}

/// Barycentric coordinates of a point in a screen-space triangle
fn barycentric(
    a: (f32, f32),
    b: (f32, f32),
    c: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (b.1 - c.1) * (a.0 - c.0) + (c.0 - b.0) * (a.1 - c.1);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((b.1 - c.1) * (p.0 - c.0) + (c.0 - b.0) * (p.1 - c.1)) / denom;
    let w1 = ((c.1 - a.1) * (p.0 - c.0) + (a.0 - c.0) * (p.1 - c.1)) / denom;
    Some((w0, w1, 1.0 - w0 - w1))
}
