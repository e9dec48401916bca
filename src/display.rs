/// Rendering layer — all terminal I/O lives here.
///
/// `draw_game` translates state into primitive draw calls on a `Renderer`.
/// No game logic is performed. `TerminalRenderer` is the crossterm-backed
/// renderer that scales the logical field onto the terminal grid.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use glam::Vec2;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::entities::{Colour, GameState};

// ── Renderer primitives ───────────────────────────────────────────────────────

/// Every draw call of a frame happens between `begin_frame` and `end_frame`.
pub trait Renderer {
    fn begin_frame(&mut self) -> std::io::Result<()>;
    fn clear(&mut self, colour: Colour) -> std::io::Result<()>;
    fn draw_circle(&mut self, centre: Vec2, radius: f32, colour: Colour) -> std::io::Result<()>;
    /// `x`/`y` are field pixels of the first character.
    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        size: u16,
        colour: Colour,
    ) -> std::io::Result<()>;
    fn end_frame(&mut self) -> std::io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame. `end_frame` runs even if a draw call failed;
/// the first error wins.
pub fn draw_game<R: Renderer + ?Sized>(renderer: &mut R, state: &GameState) -> std::io::Result<()> {
    renderer.begin_frame()?;
    let drawn = draw_scene(renderer, state);
    let ended = renderer.end_frame();
    drawn.and(ended)
}

fn draw_scene<R: Renderer + ?Sized>(r: &mut R, state: &GameState) -> std::io::Result<()> {
    r.clear(Colour::Black)?;

    if state.game_over {
        return draw_game_over(r, state);
    }

    let p = &state.player;
    r.draw_circle(p.position, p.radius, p.colour)?;

    for bullet in state.bullets.iter().filter(|b| b.active) {
        r.draw_circle(bullet.position, bullet.radius, bullet.colour)?;
    }
    for enemy in state.enemies.iter().filter(|e| e.active) {
        r.draw_circle(enemy.position, enemy.radius, enemy.colour)?;
    }

    draw_hud(r, state)
}

// ── HUD ───────────────────────────────────────────────────────────────────────

fn draw_hud<R: Renderer + ?Sized>(r: &mut R, state: &GameState) -> std::io::Result<()> {
    let h = FIELD_HEIGHT as i32;
    r.draw_text(&format!("Score: {}", state.score), 10, 10, 20, Colour::White)?;
    r.draw_text("WASD/Arrows: Move", 10, h - 60, 16, Colour::Grey)?;
    r.draw_text("Mouse: Aim & Click to Shoot", 10, h - 40, 16, Colour::Grey)?;
    r.draw_text("ESC: Quit", 10, h - 20, 16, Colour::Grey)?;
    Ok(())
}

// ── Game-over screen ──────────────────────────────────────────────────────────

fn draw_game_over<R: Renderer + ?Sized>(r: &mut R, state: &GameState) -> std::io::Result<()> {
    let cx = FIELD_WIDTH as i32 / 2;
    let cy = FIELD_HEIGHT as i32 / 2;
    r.draw_text("GAME OVER", cx - 100, cy - 50, 40, Colour::Red)?;
    r.draw_text(
        &format!("Final Score: {}", state.score),
        cx - 80,
        cy,
        20,
        Colour::White,
    )?;
    r.draw_text(
        "Press R to restart or ESC to quit",
        cx - 140,
        cy + 40,
        16,
        Colour::Grey,
    )?;
    Ok(())
}

// ── Field ↔ terminal mapping ──────────────────────────────────────────────────

/// Maps the logical field onto a `cols × rows` terminal grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    fn cell_width(&self) -> f32 {
        FIELD_WIDTH / self.cols as f32
    }

    fn cell_height(&self) -> f32 {
        FIELD_HEIGHT / self.rows as f32
    }

    /// The cell containing field point `p`, if it is on screen.
    pub fn to_cell(&self, p: Vec2) -> Option<(u16, u16)> {
        let col = (p.x / self.cell_width()).floor();
        let row = (p.y / self.cell_height()).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    /// Field coordinates of the centre of a cell.
    pub fn to_field(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 + 0.5) * self.cell_width(),
            (row as f32 + 0.5) * self.cell_height(),
        )
    }

    /// Every on-screen cell whose centre lies within the circle. A circle
    /// smaller than a cell still covers the cell holding its centre.
    pub fn circle_cells(&self, centre: Vec2, radius: f32) -> Vec<(u16, u16)> {
        let (cw, ch) = (self.cell_width(), self.cell_height());
        let first_col = ((centre.x - radius) / cw).floor().max(0.0) as u16;
        let last_col = ((centre.x + radius) / cw).floor().min(self.cols as f32 - 1.0);
        let first_row = ((centre.y - radius) / ch).floor().max(0.0) as u16;
        let last_row = ((centre.y + radius) / ch).floor().min(self.rows as f32 - 1.0);

        let mut cells = Vec::new();
        if last_col >= 0.0 && last_row >= 0.0 {
            for row in first_row..=last_row as u16 {
                for col in first_col..=last_col as u16 {
                    if self.to_field(col, row).distance(centre) <= radius {
                        cells.push((col, row));
                    }
                }
            }
        }
        if cells.is_empty() {
            cells.extend(self.to_cell(centre));
        }
        cells
    }
}

// ── Colour palette ────────────────────────────────────────────────────────────

fn terminal_colour(colour: Colour) -> Color {
    match colour {
        Colour::Black => Color::Black,
        Colour::White => Color::White,
        Colour::Grey => Color::DarkGrey,
        Colour::Blue => Color::Blue,
        Colour::Yellow => Color::Yellow,
        Colour::Red => Color::Red,
    }
}

// ── Terminal renderer ─────────────────────────────────────────────────────────

pub struct TerminalRenderer<W: Write> {
    out: W,
    viewport: Viewport,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self { out, viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self) -> std::io::Result<()> {
        self.out.queue(cursor::Hide)?;
        Ok(())
    }

    fn clear(&mut self, colour: Colour) -> std::io::Result<()> {
        self.out.queue(style::SetBackgroundColor(terminal_colour(colour)))?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn draw_circle(&mut self, centre: Vec2, radius: f32, colour: Colour) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(terminal_colour(colour)))?;
        for (col, row) in self.viewport.circle_cells(centre, radius) {
            self.out.queue(cursor::MoveTo(col, row))?;
            self.out.queue(Print("█"))?;
        }
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        _size: u16,
        colour: Colour,
    ) -> std::io::Result<()> {
        let Some((col, row)) = self.viewport.to_cell(Vec2::new(x as f32, y as f32)) else {
            return Ok(());
        };
        // Clip at the right edge instead of wrapping.
        let room = (self.viewport.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();

        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(terminal_colour(colour)))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }

    fn end_frame(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.viewport.rows - 1))?;
        self.out.flush()
    }
}
